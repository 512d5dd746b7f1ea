use gloo_net::http::Request;
use search_core::SuggestError;

/// Ask `endpoint` for completions of `query`.
pub async fn fetch_suggestions(endpoint: &str, query: &str) -> Result<Vec<String>, SuggestError> {
    let response = Request::get(endpoint)
        .query([("keyword", query)])
        .send()
        .await
        .map_err(|e| SuggestError::Request(e.to_string()))?;

    if !response.ok() {
        return Err(SuggestError::Status(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| SuggestError::Request(e.to_string()))?;

    parse_suggestions(&body)
}

/// Decode a `/suggest` body: a JSON array of strings, in display order.
pub fn parse_suggestions(body: &str) -> Result<Vec<String>, SuggestError> {
    serde_json::from_str::<Vec<String>>(body).map_err(|e| SuggestError::Decode(e.to_string()))
}
