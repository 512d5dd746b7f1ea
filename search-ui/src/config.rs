use search_core::DEBOUNCE_MS;
use web_sys::Document;

pub const DEFAULT_SUGGEST_URL: &str = "/suggest";
pub const DEFAULT_HISTORY_LABEL: &str = "検索履歴";
pub const DEFAULT_CLEAR_LABEL: &str = "クリア";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Endpoint answering `?keyword=` with a JSON array of strings
    pub suggest_url: String,
    /// Quiet period before a suggestion lookup is sent
    pub debounce_ms: u32,
    /// Header text above the history entries
    pub history_label: String,
    /// Text of the button wiping history
    pub clear_label: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            suggest_url: DEFAULT_SUGGEST_URL.to_string(),
            debounce_ms: DEBOUNCE_MS,
            history_label: DEFAULT_HISTORY_LABEL.to_string(),
            clear_label: DEFAULT_CLEAR_LABEL.to_string(),
        }
    }
}

impl UiConfig {
    /// Read overrides from `data-*` attributes on the root element.
    pub fn from_document(document: &Document) -> Self {
        let root = document.document_element();
        Self::from_attributes(|name| root.as_ref().and_then(|el| el.get_attribute(name)))
    }

    pub fn from_attributes(attr: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            suggest_url: attr_string(&attr, "data-suggest-url", defaults.suggest_url),
            debounce_ms: attr_parse(&attr, "data-suggest-debounce-ms", defaults.debounce_ms),
            history_label: attr_string(&attr, "data-history-label", defaults.history_label),
            clear_label: attr_string(&attr, "data-history-clear-label", defaults.clear_label),
        }
    }
}

fn attr_string(attr: &impl Fn(&str) -> Option<String>, name: &str, default: String) -> String {
    attr(name)
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .unwrap_or(default)
}

fn attr_parse<T: std::str::FromStr>(
    attr: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T
where
    T::Err: std::fmt::Display,
{
    match attr(name) {
        Some(val) => match val.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("Ignoring {name}={val}: {e}");
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> UiConfig {
        let attrs: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        UiConfig::from_attributes(|name| attrs.get(name).cloned())
    }

    #[test]
    fn defaults_without_attributes() {
        let config = config_from(&[]);
        assert_eq!(config, UiConfig::default());
        assert_eq!(config.suggest_url, "/suggest");
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn attributes_override_defaults() {
        let config = config_from(&[
            ("data-suggest-url", "/api/suggest"),
            ("data-suggest-debounce-ms", "150"),
            ("data-history-label", "Recent"),
            ("data-history-clear-label", "Clear"),
        ]);
        assert_eq!(config.suggest_url, "/api/suggest");
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.history_label, "Recent");
        assert_eq!(config.clear_label, "Clear");
    }

    #[test]
    fn invalid_or_blank_values_keep_defaults() {
        let config = config_from(&[
            ("data-suggest-debounce-ms", "soon"),
            ("data-suggest-url", "  "),
        ]);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.suggest_url, "/suggest");
    }
}
