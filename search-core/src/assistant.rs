//! Dropdown state for one search box.
//!
//! The assistant is driven by DOM events and answers with what the panel
//! should show and whether a suggestion lookup must be scheduled. Timers and
//! HTTP live in the caller; the assistant only hands out [`RequestTicket`]s
//! and accepts results for the newest one, so a slow response for an old
//! query can never overwrite a newer panel.

use crate::error::{StoreError, SuggestError};
use crate::history::{HistoryStore, KeyValueStore, SearchHistory};

/// Quiet period before a lookup is sent.
pub const DEBOUNCE_MS: u32 = 300;
/// Shortest query (in characters, after trimming) that is looked up.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestRequest {
    pub ticket: RequestTicket,
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Hidden,
    History(Vec<String>),
    Suggestions(Vec<String>),
}

impl Panel {
    pub fn is_open(&self) -> bool {
        !matches!(self, Panel::Hidden)
    }

    fn history(history: &SearchHistory) -> Self {
        if history.is_empty() {
            Panel::Hidden
        } else {
            Panel::History(history.entries().to_vec())
        }
    }
}

#[derive(Debug)]
pub struct SearchAssistant<S> {
    history: HistoryStore<S>,
    panel: Panel,
    next_ticket: u64,
    /// Debounce waiting to fire.
    scheduled: Option<SuggestRequest>,
    /// Lookup whose response may still render.
    awaiting: Option<RequestTicket>,
}

impl<S: KeyValueStore> SearchAssistant<S> {
    pub fn new(store: S) -> Self {
        Self {
            history: HistoryStore::new(store),
            panel: Panel::Hidden,
            next_ticket: 0,
            scheduled: None,
            awaiting: None,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    pub fn history(&self) -> SearchHistory {
        self.history.load()
    }

    /// Focus or click on the input. History shows only for an empty box.
    pub fn focus(&mut self, value: &str) {
        if value.trim().is_empty() {
            self.panel = Panel::history(&self.history.load());
        }
    }

    /// The input's value changed. Cancels whatever was scheduled or in
    /// flight; returns a ticket when a lookup should be debounced.
    pub fn input(&mut self, value: &str) -> Option<RequestTicket> {
        self.scheduled = None;
        self.awaiting = None;

        let query = value.trim();
        match query.chars().count() {
            0 => {
                self.panel = Panel::history(&self.history.load());
                None
            }
            n if n < MIN_QUERY_CHARS => {
                self.panel = Panel::Hidden;
                None
            }
            _ => {
                let ticket = self.issue_ticket();
                self.scheduled = Some(SuggestRequest {
                    ticket,
                    query: query.to_string(),
                });
                Some(ticket)
            }
        }
    }

    /// The debounce for `ticket` fired. Returns the lookup to send, unless a
    /// later input replaced it.
    pub fn debounce_elapsed(&mut self, ticket: RequestTicket) -> Option<SuggestRequest> {
        if self.scheduled.as_ref().map(|request| request.ticket) != Some(ticket) {
            log::debug!("Ignoring superseded debounce #{}", ticket.id());
            return None;
        }

        let request = self.scheduled.take()?;
        self.awaiting = Some(request.ticket);
        Some(request)
    }

    /// Apply a lookup result. Returns `false` when the result belongs to a
    /// superseded request and was dropped.
    pub fn suggestions_received(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<String>, SuggestError>,
    ) -> bool {
        if self.awaiting != Some(ticket) {
            log::debug!("Dropping stale suggestions for #{}", ticket.id());
            return false;
        }
        self.awaiting = None;

        self.panel = match result {
            Ok(items) if !items.is_empty() => Panel::Suggestions(items),
            Ok(_) => Panel::Hidden,
            Err(e) => {
                log::debug!("No suggestions for #{}: {}", ticket.id(), e);
                Panel::Hidden
            }
        };
        true
    }

    /// A history entry or suggestion was picked. The returned text goes into
    /// the input before the form is submitted.
    pub fn select(&mut self, text: &str) -> Result<String, StoreError> {
        self.close();
        self.history.record(text)?;
        Ok(text.to_string())
    }

    /// The enclosing form is being submitted with `value`.
    pub fn submit(&mut self, value: &str) -> Result<(), StoreError> {
        self.history.record(value).map(|_| ())
    }

    /// Click outside the input and the panel.
    pub fn dismiss(&mut self) {
        self.panel = Panel::Hidden;
    }

    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        self.panel = Panel::Hidden;
        self.history.clear()
    }

    fn close(&mut self) {
        self.panel = Panel::Hidden;
        self.scheduled = None;
        self.awaiting = None;
    }

    fn issue_ticket(&mut self) -> RequestTicket {
        self.next_ticket += 1;
        RequestTicket(self.next_ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{MemoryStore, HISTORY_STORAGE_KEY};

    fn assistant() -> SearchAssistant<MemoryStore> {
        SearchAssistant::new(MemoryStore::new())
    }

    fn with_history(raw: &str) -> SearchAssistant<MemoryStore> {
        SearchAssistant::new(MemoryStore::with_item(HISTORY_STORAGE_KEY, raw))
    }

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn focus_on_empty_box_shows_history() {
        let mut a = with_history("[\"rust\",\"wasm\"]");
        a.focus("   ");
        assert_eq!(a.panel(), &Panel::History(items(&["rust", "wasm"])));
    }

    #[test]
    fn focus_without_history_keeps_panel_hidden() {
        let mut a = assistant();
        a.focus("");
        assert_eq!(a.panel(), &Panel::Hidden);
    }

    #[test]
    fn focus_on_filled_box_changes_nothing() {
        let mut a = with_history("[\"rust\"]");
        a.focus("ru");
        assert!(!a.is_open());
    }

    #[test]
    fn cleared_history_then_focus_shows_nothing() {
        let mut a = with_history("[\"rust\"]");
        a.focus("");
        assert!(a.is_open());

        a.clear_history().unwrap();
        assert!(!a.is_open());

        a.focus("");
        assert_eq!(a.panel(), &Panel::Hidden);
    }

    #[test]
    fn single_character_hides_and_never_schedules() {
        let mut a = with_history("[\"rust\"]");
        a.focus("");
        assert!(a.is_open());

        assert_eq!(a.input("r"), None);
        assert_eq!(a.input(" r "), None);
        assert!(!a.is_open());
    }

    #[test]
    fn single_multibyte_character_is_too_short() {
        let mut a = assistant();
        assert_eq!(a.input("検"), None);
        assert!(a.input("検索").is_some());
    }

    #[test]
    fn emptying_the_box_shows_history_again() {
        let mut a = with_history("[\"rust\"]");
        a.input("ru");
        assert_eq!(a.input(""), None);
        assert_eq!(a.panel(), &Panel::History(items(&["rust"])));
    }

    #[test]
    fn quiet_period_yields_exactly_one_lookup() {
        let mut a = assistant();
        let ticket = a.input("  rust ").unwrap();

        let request = a.debounce_elapsed(ticket).unwrap();
        assert_eq!(request.query, "rust");
        assert_eq!(request.ticket, ticket);

        assert_eq!(a.debounce_elapsed(ticket), None);
    }

    #[test]
    fn typing_again_cancels_the_earlier_debounce() {
        let mut a = assistant();
        let first = a.input("ru").unwrap();
        let second = a.input("rus").unwrap();
        assert_ne!(first, second);

        assert_eq!(a.debounce_elapsed(first), None);
        assert_eq!(a.debounce_elapsed(second).unwrap().query, "rus");
    }

    #[test]
    fn shortening_below_minimum_cancels_the_debounce() {
        let mut a = assistant();
        let ticket = a.input("ru").unwrap();
        a.input("r");
        assert_eq!(a.debounce_elapsed(ticket), None);
    }

    #[test]
    fn suggestions_render_for_the_current_request() {
        let mut a = assistant();
        let ticket = a.input("ru").unwrap();
        a.debounce_elapsed(ticket).unwrap();

        assert!(a.suggestions_received(ticket, Ok(items(&["rust", "ruby"]))));
        assert_eq!(a.panel(), &Panel::Suggestions(items(&["rust", "ruby"])));
    }

    #[test]
    fn stale_response_never_overwrites_newer_query() {
        let mut a = assistant();
        let slow = a.input("ru").unwrap();
        a.debounce_elapsed(slow).unwrap();

        let fast = a.input("rust").unwrap();
        a.debounce_elapsed(fast).unwrap();
        assert!(a.suggestions_received(fast, Ok(items(&["rust book"]))));

        assert!(!a.suggestions_received(slow, Ok(items(&["ruby"]))));
        assert_eq!(a.panel(), &Panel::Suggestions(items(&["rust book"])));
    }

    #[test]
    fn response_after_box_was_emptied_is_dropped() {
        let mut a = with_history("[\"rust\"]");
        let ticket = a.input("ru").unwrap();
        a.debounce_elapsed(ticket).unwrap();
        a.input("");

        assert!(!a.suggestions_received(ticket, Ok(items(&["ruby"]))));
        assert_eq!(a.panel(), &Panel::History(items(&["rust"])));
    }

    #[test]
    fn failed_or_empty_lookup_hides_panel() {
        let mut a = with_history("[\"rust\"]");
        a.focus("");

        let ticket = a.input("ru").unwrap();
        a.debounce_elapsed(ticket).unwrap();
        assert!(a.suggestions_received(ticket, Err(SuggestError::Status(500))));
        assert!(!a.is_open());

        let ticket = a.input("rus").unwrap();
        a.debounce_elapsed(ticket).unwrap();
        assert!(a.suggestions_received(ticket, Ok(Vec::new())));
        assert!(!a.is_open());
    }

    #[test]
    fn select_hides_and_returns_text() {
        let mut a = assistant();
        let ticket = a.input("ru").unwrap();
        a.debounce_elapsed(ticket).unwrap();
        a.suggestions_received(ticket, Ok(items(&["rust"])));

        assert_eq!(a.select("rust").unwrap(), "rust");
        assert!(!a.is_open());
        assert_eq!(a.history().entries(), ["rust"]);
    }

    #[test]
    fn submissions_build_deduplicated_history() {
        let mut a = assistant();
        for query in ["foo", "bar", "foo", "  ", ""] {
            a.submit(query).unwrap();
        }
        assert_eq!(a.history().entries(), ["foo", "bar"]);
    }

    #[test]
    fn dismiss_closes_any_panel() {
        let mut a = with_history("[\"rust\"]");
        a.focus("");
        a.dismiss();
        assert_eq!(a.panel(), &Panel::Hidden);
    }

    #[test]
    fn tickets_increase() {
        let mut a = assistant();
        let first = a.input("ab").unwrap();
        let second = a.input("abc").unwrap();
        assert!(second > first);
    }
}
