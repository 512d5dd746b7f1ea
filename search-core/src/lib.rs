//! Theme and search-assistant state for the page UI
//!
//! Nothing here touches the browser. `search-ui` feeds DOM events in and
//! renders what comes out; the same types run natively under `cargo test`.

pub mod assistant;
pub mod error;
pub mod history;
pub mod theme;

pub use assistant::{
    Panel, RequestTicket, SearchAssistant, SuggestRequest, DEBOUNCE_MS, MIN_QUERY_CHARS,
};
pub use error::{StoreError, SuggestError};
pub use history::{
    HistoryStore, KeyValueStore, MemoryStore, SearchHistory, HISTORY_STORAGE_KEY, MAX_HISTORY,
};
pub use theme::{cookie_value, Theme, UnknownTheme, THEME_ATTRIBUTE, THEME_COOKIE, THEME_COOKIE_DAYS};
