pub mod api;
pub mod config;
pub mod interop;
pub mod search;
pub mod storage;
pub mod theme;

pub use api::*;
pub use config::*;
pub use interop::*;
pub use search::{SearchBox, SEARCHBOX_ID};
pub use storage::*;
pub use theme::*;

use web_sys::Document;

/// Enhance the current page once its DOM is ready.
pub fn start() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document available, page enhancements disabled");
        return;
    };

    on_dom_ready(&document, install);
}

/// Wire the theme toggle and the search box. Either feature is skipped when
/// its element is missing from `document`.
pub fn install(document: &Document) {
    let config = UiConfig::from_document(document);

    theme::install(document);

    if let Err(e) = search::install(document, &config) {
        log::warn!("Failed to set up search assistant: {:?}", e);
    }
}
