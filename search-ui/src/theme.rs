use chrono::Utc;
use search_core::{cookie_value, Theme, THEME_ATTRIBUTE, THEME_COOKIE};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument};

use crate::interop::listen;

pub const THEME_TOGGLE_ID: &str = "themeToggle";

/// Theme saved in the `theme` cookie, falling back to dark.
pub fn saved_theme(document: &Document) -> Theme {
    let header = document
        .dyn_ref::<HtmlDocument>()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default();

    cookie_value(&header, THEME_COOKIE)
        .map(|raw| {
            js_sys::decode_uri_component(raw)
                .map(String::from)
                .unwrap_or_else(|_| raw.to_string())
        })
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

/// Theme currently shown, read back from the root element.
pub fn current_theme(document: &Document) -> Theme {
    document
        .document_element()
        .and_then(|root| root.get_attribute(THEME_ATTRIBUTE))
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

pub fn apply_theme_to_document(document: &Document, theme: Theme) {
    if let Some(root) = document.document_element() {
        if let Err(e) = root.set_attribute(THEME_ATTRIBUTE, theme.as_str()) {
            log::warn!("Failed to apply theme {}: {:?}", theme, e);
        }
    }
}

pub fn persist_theme(document: &Document, theme: Theme) {
    let Some(html) = document.dyn_ref::<HtmlDocument>() else {
        return;
    };

    if let Err(e) = html.set_cookie(&theme.set_cookie(Utc::now())) {
        log::warn!("Failed to persist theme preference: {:?}", e);
    }
}

/// Flip the shown theme, then write attribute and cookie from the same value.
pub fn toggle_theme(document: &Document) -> Theme {
    let next = current_theme(document).toggled();
    apply_theme_to_document(document, next);
    persist_theme(document, next);
    next
}

/// Apply the saved theme and wire `#themeToggle` when the page has one.
pub fn install(document: &Document) {
    let theme = saved_theme(document);
    apply_theme_to_document(document, theme);

    let Some(toggle) = document.get_element_by_id(THEME_TOGGLE_ID) else {
        log::info!("No #{} on page, theme toggle disabled", THEME_TOGGLE_ID);
        return;
    };

    let doc = document.clone();
    let wired = listen(&toggle, "click", move |_| {
        let theme = toggle_theme(&doc);
        log::debug!("Theme switched to {}", theme);
    });

    if let Err(e) = wired {
        log::warn!("Failed to wire theme toggle: {:?}", e);
    }
}
