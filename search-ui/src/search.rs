//! Search box enhancement: history and suggestion dropdown
//!
//! One [`SearchBox`] owns the dropdown, the debounce and the request tickets
//! for one `<input>`. All decisions come from [`SearchAssistant`]; this
//! module only turns DOM events into assistant calls and the resulting
//! [`Panel`] back into elements.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use search_core::{Panel, RequestTicket, SearchAssistant};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement};

use crate::api::fetch_suggestions;
use crate::config::UiConfig;
use crate::interop::{event_within, listen};
use crate::storage::LocalStorage;

pub const SEARCHBOX_ID: &str = "searchbox";

const CONTAINER_STYLE: &str = "position: absolute; top: 100%; left: 0; right: 0; background: var(--bg-card); border: 1px solid var(--border-color); border-radius: 0 0 12px 12px; max-height: 300px; overflow-y: auto; z-index: 1001; display: none;";
const HEADER_STYLE: &str = "padding: 8px 16px; display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid var(--border-color);";
const HEADER_LABEL_STYLE: &str = "font-size: 0.85rem; color: var(--text-secondary);";
const CLEAR_BUTTON_STYLE: &str = "font-size: 0.75rem; color: var(--text-secondary); background: none; border: none; cursor: pointer; padding: 4px 8px;";
const HISTORY_ITEM_STYLE: &str = "padding: 12px 16px; cursor: pointer; transition: background 0.2s; display: flex; align-items: center; gap: 10px;";
const HISTORY_ICON_STYLE: &str = "color: var(--text-secondary);";
const SUGGESTION_ITEM_STYLE: &str = "padding: 12px 16px; cursor: pointer; transition: background 0.2s;";
const HOVER_BACKGROUND: &str = "rgba(255, 255, 255, 0.1)";

const ITEM_SELECTOR: &str = ".history-item, .suggestion-item";
const CLEAR_SELECTOR: &str = ".history-clear";
/// Row attribute carrying the text a click puts into the search box.
const VALUE_ATTRIBUTE: &str = "data-value";

pub struct SearchBox {
    document: Document,
    input: HtmlInputElement,
    form: HtmlFormElement,
    container: HtmlElement,
    config: UiConfig,
    assistant: RefCell<SearchAssistant<LocalStorage>>,
    /// Pending debounce; replacing it cancels the previous one.
    debounce: RefCell<Option<Timeout>>,
}

/// Enhance `#searchbox` if the page has one inside a form.
pub fn install(
    document: &Document,
    config: &UiConfig,
) -> Result<Option<Rc<SearchBox>>, JsValue> {
    let Some(input) = document
        .get_element_by_id(SEARCHBOX_ID)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        log::info!("No #{} input on page, search assistant disabled", SEARCHBOX_ID);
        return Ok(None);
    };

    let Some(form) = input.form() else {
        log::info!("#{} is not inside a form, search assistant disabled", SEARCHBOX_ID);
        return Ok(None);
    };

    SearchBox::attach(document, input, form, config.clone()).map(Some)
}

impl SearchBox {
    pub fn attach(
        document: &Document,
        input: HtmlInputElement,
        form: HtmlFormElement,
        config: UiConfig,
    ) -> Result<Rc<Self>, JsValue> {
        let container = create_container(document, &input)?;

        let search = Rc::new(Self {
            document: document.clone(),
            input,
            form,
            container,
            config,
            assistant: RefCell::new(SearchAssistant::new(LocalStorage)),
            debounce: RefCell::new(None),
        });

        search.wire()?;
        Ok(search)
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    pub fn panel(&self) -> Panel {
        self.assistant.borrow().panel().clone()
    }

    fn wire(self: &Rc<Self>) -> Result<(), JsValue> {
        for event in ["focus", "click"] {
            let this = Rc::clone(self);
            listen(&self.input, event, move |_| this.on_focus())?;
        }

        let this = Rc::clone(self);
        listen(&self.input, "input", move |_| this.on_input())?;

        let this = Rc::clone(self);
        listen(&self.form, "submit", move |_| this.on_submit())?;

        let this = Rc::clone(self);
        listen(&self.document, "click", move |e| this.on_document_click(&e))?;

        // Rows are rebuilt on every render, so their events are handled here.
        let this = Rc::clone(self);
        listen(&self.container, "click", move |e| this.on_panel_click(&e))?;

        listen(&self.container, "mouseover", |e| {
            set_row_background(&e, HOVER_BACKGROUND);
        })?;
        listen(&self.container, "mouseout", |e| {
            set_row_background(&e, "transparent");
        })?;

        Ok(())
    }

    fn on_focus(&self) {
        self.assistant.borrow_mut().focus(&self.input.value());
        self.render();
    }

    fn on_input(self: &Rc<Self>) {
        self.debounce.borrow_mut().take();

        let ticket = self.assistant.borrow_mut().input(&self.input.value());
        self.render();

        if let Some(ticket) = ticket {
            self.schedule(ticket);
        }
    }

    fn schedule(self: &Rc<Self>, ticket: RequestTicket) {
        let this = Rc::clone(self);
        let timer = Timeout::new(self.config.debounce_ms, move || this.fetch(ticket));
        *self.debounce.borrow_mut() = Some(timer);
    }

    fn fetch(self: &Rc<Self>, ticket: RequestTicket) {
        let Some(request) = self.assistant.borrow_mut().debounce_elapsed(ticket) else {
            return;
        };

        let this = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            log::debug!("Fetching suggestions #{} for '{}'", ticket.id(), request.query);
            let result = fetch_suggestions(&this.config.suggest_url, &request.query).await;
            if let Err(e) = &result {
                log::warn!("Suggestion lookup failed: {}", e);
            }

            if this.assistant.borrow_mut().suggestions_received(ticket, result) {
                this.render();
            }
        });
    }

    fn on_submit(&self) {
        if let Err(e) = self.assistant.borrow_mut().submit(&self.input.value()) {
            log::warn!("Failed to save search history: {}", e);
        }
    }

    fn on_document_click(&self, event: &Event) {
        if !self.assistant.borrow().is_open() {
            return;
        }
        let inside: [&Element; 2] = [&self.input, &self.container];
        if event_within(event, &inside) {
            return;
        }

        self.assistant.borrow_mut().dismiss();
        self.render();
    }

    fn on_panel_click(&self, event: &Event) {
        if closest(event, CLEAR_SELECTOR).is_some() {
            self.clear_history(event);
            return;
        }

        let value = closest(event, ITEM_SELECTOR).and_then(|row| row.get_attribute(VALUE_ATTRIBUTE));
        if let Some(value) = value {
            self.select(&value);
        }
    }

    fn select(&self, text: &str) {
        let picked = self.assistant.borrow_mut().select(text);
        let text = picked.unwrap_or_else(|e| {
            log::warn!("Failed to save search history: {}", e);
            text.to_string()
        });

        self.input.set_value(&text);
        self.render();

        // Native submit: no submit event, so history is not written twice.
        if let Err(e) = self.form.submit() {
            log::warn!("Failed to submit search form: {:?}", e);
        }
    }

    fn clear_history(&self, event: &Event) {
        event.stop_propagation();

        if let Err(e) = self.assistant.borrow_mut().clear_history() {
            log::warn!("Failed to clear search history: {}", e);
        }
        self.render();
    }

    fn render(&self) {
        let panel = self.panel();
        let rendered = match &panel {
            Panel::Hidden => Ok(()),
            Panel::History(entries) => self.render_history(entries),
            Panel::Suggestions(items) => self.render_suggestions(items),
        };

        if let Err(e) = rendered {
            log::warn!("Failed to render search panel: {:?}", e);
        }

        let display = if panel.is_open() { "block" } else { "none" };
        if let Err(e) = self.container.style().set_property("display", display) {
            log::debug!("Failed to set search panel display: {:?}", e);
        }
    }

    fn render_history(&self, entries: &[String]) -> Result<(), JsValue> {
        self.container.set_inner_html("");

        let header = self.element("div", "history-header", HEADER_STYLE)?;
        let label = self.element("span", "history-label", HEADER_LABEL_STYLE)?;
        label.set_text_content(Some(&self.config.history_label));
        header.append_child(&label)?;

        let clear = self.element("button", "history-clear", CLEAR_BUTTON_STYLE)?;
        clear.set_attribute("type", "button")?;
        clear.set_text_content(Some(&self.config.clear_label));
        header.append_child(&clear)?;
        self.container.append_child(&header)?;

        for entry in entries {
            let row = self.element("div", "history-item", HISTORY_ITEM_STYLE)?;
            let icon = self.element("span", "history-icon", HISTORY_ICON_STYLE)?;
            icon.set_text_content(Some("🕐"));
            row.append_child(&icon)?;

            let text = self.document.create_element("span")?;
            text.set_text_content(Some(entry));
            row.append_child(&text)?;

            row.set_attribute(VALUE_ATTRIBUTE, entry)?;
            self.container.append_child(&row)?;
        }

        Ok(())
    }

    fn render_suggestions(&self, items: &[String]) -> Result<(), JsValue> {
        self.container.set_inner_html("");

        for item in items {
            let row = self.element("div", "suggestion-item", SUGGESTION_ITEM_STYLE)?;
            row.set_text_content(Some(item));
            row.set_attribute(VALUE_ATTRIBUTE, item)?;
            self.container.append_child(&row)?;
        }

        Ok(())
    }

    fn element(&self, tag: &str, class: &str, style: &str) -> Result<HtmlElement, JsValue> {
        let el = self.document.create_element(tag)?.dyn_into::<HtmlElement>()?;
        el.set_class_name(class);
        el.style().set_css_text(style);
        Ok(el)
    }
}

fn create_container(
    document: &Document,
    input: &HtmlInputElement,
) -> Result<HtmlElement, JsValue> {
    let container = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    container.set_class_name("suggestions-container");
    container.style().set_css_text(CONTAINER_STYLE);

    let parent: Element = input
        .parent_element()
        .ok_or_else(|| JsValue::from_str("search box has no parent element"))?;
    if let Some(parent) = parent.dyn_ref::<HtmlElement>() {
        parent.style().set_property("position", "relative")?;
    }
    parent.append_child(&container)?;

    Ok(container)
}

/// Nearest ancestor of the event target (inclusive) matching `selector`.
fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
}

fn set_row_background(event: &Event, background: &str) {
    let row = closest(event, ITEM_SELECTOR).and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(row) = row {
        if let Err(e) = row.style().set_property("background", background) {
            log::debug!("Failed to set row background: {:?}", e);
        }
    }
}
