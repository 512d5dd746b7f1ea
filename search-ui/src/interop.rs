use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, Node};

/// Attach `handler` to `event` on `target` for the rest of the page's life.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;

    // The page never detaches these, so leak the closure to keep it callable.
    closure.forget();
    Ok(())
}

/// Run `init` once the DOM is parsed.
pub fn on_dom_ready(document: &Document, init: impl FnOnce(&Document) + 'static) {
    if document.ready_state() != "loading" {
        init(document);
        return;
    }

    let doc = document.clone();
    let mut init = Some(init);
    let wired = listen(document, "DOMContentLoaded", move |_| {
        if let Some(init) = init.take() {
            init(&doc);
        }
    });

    if let Err(e) = wired {
        log::error!("Failed to wait for DOMContentLoaded: {:?}", e);
    }
}

/// Whether the event's target sits inside any of `containers`.
pub fn event_within(event: &Event, containers: &[&Element]) -> bool {
    let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
    containers
        .iter()
        .any(|container| container.contains(target.as_ref()))
}
