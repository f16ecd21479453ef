//! DOM implementation of the engine host.

use kurbo::{Point, Size};
use panelgrip_core::host::parse_px;
use panelgrip_core::{Element, EventKind, Handler, Host, HostError, PointerEvent};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlElement, MouseEvent, Window};

/// An HTML element driven by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement(pub HtmlElement);

impl Element for DomElement {
    fn set_style(&self, property: &str, value: &str) {
        if let Err(e) = self.0.style().set_property(property, value) {
            log::warn!("Failed to set style {}: {:?}", property, e);
        }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = self.0.set_attribute(name, value) {
            log::warn!("Failed to set attribute {}: {:?}", name, e);
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn append_child(&self, child: &Self) -> Result<(), HostError> {
        self.0
            .append_child(&child.0)
            .map(|_| ())
            .map_err(|e| HostError(format!("appendChild failed: {:?}", e)))
    }

    fn remove(&self) {
        self.0.remove();
    }
}

/// A mouse event from the DOM.
pub struct DomEvent(Event);

impl PointerEvent for DomEvent {
    type Element = DomElement;

    fn position(&self) -> Point {
        self.0
            .dyn_ref::<MouseEvent>()
            .map(|m| Point::new(m.client_x() as f64, m.client_y() as f64))
            .unwrap_or(Point::ZERO)
    }

    fn target(&self) -> Option<DomElement> {
        self.0
            .target()?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(DomElement)
    }

    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// An installed event listener. Dropping it removes the listener.
pub struct DomListener {
    target: EventTarget,
    event: &'static str,
    closure: Option<Closure<dyn FnMut(Event)>>,
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let Some(closure) = self.closure.take() else {
            return;
        };
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove {} listener: {:?}", self.event, e);
        }
        // The session ends from inside its own listener; free the closure
        // after the current dispatch has returned.
        wasm_bindgen_futures::spawn_local(async move {
            drop(closure);
        });
    }
}

/// The browser document as an engine host.
#[derive(Debug, Clone)]
pub struct DomHost {
    window: Window,
    document: Document,
}

impl DomHost {
    pub fn new() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or_else(|| HostError("No window object".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| HostError("No document".to_string()))?;
        Ok(Self { window, document })
    }

    fn subscribe(
        target: EventTarget,
        event: &'static str,
        handler: Handler<DomEvent>,
    ) -> Result<DomListener, HostError> {
        let closure =
            Closure::<dyn FnMut(Event)>::new(move |event: Event| handler(&DomEvent(event)));
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| HostError(format!("addEventListener({}) failed: {:?}", event, e)))?;
        Ok(DomListener {
            target,
            event,
            closure: Some(closure),
        })
    }
}

fn event_name(kind: EventKind) -> &'static str {
    match kind {
        EventKind::PointerDown => "mousedown",
        EventKind::PointerMove => "mousemove",
        EventKind::PointerUp => "mouseup",
        EventKind::FocusLost => "blur",
    }
}

impl Host for DomHost {
    type Element = DomElement;
    type Event = DomEvent;
    type Subscription = DomListener;

    fn create_element(&self) -> Result<DomElement, HostError> {
        let element = self
            .document
            .create_element("div")
            .map_err(|e| HostError(format!("createElement failed: {:?}", e)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| HostError("Created element is not an HtmlElement".to_string()))?;
        Ok(DomElement(element))
    }

    fn listen(
        &self,
        element: &DomElement,
        kind: EventKind,
        handler: Handler<DomEvent>,
    ) -> Result<DomListener, HostError> {
        Self::subscribe(element.0.clone().into(), event_name(kind), handler)
    }

    fn listen_global(
        &self,
        kind: EventKind,
        handler: Handler<DomEvent>,
    ) -> Result<DomListener, HostError> {
        // Focus changes are reported on the window, pointer events on the document
        let target: EventTarget = match kind {
            EventKind::FocusLost => self.window.clone().into(),
            _ => self.document.clone().into(),
        };
        Self::subscribe(target, event_name(kind), handler)
    }

    fn set_global_cursor(&self, cursor: &str) {
        let Some(body) = self.document.body() else {
            return;
        };
        if let Err(e) = body.style().set_property("cursor", cursor) {
            log::warn!("Failed to set body cursor: {:?}", e);
        }
    }

    fn observed_size(&self, element: &DomElement) -> Size {
        let computed = self.window.get_computed_style(&element.0).ok().flatten();
        let read = |property: &str| {
            computed
                .as_ref()
                .and_then(|style| style.get_property_value(property).ok())
                .as_deref()
                .and_then(parse_px)
        };
        match (read("width"), read("height")) {
            (Some(width), Some(height)) => Size::new(width, height),
            _ => {
                let rect = element.0.get_bounding_client_rect();
                Size::new(rect.width(), rect.height())
            }
        }
    }
}
