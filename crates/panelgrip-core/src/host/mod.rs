//! The environment the engine drives.
//!
//! A host owns element creation, event delivery, the global cursor and
//! size observation. The browser binding implements it over the DOM;
//! tests use the recording host in `mock`.

#[cfg(test)]
pub(crate) mod mock;

use kurbo::{Point, Size};
use std::rc::Rc;
use thiserror::Error;

/// Host failures (element creation, listener installation).
#[derive(Debug, Clone, Error)]
#[error("Host error: {0}")]
pub struct HostError(pub String);

/// Events the engine listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Button pressed on an element.
    PointerDown,
    /// Pointer moved anywhere in the document.
    PointerMove,
    /// Button released anywhere in the document.
    PointerUp,
    /// The window lost input focus.
    FocusLost,
}

/// A styled element the engine can mutate.
pub trait Element: Clone + 'static {
    /// Set an inline style property (CSS name, e.g. `min-width`).
    fn set_style(&self, property: &str, value: &str);

    fn set_attribute(&self, name: &str, value: &str);

    fn attribute(&self, name: &str) -> Option<String>;

    fn append_child(&self, child: &Self) -> Result<(), HostError>;

    /// Detach this element from its parent.
    fn remove(&self);
}

/// A pointer event as delivered by the host.
pub trait PointerEvent {
    type Element: Element;

    /// Pointer position in viewport coordinates.
    fn position(&self) -> Point;

    /// The element the event was dispatched to.
    fn target(&self) -> Option<Self::Element>;

    /// Suppress the default action (text selection, native drag).
    fn prevent_default(&self);
}

/// Event callback.
pub type Handler<E> = Rc<dyn Fn(&E)>;

/// The environment: element factory, event source, cursor and size observer.
pub trait Host: Clone + 'static {
    type Element: Element;
    type Event: PointerEvent<Element = Self::Element> + 'static;
    /// Removes its listener when dropped.
    type Subscription: 'static;

    fn create_element(&self) -> Result<Self::Element, HostError>;

    /// Listen for `kind` on a single element.
    fn listen(
        &self,
        element: &Self::Element,
        kind: EventKind,
        handler: Handler<Self::Event>,
    ) -> Result<Self::Subscription, HostError>;

    /// Listen for `kind` regardless of which element the pointer is over.
    fn listen_global(
        &self,
        kind: EventKind,
        handler: Handler<Self::Event>,
    ) -> Result<Self::Subscription, HostError>;

    /// Override the document cursor. An empty string restores the default.
    fn set_global_cursor(&self, cursor: &str);

    /// The element's current rendered content size.
    fn observed_size(&self, element: &Self::Element) -> Size;
}

/// Format a pixel length for a style value.
pub fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Parse a `"<n>px"` style value.
pub fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}
