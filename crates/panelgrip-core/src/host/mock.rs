//! Recording host used by unit tests.

use super::{Element, EventKind, Handler, Host, HostError, PointerEvent, parse_px};
use kurbo::{Point, Size};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct Node {
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    children: Vec<MockElement>,
    parent: Option<Weak<RefCell<Node>>>,
}

/// An in-memory element.
#[derive(Debug, Clone, Default)]
pub struct MockElement(Rc<RefCell<Node>>);

impl PartialEq for MockElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl MockElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn children(&self) -> Vec<MockElement> {
        self.0.borrow().children.clone()
    }

    /// Children carrying `attr`, with its value.
    pub fn tagged_children(&self, attr: &str) -> Vec<(String, MockElement)> {
        self.children()
            .into_iter()
            .filter_map(|child| child.attribute(attr).map(|v| (v, child)))
            .collect()
    }
}

impl Element for MockElement {
    fn set_style(&self, property: &str, value: &str) {
        self.0.borrow_mut().styles.insert(property.to_string(), value.to_string());
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0.borrow_mut().attributes.insert(name.to_string(), value.to_string());
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn append_child(&self, child: &Self) -> Result<(), HostError> {
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child.clone());
        Ok(())
    }

    fn remove(&self) {
        let parent = self.0.borrow_mut().parent.take();
        if let Some(parent) = parent.and_then(|p| p.upgrade()) {
            parent.borrow_mut().children.retain(|c| !Rc::ptr_eq(&c.0, &self.0));
        }
    }
}

/// A pointer event fed to handlers by tests.
#[derive(Debug)]
pub struct MockEvent {
    pub position: Point,
    pub target: Option<MockElement>,
    pub prevented: Cell<bool>,
}

impl MockEvent {
    pub fn new(position: Point, target: Option<MockElement>) -> Self {
        Self {
            position,
            target,
            prevented: Cell::new(false),
        }
    }
}

impl PointerEvent for MockEvent {
    type Element = MockElement;

    fn position(&self) -> Point {
        self.position
    }

    fn target(&self) -> Option<MockElement> {
        self.target.clone()
    }

    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

enum Source {
    Element(MockElement),
    Global,
}

struct Listener {
    id: u64,
    source: Source,
    kind: EventKind,
    handler: Handler<MockEvent>,
}

#[derive(Default)]
struct HostState {
    listeners: Vec<Listener>,
    next_id: u64,
    cursor: String,
    created: usize,
    /// Number of elements that may still be created; unlimited when `None`.
    creation_budget: Option<usize>,
}

/// Host backed by in-memory elements and manual dispatch.
#[derive(Clone, Default)]
pub struct MockHost {
    state: Rc<RefCell<HostState>>,
}

/// Removes its listener from the mock host on drop.
pub struct MockSubscription {
    state: Weak<RefCell<HostState>>,
    id: u64,
}

impl Drop for MockSubscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().listeners.retain(|l| l.id != self.id);
        }
    }
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> String {
        self.state.borrow().cursor.clone()
    }

    pub fn global_listener_count(&self) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|l| matches!(l.source, Source::Global))
            .count()
    }

    pub fn element_listener_count(&self) -> usize {
        self.state.borrow().listeners.len() - self.global_listener_count()
    }

    pub fn created_count(&self) -> usize {
        self.state.borrow().created
    }

    /// Make `create_element` fail once `count` more elements exist.
    pub fn fail_creation_after(&self, count: usize) {
        self.state.borrow_mut().creation_budget = Some(count);
    }

    /// Dispatch to listeners on `element`. Returns the event for inspection.
    pub fn dispatch(&self, element: &MockElement, kind: EventKind, position: Point) -> MockEvent {
        let event = MockEvent::new(position, Some(element.clone()));
        let handlers = self.handlers(kind, |source| {
            matches!(source, Source::Element(e) if e == element)
        });
        for handler in handlers {
            handler(&event);
        }
        event
    }

    /// Dispatch to global listeners with an explicit target.
    pub fn dispatch_global(
        &self,
        kind: EventKind,
        position: Point,
        target: Option<&MockElement>,
    ) -> MockEvent {
        let event = MockEvent::new(position, target.cloned());
        let handlers = self.handlers(kind, |source| matches!(source, Source::Global));
        for handler in handlers {
            handler(&event);
        }
        event
    }

    fn handlers(
        &self,
        kind: EventKind,
        matches: impl Fn(&Source) -> bool,
    ) -> Vec<Handler<MockEvent>> {
        // Collect first so handlers may subscribe or unsubscribe while running
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind && matches(&l.source))
            .map(|l| Rc::clone(&l.handler))
            .collect()
    }

    fn subscribe(
        &self,
        source: Source,
        kind: EventKind,
        handler: Handler<MockEvent>,
    ) -> MockSubscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push(Listener {
            id,
            source,
            kind,
            handler,
        });
        MockSubscription {
            state: Rc::downgrade(&self.state),
            id,
        }
    }
}

impl Host for MockHost {
    type Element = MockElement;
    type Event = MockEvent;
    type Subscription = MockSubscription;

    fn create_element(&self) -> Result<MockElement, HostError> {
        let mut state = self.state.borrow_mut();
        if let Some(budget) = state.creation_budget.as_mut() {
            if *budget == 0 {
                return Err(HostError("element creation refused".to_string()));
            }
            *budget -= 1;
        }
        state.created += 1;
        Ok(MockElement::new())
    }

    fn listen(
        &self,
        element: &MockElement,
        kind: EventKind,
        handler: Handler<MockEvent>,
    ) -> Result<MockSubscription, HostError> {
        Ok(self.subscribe(
            Source::Element(element.clone()),
            kind,
            handler,
        ))
    }

    fn listen_global(
        &self,
        kind: EventKind,
        handler: Handler<MockEvent>,
    ) -> Result<MockSubscription, HostError> {
        Ok(self.subscribe(Source::Global, kind, handler))
    }

    fn set_global_cursor(&self, cursor: &str) {
        self.state.borrow_mut().cursor = cursor.to_string();
    }

    fn observed_size(&self, element: &MockElement) -> Size {
        // Rendered size follows the inline style, as in a layout without padding
        let read = |prop: &str| element.style(prop).as_deref().and_then(parse_px).unwrap_or(0.0);
        Size::new(read("width"), read("height"))
    }
}
