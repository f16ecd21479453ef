//! Creation and teardown of the resize bars on a target.

use crate::config::ResolvedOptions;
use crate::direction::{Axis, CURSOR_ATTR, DIRECTION_ATTR, Direction};
use crate::host::{Element, EventKind, Handler, Host, HostError, px};
use crate::persist::{self, PersistError, PersistedSize};
use crate::session::write_extent;
use thiserror::Error;

/// Errors raised while reconciling bars.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// One live bar.
pub struct Bar<H: Host> {
    pub direction: Direction,
    pub element: H::Element,
    pub cursor: String,
    _listener: H::Subscription,
}

/// Owns the bars of one target.
pub struct BarManager<H: Host> {
    bars: Vec<Bar<H>>,
}

impl<H: Host> Default for BarManager<H> {
    fn default() -> Self {
        Self { bars: Vec::new() }
    }
}

impl<H: Host> BarManager<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bars(&self) -> &[Bar<H>] {
        &self.bars
    }

    /// Directions of the live bars, in creation order.
    pub fn directions(&self) -> Vec<Direction> {
        self.bars.iter().map(|b| b.direction).collect()
    }

    /// Remove every bar element and its listener.
    pub fn teardown(&mut self) {
        for bar in self.bars.drain(..) {
            bar.element.remove();
        }
    }

    /// Rebuild all bars on `target` from `resolved`.
    ///
    /// The persisted record is read before anything is touched, so a
    /// corrupt record leaves the target as it was. `on_pointer_down`
    /// builds the pointer-down handler for each bar.
    pub fn reconcile(
        &mut self,
        host: &H,
        target: &H::Element,
        resolved: &ResolvedOptions,
        on_pointer_down: impl Fn(Direction) -> Handler<H::Event>,
    ) -> Result<(), ReconcileError> {
        let persisted = match &resolved.persistence {
            Some(p) => persist::load(p.store.as_ref(), &p.key)?,
            None => None,
        };

        self.teardown();
        apply_initial_size(target, resolved, persisted.as_ref());
        target.set_style("position", resolved.position.as_str());

        for direction in resolved.directions.iter() {
            if let Err(e) = self.add_bar(host, target, direction, resolved, &on_pointer_down) {
                // Never leave a partial set behind
                self.teardown();
                return Err(e.into());
            }
        }

        log::debug!("Reconciled resize bars: {:?}", self.directions());
        Ok(())
    }

    fn add_bar(
        &mut self,
        host: &H,
        target: &H::Element,
        direction: Direction,
        resolved: &ResolvedOptions,
        on_pointer_down: &impl Fn(Direction) -> Handler<H::Event>,
    ) -> Result<(), HostError> {
        let element = host.create_element()?;
        let cursor = style_bar(&element, direction, resolved);
        target.append_child(&element)?;
        let handler = on_pointer_down(direction);
        let listener = match host.listen(&element, EventKind::PointerDown, handler) {
            Ok(listener) => listener,
            Err(e) => {
                element.remove();
                return Err(e);
            }
        };
        self.bars.push(Bar {
            direction,
            element,
            cursor,
            _listener: listener,
        });
        Ok(())
    }
}

impl<H: Host> Drop for BarManager<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Min sizes, then defaults, then persisted values; later writes win.
fn apply_initial_size<E: Element>(
    target: &E,
    resolved: &ResolvedOptions,
    persisted: Option<&PersistedSize>,
) {
    if let Some(min_width) = resolved.constraints.min_width {
        write_extent(target, Axis::Horizontal, min_width);
    }
    if let Some(min_height) = resolved.constraints.min_height {
        write_extent(target, Axis::Vertical, min_height);
    }
    if let Some(width) = resolved.default_width {
        target.set_style("width", &px(width));
    }
    if let Some(height) = resolved.default_height {
        target.set_style("height", &px(height));
    }
    if let Some(record) = persisted {
        if let Some(width) = record.usable_width() {
            write_extent(target, Axis::Horizontal, width);
        }
        if let Some(height) = record.usable_height() {
            write_extent(target, Axis::Vertical, height);
        }
    }
}

/// Apply geometry, cursor and identity tags. Returns the cursor used.
fn style_bar<E: Element>(bar: &E, direction: Direction, resolved: &ResolvedOptions) -> String {
    let spec = direction.spec();
    let thickness = px(resolved.bar_size);
    let cursor = resolved.cursor(spec.axis).to_string();

    match spec.axis {
        Axis::Vertical => {
            bar.set_style("width", "100%");
            bar.set_style("height", &thickness);
        }
        Axis::Horizontal => {
            bar.set_style("width", &thickness);
            bar.set_style("height", "100%");
        }
    }
    bar.set_style("position", "absolute");
    bar.set_style(spec.edge, &px(-resolved.bar_size / 2.0));
    bar.set_style(spec.anchor, "0");
    bar.set_style("z-index", &resolved.bar_index.to_string());
    bar.set_style("cursor", &cursor);
    bar.set_attribute(DIRECTION_ATTR, direction.as_str());
    bar.set_attribute(CURSOR_ATTR, &cursor);
    cursor
}
