//! Drag session state: origin capture, live extent computation and the
//! guards that exist only while a bar is held.

use crate::config::Constraints;
use crate::direction::{Axis, Direction};
use crate::host::{Element, Host, px};
use kurbo::{Point, Size, Vec2};

/// Where a drag started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    /// Edge being dragged.
    pub direction: Direction,
    /// Pointer position at pointer-down.
    pub pointer: Point,
    /// Observed target size at pointer-down.
    pub size: Size,
}

impl DragOrigin {
    pub fn new(direction: Direction, pointer: Point, size: Size) -> Self {
        Self {
            direction,
            pointer,
            size,
        }
    }

    /// Pointer movement since the drag started.
    pub fn delta(&self, pointer: Point) -> Vec2 {
        pointer - self.pointer
    }

    /// Clamped extent along the dragged axis for the given pointer position.
    ///
    /// Dragging the top or left edge toward the origin grows the target,
    /// so those directions negate the delta.
    pub fn extent(&self, pointer: Point, constraints: &Constraints) -> f64 {
        let spec = self.direction.spec();
        let delta = self.delta(pointer);
        let (start, moved) = match spec.axis {
            Axis::Horizontal => (self.size.width, delta.x),
            Axis::Vertical => (self.size.height, delta.y),
        };
        constraints.clamp(spec.axis, start + spec.sign * moved)
    }
}

/// Write `extent` to both the size and the minimum size on `axis`.
pub fn write_extent<E: Element>(target: &E, axis: Axis, extent: f64) {
    let value = px(extent);
    match axis {
        Axis::Horizontal => {
            target.set_style("min-width", &value);
            target.set_style("width", &value);
        }
        Axis::Vertical => {
            target.set_style("min-height", &value);
            target.set_style("height", &value);
        }
    }
}

/// Global cursor override, restored to the default when dropped.
pub struct CursorOverride<H: Host> {
    host: H,
}

impl<H: Host> CursorOverride<H> {
    pub fn acquire(host: H, cursor: &str) -> Self {
        host.set_global_cursor(cursor);
        Self { host }
    }
}

impl<H: Host> Drop for CursorOverride<H> {
    fn drop(&mut self) {
        self.host.set_global_cursor("");
    }
}

/// A live drag. Dropping it restores the cursor and removes the
/// document-level listeners.
pub struct DragSession<H: Host> {
    origin: DragOrigin,
    _cursor: CursorOverride<H>,
    _listeners: Vec<H::Subscription>,
}

impl<H: Host> DragSession<H> {
    pub fn new(
        origin: DragOrigin,
        cursor: CursorOverride<H>,
        listeners: Vec<H::Subscription>,
    ) -> Self {
        Self {
            origin,
            _cursor: cursor,
            _listeners: listeners,
        }
    }

    pub fn origin(&self) -> &DragOrigin {
        &self.origin
    }
}
