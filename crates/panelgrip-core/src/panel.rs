//! The public entry point: a target with resize bars attached.

use crate::bars::{BarManager, ReconcileError};
use crate::config::{AdjustOptions, ConfigError, PersistAxis, ResolvedOptions};
use crate::direction::{DIRECTION_ATTR, Direction, DirectionSet, Directions};
use crate::host::{Element, EventKind, Handler, Host, HostError, PointerEvent};
use crate::persist::{self, PersistError, PersistedSize};
use crate::session::{CursorOverride, DragOrigin, DragSession, write_extent};
use kurbo::Point;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use thiserror::Error;

/// Errors surfaced to the caller of setup, reconcile and persistence.
#[derive(Debug, Error)]
pub enum AdjustError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Host(#[from] HostError),
}

impl From<ReconcileError> for AdjustError {
    fn from(err: ReconcileError) -> Self {
        match err {
            ReconcileError::Persist(e) => Self::Persist(e),
            ReconcileError::Host(e) => Self::Host(e),
        }
    }
}

/// A resizable target.
///
/// Dropping the panel removes its bars and ends any live drag.
pub struct AdjustPanel<H: Host> {
    inner: Rc<PanelInner<H>>,
}

struct PanelInner<H: Host> {
    host: H,
    target: H::Element,
    options: RefCell<AdjustOptions>,
    bars: RefCell<BarManager<H>>,
    session: RefCell<Option<DragSession<H>>>,
    /// Direction set the current bars were built from.
    applied: RefCell<Option<DirectionSet>>,
}

impl<H: Host> AdjustPanel<H> {
    /// Attach bars to `target`.
    ///
    /// Fails before any bar is created if persistence is enabled without a
    /// key, and fails without touching the target if the persisted record
    /// is corrupt.
    pub fn mount(host: H, target: H::Element, options: AdjustOptions) -> Result<Self, AdjustError> {
        let mut options = options;
        options.ensure_storage()?;

        let panel = Self {
            inner: Rc::new(PanelInner {
                host,
                target,
                options: RefCell::new(options),
                bars: RefCell::new(BarManager::new()),
                session: RefCell::new(None),
                applied: RefCell::new(None),
            }),
        };
        panel.inner.reconcile()?;
        Ok(panel)
    }

    /// Tear down and rebuild every bar from the current options.
    pub fn reconcile(&self) -> Result<(), AdjustError> {
        self.inner.reconcile()
    }

    /// Rebuild the bars if the resolved direction set changed.
    ///
    /// Call when a dynamic `directions` getter may yield a new value.
    /// Returns whether a reconcile happened.
    pub fn sync(&self) -> Result<bool, AdjustError> {
        let directions = {
            let options = self.inner.options.borrow();
            options.validate()?;
            options
                .directions
                .get()
                .and_then(|d| DirectionSet::normalize(&d))
                .ok_or(ConfigError::EmptyDirections)?
        };
        if self.inner.applied.borrow().as_ref() == Some(&directions) {
            return Ok(false);
        }
        self.inner.reconcile()?;
        Ok(true)
    }

    /// Replace the requested directions and rebuild if they changed.
    pub fn set_directions(&self, directions: impl Into<Directions>) -> Result<bool, AdjustError> {
        let directions = directions.into();
        self.update_options(move |options| options.directions = directions.into())
    }

    /// Edit the options in place. The edit is discarded if the result is
    /// invalid. Bars are rebuilt only when the direction set changed;
    /// every other option is read live.
    pub fn update_options(
        &self,
        edit: impl FnOnce(&mut AdjustOptions),
    ) -> Result<bool, AdjustError> {
        let mut options = self.inner.options.borrow().clone();
        edit(&mut options);
        options.ensure_storage()?;
        *self.inner.options.borrow_mut() = options;
        self.sync()
    }

    /// Whether a drag session is active.
    pub fn is_dragging(&self) -> bool {
        self.inner.session.borrow().is_some()
    }

    /// Directions of the live bars.
    pub fn bar_directions(&self) -> Vec<Direction> {
        self.inner.bars.borrow().directions()
    }

    /// Live bar elements with their directions.
    pub fn bar_elements(&self) -> Vec<(Direction, H::Element)> {
        self.inner
            .bars
            .borrow()
            .bars()
            .iter()
            .map(|b| (b.direction, b.element.clone()))
            .collect()
    }

    pub fn target(&self) -> &H::Element {
        &self.inner.target
    }

    /// Load the persisted record, if persistence is enabled.
    pub fn persisted(&self) -> Result<Option<PersistedSize>, AdjustError> {
        let Some(p) = self.inner.options.borrow().persistence()? else {
            return Ok(None);
        };
        Ok(persist::load(p.store.as_ref(), &p.key)?)
    }

    /// Remove the persisted record, if persistence is enabled.
    pub fn clear_persisted(&self) -> Result<(), AdjustError> {
        if let Some(p) = self.inner.options.borrow().persistence()? {
            persist::clear(p.store.as_ref(), &p.key)?;
        }
        Ok(())
    }
}

impl<H: Host> PanelInner<H> {
    fn reconcile(self: &Rc<Self>) -> Result<(), AdjustError> {
        let resolved = ResolvedOptions::resolve(&self.options.borrow())?;
        let weak = Rc::downgrade(self);
        let result = self
            .bars
            .borrow_mut()
            .reconcile(&self.host, &self.target, &resolved, |direction| {
                pointer_down_handler(weak.clone(), direction)
            });
        match result {
            Ok(()) => {
                *self.applied.borrow_mut() = Some(resolved.directions);
                Ok(())
            }
            Err(ReconcileError::Host(e)) => {
                // The bars were torn down; the next sync rebuilds them
                *self.applied.borrow_mut() = None;
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Idle -> Dragging.
    fn begin_drag(self: &Rc<Self>, bar_direction: Direction, event: &H::Event) {
        if self.session.borrow().is_some() {
            log::debug!("Ignoring pointer-down on {} bar: drag already active", bar_direction);
            return;
        }
        event.prevent_default();

        let pointer = event.position();
        let size = self.host.observed_size(&self.target);
        let direction = event
            .target()
            .and_then(|t| t.attribute(DIRECTION_ATTR))
            .and_then(|tag| tag.parse().ok())
            .unwrap_or(bar_direction);
        let origin = DragOrigin::new(direction, pointer, size);

        let cursor = self.options.borrow().cursor(direction.axis());
        let cursor = CursorOverride::acquire(self.host.clone(), &cursor);

        let listeners = match self.install_drag_listeners() {
            Ok(listeners) => listeners,
            Err(e) => {
                log::error!("Failed to start resize drag: {}", e);
                return;
            }
        };

        log::debug!("Drag started on {} bar at {:?}, size {:?}", direction, pointer, size);
        *self.session.borrow_mut() = Some(DragSession::new(origin, cursor, listeners));
    }

    fn install_drag_listeners(self: &Rc<Self>) -> Result<Vec<H::Subscription>, HostError> {
        let weak = Rc::downgrade(self);

        let on_move: Handler<H::Event> = Rc::new({
            let weak = weak.clone();
            move |event: &H::Event| {
                if let Some(inner) = weak.upgrade() {
                    inner.drag_to(event.position());
                }
            }
        });
        let on_up: Handler<H::Event> = Rc::new({
            let weak = weak.clone();
            move |event: &H::Event| {
                if let Some(inner) = weak.upgrade() {
                    inner.end_drag(event.target());
                }
            }
        });
        // Ends a session whose release never arrives
        let on_focus_lost: Handler<H::Event> = Rc::new(move |_: &H::Event| {
            if let Some(inner) = weak.upgrade() {
                log::debug!("Focus lost during drag; ending session");
                inner.end_drag(None);
            }
        });

        Ok(vec![
            self.host.listen_global(EventKind::PointerMove, on_move)?,
            self.host.listen_global(EventKind::PointerUp, on_up)?,
            self.host.listen_global(EventKind::FocusLost, on_focus_lost)?,
        ])
    }

    /// One synchronous write per move event.
    fn drag_to(&self, pointer: Point) {
        let Some(origin) = self.session.borrow().as_ref().map(|s| *s.origin()) else {
            return;
        };
        let constraints = self.options.borrow().constraints();
        let extent = origin.extent(pointer, &constraints);
        write_extent(&self.target, origin.direction.axis(), extent);
        log::trace!("Resized {} to {}", origin.direction, extent);
    }

    /// Dragging -> Idle.
    fn end_drag(&self, release_target: Option<H::Element>) {
        let Some(session) = self.session.borrow_mut().take() else {
            return;
        };
        let origin = *session.origin();
        // Restores the cursor and removes the document listeners
        drop(session);

        let release_direction = release_target
            .and_then(|t| t.attribute(DIRECTION_ATTR))
            .and_then(|tag| tag.parse::<Direction>().ok());

        match self.persist_release(origin.direction, release_direction) {
            Ok(Some(record)) => {
                log::debug!("Drag ended on {} bar; saved {:?}", origin.direction, record)
            }
            Ok(None) => log::debug!("Drag ended on {} bar", origin.direction),
            Err(e) => log::error!("Failed to persist panel size: {}", e),
        }
    }

    fn persist_release(
        &self,
        drag_direction: Direction,
        release_direction: Option<Direction>,
    ) -> Result<Option<PersistedSize>, AdjustError> {
        let options = self.options.borrow();
        let Some(persistence) = options.persistence()? else {
            return Ok(None);
        };

        let axis = match options.persist_axis {
            PersistAxis::DragOrigin => Some(drag_direction.axis()),
            PersistAxis::ReleaseTarget => release_direction.map(Direction::axis),
        };
        let size = self.host.observed_size(&self.target);
        let record = axis
            .map(|axis| PersistedSize::for_axis(axis, size))
            .unwrap_or_default();

        persist::save(persistence.store.as_ref(), &persistence.key, &record)?;
        Ok(Some(record))
    }
}

impl<H: Host> Drop for PanelInner<H> {
    fn drop(&mut self) {
        *self.session.get_mut() = None;
        self.bars.get_mut().teardown();
    }
}

fn pointer_down_handler<H: Host>(
    weak: Weak<PanelInner<H>>,
    direction: Direction,
) -> Handler<H::Event> {
    Rc::new(move |event: &H::Event| {
        if let Some(inner) = weak.upgrade() {
            inner.begin_drag(direction, event);
        }
    })
}
