//! PanelGrip Core Library
//!
//! Platform-agnostic drag-resize engine: edge bars on a target element,
//! clamped live resizing, and optional size persistence.

pub mod bars;
pub mod config;
pub mod direction;
pub mod host;
pub mod panel;
pub mod persist;
pub mod session;
pub mod storage;

pub use bars::{Bar, BarManager, ReconcileError};
pub use config::{
    AdjustOptions, ConfigError, Constraints, PersistAxis, Persistence, Position, Prop,
    ResolvedOptions, clamp_extent,
};
pub use direction::{Axis, CURSOR_ATTR, DIRECTION_ATTR, Direction, DirectionSet, Directions};
pub use host::{Element, EventKind, Handler, Host, HostError, PointerEvent};
pub use panel::{AdjustError, AdjustPanel};
pub use persist::{PersistError, PersistedSize};
pub use session::{DragOrigin, DragSession};
pub use storage::{KeyValueStore, MemoryStore, StorageError, StorageResult};
