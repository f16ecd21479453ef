//! Panel options and their resolution into concrete values.

use crate::direction::{Axis, DirectionSet, Directions};
use crate::storage::{KeyValueStore, StorageError, create_default_store};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Default bar thickness in pixels.
pub const DEFAULT_BAR_SIZE: f64 = 5.0;
/// Default bar z-index.
pub const DEFAULT_BAR_INDEX: i32 = 0;
/// Default cursor for left and right bars.
pub const DEFAULT_X_AXIS_CURSOR: &str = "ew-resize";
/// Default cursor for top and bottom bars.
pub const DEFAULT_Y_AXIS_CURSOR: &str = "ns-resize";

/// Configuration errors. Raised at setup, never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("persistKey is required when persist is true")]
    MissingPersistKey,
    #[error("At least one resize direction is required")]
    EmptyDirections,
    #[error("Default storage unavailable: {0}")]
    Storage(#[from] StorageError),
}

/// An option value: unset, fixed, or read from a getter each time it is needed.
pub enum Prop<T> {
    Unset,
    Value(T),
    Getter(Rc<dyn Fn() -> Option<T>>),
}

impl<T: Clone> Prop<T> {
    /// Wrap a getter closure.
    pub fn getter(f: impl Fn() -> Option<T> + 'static) -> Self {
        Self::Getter(Rc::new(f))
    }

    /// Read the current value.
    pub fn get(&self) -> Option<T> {
        match self {
            Self::Unset => None,
            Self::Value(v) => Some(v.clone()),
            Self::Getter(f) => f(),
        }
    }
}

impl Prop<f64> {
    /// Read a length. Zero and non-finite values count as unset.
    pub fn length(&self) -> Option<f64> {
        self.get().filter(|v| v.is_finite() && *v != 0.0)
    }
}

impl<T> Default for Prop<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Clone for Prop<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::Unset => Self::Unset,
            Self::Value(v) => Self::Value(v.clone()),
            Self::Getter(f) => Self::Getter(Rc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Prop<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Getter(_) => f.write_str("Getter(..)"),
        }
    }
}

impl<T> From<T> for Prop<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Prop<String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

/// CSS position applied to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Absolute,
    #[default]
    Relative,
    Fixed,
    Sticky,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Relative => "relative",
            Self::Fixed => "fixed",
            Self::Sticky => "sticky",
        }
    }
}

/// Which direction decides the persisted axis when a drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersistAxis {
    /// The direction the drag started from, i.e. the axis that was resized.
    #[default]
    DragOrigin,
    /// The direction tag of the element under the pointer at release.
    /// Releasing off any bar persists an empty record.
    ReleaseTarget,
}

/// Size bounds. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Constraints {
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

impl Constraints {
    /// Clamp an extent along `axis`.
    pub fn clamp(&self, axis: Axis, value: f64) -> f64 {
        match axis {
            Axis::Horizontal => clamp_extent(value, self.min_width, self.max_width),
            Axis::Vertical => clamp_extent(value, self.min_height, self.max_height),
        }
    }
}

/// Apply the floor, then the ceiling. When `min > max` the ceiling wins.
pub fn clamp_extent(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut value = value;
    if let Some(min) = min {
        if value < min {
            value = min;
        }
    }
    if let Some(max) = max {
        if value > max {
            value = max;
        }
    }
    value
}

/// Raw panel options.
///
/// Every `Prop` is read when it is needed (reconcile, drag start, each
/// move) so getters see live values.
#[derive(Clone, Default)]
pub struct AdjustOptions {
    pub directions: Prop<Directions>,
    pub default_width: Prop<f64>,
    pub default_height: Prop<f64>,
    pub min_width: Prop<f64>,
    pub min_height: Prop<f64>,
    pub max_width: Prop<f64>,
    pub max_height: Prop<f64>,
    /// Bar thickness in pixels.
    pub bar_size: Prop<f64>,
    /// Bar z-index.
    pub bar_index: Prop<i32>,
    pub persist: bool,
    pub persist_key: Option<String>,
    /// Falls back to the platform store when unset.
    pub storage: Option<Rc<dyn KeyValueStore>>,
    pub persist_axis: PersistAxis,
    /// Cursor for left and right bars.
    pub x_axis_cursor: Prop<String>,
    /// Cursor for top and bottom bars.
    pub y_axis_cursor: Prop<String>,
    pub position: Prop<Position>,
}

impl fmt::Debug for AdjustOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdjustOptions")
            .field("directions", &self.directions)
            .field("default_width", &self.default_width)
            .field("default_height", &self.default_height)
            .field("min_width", &self.min_width)
            .field("min_height", &self.min_height)
            .field("max_width", &self.max_width)
            .field("max_height", &self.max_height)
            .field("bar_size", &self.bar_size)
            .field("bar_index", &self.bar_index)
            .field("persist", &self.persist)
            .field("persist_key", &self.persist_key)
            .field("storage", &self.storage.as_ref().map(|_| ".."))
            .field("persist_axis", &self.persist_axis)
            .field("x_axis_cursor", &self.x_axis_cursor)
            .field("y_axis_cursor", &self.y_axis_cursor)
            .field("position", &self.position)
            .finish()
    }
}

impl AdjustOptions {
    /// Options with the given directions and every other value defaulted.
    pub fn new(directions: impl Into<Directions>) -> Self {
        Self {
            directions: Prop::Value(directions.into()),
            ..Self::default()
        }
    }

    pub fn with_default_width(mut self, width: impl Into<Prop<f64>>) -> Self {
        self.default_width = width.into();
        self
    }

    pub fn with_default_height(mut self, height: impl Into<Prop<f64>>) -> Self {
        self.default_height = height.into();
        self
    }

    pub fn with_min_width(mut self, width: impl Into<Prop<f64>>) -> Self {
        self.min_width = width.into();
        self
    }

    pub fn with_min_height(mut self, height: impl Into<Prop<f64>>) -> Self {
        self.min_height = height.into();
        self
    }

    pub fn with_max_width(mut self, width: impl Into<Prop<f64>>) -> Self {
        self.max_width = width.into();
        self
    }

    pub fn with_max_height(mut self, height: impl Into<Prop<f64>>) -> Self {
        self.max_height = height.into();
        self
    }

    pub fn with_bar_size(mut self, size: impl Into<Prop<f64>>) -> Self {
        self.bar_size = size.into();
        self
    }

    pub fn with_bar_index(mut self, index: impl Into<Prop<i32>>) -> Self {
        self.bar_index = index.into();
        self
    }

    /// Enable persistence under `key`.
    pub fn with_persist_key(mut self, key: impl Into<String>) -> Self {
        self.persist = true;
        self.persist_key = Some(key.into());
        self
    }

    pub fn with_storage(mut self, storage: Rc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_persist_axis(mut self, persist_axis: PersistAxis) -> Self {
        self.persist_axis = persist_axis;
        self
    }

    pub fn with_x_axis_cursor(mut self, cursor: impl Into<Prop<String>>) -> Self {
        self.x_axis_cursor = cursor.into();
        self
    }

    pub fn with_y_axis_cursor(mut self, cursor: impl Into<Prop<String>>) -> Self {
        self.y_axis_cursor = cursor.into();
        self
    }

    pub fn with_position(mut self, position: impl Into<Prop<Position>>) -> Self {
        self.position = position.into();
        self
    }

    /// Current size bounds.
    pub fn constraints(&self) -> Constraints {
        Constraints {
            min_width: self.min_width.length(),
            min_height: self.min_height.length(),
            max_width: self.max_width.length(),
            max_height: self.max_height.length(),
        }
    }

    /// Current cursor for bars on `axis`.
    pub fn cursor(&self, axis: Axis) -> String {
        match axis {
            Axis::Horizontal => self
                .x_axis_cursor
                .get()
                .unwrap_or_else(|| DEFAULT_X_AXIS_CURSOR.to_string()),
            Axis::Vertical => self
                .y_axis_cursor
                .get()
                .unwrap_or_else(|| DEFAULT_Y_AXIS_CURSOR.to_string()),
        }
    }

    /// Check the persistence settings without touching any store.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.persist && self.persist_key.is_none() {
            return Err(ConfigError::MissingPersistKey);
        }
        Ok(())
    }

    /// Pin the platform default store if persistence needs one.
    pub fn ensure_storage(&mut self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.persist && self.storage.is_none() {
            self.storage = Some(create_default_store()?);
        }
        Ok(())
    }

    /// The persistence target, if persistence is enabled.
    pub fn persistence(&self) -> Result<Option<Persistence>, ConfigError> {
        if !self.persist {
            return Ok(None);
        }
        let key = self.persist_key.clone().ok_or(ConfigError::MissingPersistKey)?;
        let store = match &self.storage {
            Some(store) => Rc::clone(store),
            None => create_default_store()?,
        };
        Ok(Some(Persistence { key, store }))
    }
}

/// Where sizes are persisted.
#[derive(Clone)]
pub struct Persistence {
    pub key: String,
    pub store: Rc<dyn KeyValueStore>,
}

impl fmt::Debug for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistence").field("key", &self.key).finish_non_exhaustive()
    }
}

/// Options with every default applied.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub directions: DirectionSet,
    pub bar_size: f64,
    pub bar_index: i32,
    pub x_axis_cursor: String,
    pub y_axis_cursor: String,
    pub position: Position,
    pub constraints: Constraints,
    pub default_width: Option<f64>,
    pub default_height: Option<f64>,
    pub persistence: Option<Persistence>,
}

impl ResolvedOptions {
    /// Resolve `options` against their current values.
    pub fn resolve(options: &AdjustOptions) -> Result<Self, ConfigError> {
        options.validate()?;

        let directions = options
            .directions
            .get()
            .and_then(|d| DirectionSet::normalize(&d))
            .ok_or(ConfigError::EmptyDirections)?;

        Ok(Self {
            directions,
            bar_size: options.bar_size.get().unwrap_or(DEFAULT_BAR_SIZE),
            bar_index: options.bar_index.get().unwrap_or(DEFAULT_BAR_INDEX),
            x_axis_cursor: options.cursor(Axis::Horizontal),
            y_axis_cursor: options.cursor(Axis::Vertical),
            position: options.position.get().unwrap_or_default(),
            constraints: options.constraints(),
            default_width: options.default_width.length(),
            default_height: options.default_height.length(),
            persistence: options.persistence()?,
        })
    }

    /// Resolved cursor for bars on `axis`.
    pub fn cursor(&self, axis: Axis) -> &str {
        match axis {
            Axis::Horizontal => &self.x_axis_cursor,
            Axis::Vertical => &self.y_axis_cursor,
        }
    }
}
