//! PanelGrip Web
//!
//! Browser binding: a DOM host for the resize engine and the
//! `useAdjustPanel` entry point exported to JavaScript.

mod options;

pub use options::{JsOptions, StorageKind};

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomElement, DomEvent, DomHost, DomListener};

#[cfg(target_arch = "wasm32")]
pub use web::{AdjustPanelHandle, start, use_adjust_panel};
