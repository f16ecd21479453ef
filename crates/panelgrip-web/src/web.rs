//! JavaScript entry points.

use crate::dom::{DomElement, DomHost};
use crate::options::{JsOptions, StorageKind};
use panelgrip_core::storage::{KeyValueStore, WebStore};
use panelgrip_core::{AdjustOptions, AdjustPanel, CURSOR_ATTR, DIRECTION_ATTR, Directions};
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// Module initialization: panic messages and `log` output go to the console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Another module in the page may already own the logger
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

fn js_error(err: impl Display) -> JsError {
    JsError::new(&err.to_string())
}

fn parse_options(value: JsValue) -> Result<JsOptions, JsError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
}

fn open_store(kind: StorageKind) -> Result<Rc<dyn KeyValueStore>, JsError> {
    let store = match kind {
        StorageKind::Local => WebStore::local(),
        StorageKind::Session => WebStore::session(),
    }
    .map_err(js_error)?;
    Ok(Rc::new(store))
}

fn build_options(js: &JsOptions) -> Result<AdjustOptions, JsError> {
    let mut options = js.to_options();
    if let Some(kind) = js.storage_kind() {
        options.storage = Some(open_store(kind)?);
    }
    Ok(options)
}

/// Attach resize bars to `target`.
///
/// The bars live as long as the returned handle; call `destroy()` to
/// remove them.
#[wasm_bindgen(js_name = useAdjustPanel)]
pub fn use_adjust_panel(
    target: HtmlElement,
    options: JsValue,
) -> Result<AdjustPanelHandle, JsError> {
    let js = parse_options(options)?;
    let options = build_options(&js)?;
    let host = DomHost::new().map_err(js_error)?;
    let panel = AdjustPanel::mount(host, DomElement(target), options).map_err(js_error)?;
    Ok(AdjustPanelHandle { panel })
}

/// Name of the attribute carrying a bar's direction.
#[wasm_bindgen(js_name = directionAttribute)]
pub fn direction_attribute() -> String {
    DIRECTION_ATTR.to_string()
}

/// Name of the attribute carrying a bar's cursor.
#[wasm_bindgen(js_name = cursorAttribute)]
pub fn cursor_attribute() -> String {
    CURSOR_ATTR.to_string()
}

/// A mounted panel.
#[wasm_bindgen]
pub struct AdjustPanelHandle {
    panel: AdjustPanel<DomHost>,
}

#[wasm_bindgen]
impl AdjustPanelHandle {
    /// Replace all options. Returns whether the bars were rebuilt.
    pub fn update(&self, options: JsValue) -> Result<bool, JsError> {
        let js = parse_options(options)?;
        let next = build_options(&js)?;
        self.panel.update_options(|options| *options = next).map_err(js_error)
    }

    /// Change only the directions. Returns whether the bars were rebuilt.
    #[wasm_bindgen(js_name = setDirections)]
    pub fn set_directions(&self, directions: JsValue) -> Result<bool, JsError> {
        let directions: Directions = serde_wasm_bindgen::from_value(directions)
            .map_err(|e| JsError::new(&format!("Invalid directions: {}", e)))?;
        self.panel.set_directions(directions).map_err(js_error)
    }

    /// Rebuild the bars from the current options.
    pub fn reconcile(&self) -> Result<(), JsError> {
        self.panel.reconcile().map_err(js_error)
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.panel.is_dragging()
    }

    /// Forget the persisted size.
    #[wasm_bindgen(js_name = clearPersisted)]
    pub fn clear_persisted(&self) -> Result<(), JsError> {
        self.panel.clear_persisted().map_err(js_error)
    }

    /// Remove the bars and any active drag listeners.
    pub fn destroy(self) {
        log::debug!("Destroying panel with bars {:?}", self.panel.bar_directions());
        drop(self.panel);
    }
}
