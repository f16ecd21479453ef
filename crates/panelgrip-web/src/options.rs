//! Options as passed from JavaScript.

use panelgrip_core::{AdjustOptions, Directions, PersistAxis, Position, Prop};
use serde::Deserialize;

/// Which Web Storage area backs persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Local,
    Session,
}

/// The JS options object. Field names follow the camelCase JS API;
/// `null` and missing fields both mean "unset".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsOptions {
    pub directions: Directions,
    pub default_width: Option<f64>,
    pub default_height: Option<f64>,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
    pub bar_size: Option<f64>,
    pub bar_index: Option<i32>,
    pub persist: Option<bool>,
    pub persist_key: Option<String>,
    pub persist_axis: Option<PersistAxis>,
    pub storage: Option<StorageKind>,
    #[serde(rename = "XAxisCursor")]
    pub x_axis_cursor: Option<String>,
    #[serde(rename = "YAxisCursor")]
    pub y_axis_cursor: Option<String>,
    pub position: Option<Position>,
}

fn prop<T>(value: Option<T>) -> Prop<T> {
    value.map(Prop::Value).unwrap_or_default()
}

impl JsOptions {
    /// Engine options, without a storage backend.
    pub fn to_options(&self) -> AdjustOptions {
        AdjustOptions {
            directions: Prop::Value(self.directions.clone()),
            default_width: prop(self.default_width),
            default_height: prop(self.default_height),
            min_width: prop(self.min_width),
            min_height: prop(self.min_height),
            max_width: prop(self.max_width),
            max_height: prop(self.max_height),
            bar_size: prop(self.bar_size),
            bar_index: prop(self.bar_index),
            persist: self.persist.unwrap_or(false),
            persist_key: self.persist_key.clone(),
            storage: None,
            persist_axis: self.persist_axis.unwrap_or_default(),
            x_axis_cursor: prop(self.x_axis_cursor.clone()),
            y_axis_cursor: prop(self.y_axis_cursor.clone()),
            position: prop(self.position),
        }
    }

    /// Storage area to open, if persistence is on.
    pub fn storage_kind(&self) -> Option<StorageKind> {
        self.persist
            .unwrap_or(false)
            .then(|| self.storage.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelgrip_core::{Axis, ConfigError, Direction, DirectionSet};

    fn parse(json: &str) -> JsOptions {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_minimal_options() {
        let js = parse(r#"{"directions":"right"}"#);
        let options = js.to_options();

        let directions = DirectionSet::normalize(&options.directions.get().unwrap()).unwrap();
        assert_eq!(directions.iter().collect::<Vec<_>>(), vec![Direction::Right]);
        assert!(!options.persist);
        assert_eq!(options.bar_size.get(), None);
        assert_eq!(options.cursor(Axis::Horizontal), "ew-resize");
        assert_eq!(js.storage_kind(), None);
    }

    #[test]
    fn test_full_options() {
        let js = parse(
            r#"{
                "directions": ["top", "left"],
                "defaultWidth": 200,
                "minHeight": 50,
                "maxWidth": 400,
                "barSize": 8,
                "barIndex": 10,
                "persist": true,
                "persistKey": "sidebar",
                "persistAxis": "releaseTarget",
                "storage": "session",
                "XAxisCursor": "col-resize",
                "YAxisCursor": "row-resize",
                "position": "absolute"
            }"#,
        );
        let options = js.to_options();

        assert_eq!(options.default_width.get(), Some(200.0));
        assert_eq!(options.constraints().min_height, Some(50.0));
        assert_eq!(options.constraints().max_width, Some(400.0));
        assert_eq!(options.bar_size.get(), Some(8.0));
        assert_eq!(options.bar_index.get(), Some(10));
        assert!(options.persist);
        assert_eq!(options.persist_key.as_deref(), Some("sidebar"));
        assert_eq!(options.persist_axis, PersistAxis::ReleaseTarget);
        assert_eq!(options.cursor(Axis::Horizontal), "col-resize");
        assert_eq!(options.cursor(Axis::Vertical), "row-resize");
        assert_eq!(options.position.get(), Some(Position::Absolute));
        assert_eq!(js.storage_kind(), Some(StorageKind::Session));
    }

    #[test]
    fn test_nulls_are_unset() {
        let js = parse(r#"{"directions":"bottom","minWidth":null,"persistKey":null}"#);
        let options = js.to_options();

        assert_eq!(options.constraints().min_width, None);
        assert_eq!(options.persist_key, None);
    }

    #[test]
    fn test_persist_defaults_to_local_storage() {
        let js = parse(r#"{"directions":"left","persist":true,"persistKey":"k"}"#);
        assert_eq!(js.storage_kind(), Some(StorageKind::Local));
    }

    #[test]
    fn test_persist_without_key_rejected() {
        let js = parse(r#"{"directions":"left","persist":true}"#);
        assert!(matches!(js.to_options().validate(), Err(ConfigError::MissingPersistKey)));
    }

    #[test]
    fn test_unknown_direction_rejected() {
        assert!(serde_json::from_str::<JsOptions>(r#"{"directions":"north"}"#).is_err());
    }
}
