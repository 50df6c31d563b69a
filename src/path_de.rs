use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::SchemaError;
use crate::ir::RootNode;
use crate::refs::RefsStore;

/// Schema tree plus the reference table its ids point into.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaBundle {
    #[serde(flatten)]
    pub root: RootNode,
    #[serde(default)]
    pub refs: RefsStore,
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, SchemaError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| SchemaError::Decode {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

pub fn from_value_with_path<T: DeserializeOwned>(
    value: serde_json::Value,
) -> Result<T, SchemaError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| SchemaError::Decode {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Decode a bundle, optionally from a sub-document selected by a JSON pointer.
pub fn load_bundle(src: &str, json_pointer: Option<&str>) -> Result<SchemaBundle, SchemaError> {
    let Some(pointer) = json_pointer else {
        return from_str_with_path(src);
    };
    let mut document: serde_json::Value = from_str_with_path(src)?;
    let selected = document
        .pointer_mut(pointer)
        .map(serde_json::Value::take)
        .ok_or_else(|| SchemaError::PointerMiss(pointer.to_string()))?;
    from_value_with_path(selected)
}
