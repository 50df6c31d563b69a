//! Compiler configuration. Loaded from JSON by the CLI, defaulted otherwise.
use serde::{Deserialize, Serialize};

/// What an optional, non-nullable field does with an explicit `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalNullPolicy {
    /// Optional means "may be missing or null"; no existence check at all.
    #[default]
    Permit,
    /// Optional only permits `undefined`; `null` is reported via `ensureNotNull`.
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Read `''` as `null` before parsing and validating any field.
    pub convert_empty_strings_to_null: bool,
    pub optional_null_policy: OptionalNullPolicy,
}

impl CompilerOptions {
    pub fn from_json_str(src: &str) -> Result<Self, crate::error::SchemaError> {
        crate::path_de::from_str_with_path(src)
    }
}
