//! Compiler-side failures. These are programmer/config errors in the schema
//! tree; runtime validation failures go through `report` in the emitted code.
use thiserror::Error;

use crate::refs::{RefId, RefKind};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error("unknown reference `{id}` ({expected}) at `{path}`")]
    UnknownRef {
        id: RefId,
        expected: RefKind,
        path: String,
    },

    #[error("reference `{id}` at `{path}` is a {found}, expected a {expected}")]
    RefKindMismatch {
        id: RefId,
        expected: RefKind,
        found: RefKind,
        path: String,
    },

    #[error("array node at `{path}` declares neither `each` nor `children`")]
    ArrayWithoutElements { path: String },

    #[error("{node} at `{path}` has no conditions")]
    NoConditions { node: &'static str, path: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RefsError {
    #[error("invalid reference id `{0}` (expected `ref://<positive integer>`)")]
    InvalidId(String),

    #[error("reference `{0}` is already defined")]
    Duplicate(RefId),

    #[error("reference `{id}` must be greater than `{last}`")]
    NotIncreasing { id: RefId, last: RefId },

    #[error("no reference id left after `{0}`")]
    Exhausted(RefId),
}

/// Failure to decode a schema bundle from JSON.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },

    #[error("JSON pointer `{0}` does not select anything")]
    PointerMiss(String),
}
