//! Field context deriver.
//!
//! Given the context of the parent being compiled and the names of a child
//! node, computes everything the templates need to talk about that child at
//! run time:
//! - a unique variable name for its field context,
//! - the expression reading its value out of the parent,
//! - the expression its validated value is written to,
//! - its dotted field path (a runtime expression) and its wildcard path
//!   (a static string where array/record positions become `*`).
//!
//! Derivation is pure; the caller owns the counter and decides whether it
//! ticks (it must not for direct union children, which reuse the union slot).
pub mod array;
pub mod object;
pub mod record;
pub mod tuple;

/// What kind of container the child lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    Root,
    Object,
    Array,
    Tuple { index: usize },
    Record,
}

/// Context handed from a container to each of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerParent {
    pub kind: ParentKind,
    pub variable_name: String,
    /// Expression evaluating to the parent's (possibly parsed) input value.
    pub value_expression: String,
    pub field_path_expression: String,
    pub wildcard_path: String,
    /// Output container children write into.
    pub output_expression: String,
}

/// Shared slot of a union; its direct children compile against this field.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerUnionParent {
    pub field: CompilerField,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompilerField {
    pub parent_value_expression: String,
    pub field_name_expression: String,
    pub field_path_expression: String,
    pub wildcard_path: String,
    pub variable_name: String,
    pub value_expression: String,
    pub output_expression: String,
    pub is_array_member: bool,
}

/// Input and output key of a child under an object parent. Other parents key
/// children by position and ignore these.
#[derive(Debug, Clone, Copy)]
pub struct FieldNames<'a> {
    pub field_name: &'a str,
    pub property_name: &'a str,
}

pub const ROOT_VARIABLE: &str = "root_item";
pub const ROOT_PATH_EXPRESSION: &str = "''";
pub const OUTPUT_VARIABLE: &str = "out";
pub const WILDCARD: &str = "*";

// ————————————————————————————————————————————————————————————————————————————
// DERIVATION
// ————————————————————————————————————————————————————————————————————————————

/// Derive the context of one field occurrence. `counter` is the already
/// ticked value that makes the variable name unique.
pub fn create_field(
    names: FieldNames<'_>,
    counter: usize,
    parent: &CompilerParent,
) -> CompilerField {
    match parent.kind {
        ParentKind::Root => create_root_field(),
        ParentKind::Object => object::create_object_field(names, counter, parent),
        ParentKind::Array => array::create_array_field(counter, parent),
        ParentKind::Tuple { index } => tuple::create_tuple_field(index, counter, parent),
        ParentKind::Record => record::create_record_field(counter, parent),
    }
}

fn create_root_field() -> CompilerField {
    CompilerField {
        parent_value_expression: "root".into(),
        field_name_expression: "''".into(),
        field_path_expression: ROOT_PATH_EXPRESSION.into(),
        wildcard_path: String::new(),
        variable_name: ROOT_VARIABLE.into(),
        value_expression: "root".into(),
        output_expression: OUTPUT_VARIABLE.into(),
        is_array_member: false,
    }
}

/// `parent + '.' + segment`, or just the segment under the root.
pub(crate) fn join_path_expression(parent: &str, segment: &str) -> String {
    if parent == ROOT_PATH_EXPRESSION {
        segment.to_string()
    } else {
        format!("{parent} + '.' + {segment}")
    }
}

pub(crate) fn join_wildcard_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONTEXT CONSTRUCTORS
// ————————————————————————————————————————————————————————————————————————————

impl CompilerParent {
    pub fn root() -> Self {
        Self {
            kind: ParentKind::Root,
            variable_name: "root".into(),
            value_expression: "root".into(),
            field_path_expression: ROOT_PATH_EXPRESSION.into(),
            wildcard_path: String::new(),
            output_expression: OUTPUT_VARIABLE.into(),
        }
    }

    pub fn object(field: &CompilerField) -> Self {
        Self::container(ParentKind::Object, field)
    }

    pub fn array(field: &CompilerField) -> Self {
        Self::container(ParentKind::Array, field)
    }

    pub fn tuple(field: &CompilerField, index: usize) -> Self {
        Self::container(ParentKind::Tuple { index }, field)
    }

    pub fn record(field: &CompilerField) -> Self {
        Self::container(ParentKind::Record, field)
    }

    fn container(kind: ParentKind, field: &CompilerField) -> Self {
        Self {
            kind,
            variable_name: field.variable_name.clone(),
            value_expression: format!("{}.value", field.variable_name),
            field_path_expression: field.field_path_expression.clone(),
            wildcard_path: field.wildcard_path.clone(),
            output_expression: field.output_container(),
        }
    }
}

impl CompilerField {
    /// Local holding the output object/array being built for this field.
    pub fn output_container(&self) -> String {
        format!("{}_out", self.variable_name)
    }

    pub fn index_variable(&self) -> String {
        format!("{}_i", self.variable_name)
    }

    pub fn size_variable(&self) -> String {
        format!("{}_size", self.variable_name)
    }

    pub fn key_variable(&self) -> String {
        format!("{}_key", self.variable_name)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
