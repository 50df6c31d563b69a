// Schema tree consumed by the compiler. Built by callers (or decoded from a
// JSON bundle); never mutated during compilation.
use serde::{Deserialize, Serialize};

use crate::refs::RefId;

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaNode {
    Literal(LiteralNode),
    Object(ObjectNode),
    Array(ArrayNode),
    Record(RecordNode),
    Union(UnionNode),
}

/// Attributes shared by every node that owns a value slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldNode {
    pub field_name: String,       // key under the parent input
    pub property_name: String,    // key under the parent output
    #[serde(default = "yes")]
    pub bail: bool,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub allow_null: bool,
    /// Runs on the raw value, even when it is `undefined` or `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_fn_id: Option<RefId>,
    #[serde(default)]
    pub validations: Vec<ValidationNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationNode {
    pub rule_fn_id: RefId,
    #[serde(default)]
    pub is_async: bool,
    /// `false`: skipped while the value is `undefined`/`null`.
    #[serde(default)]
    pub implicit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralNode {
    #[serde(flatten)]
    pub field: FieldNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_fn_id: Option<RefId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectNode {
    #[serde(flatten)]
    pub field: FieldNode,
    #[serde(default)]
    pub allow_unknown_properties: bool,
    #[serde(default)]
    pub properties: Vec<SchemaNode>,
    #[serde(default)]
    pub groups: Vec<ObjectGroupNode>,
}

/// Mutually exclusive branches merged into the enclosing object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectGroupNode {
    pub conditions: Vec<GroupCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub else_conditional_fn_ref_id: Option<RefId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCondition {
    pub conditional_fn_ref_id: RefId,
    pub schema: GroupSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupSchema {
    SubObject { children: Vec<SchemaNode> },
    Group(ObjectGroupNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayNode {
    #[serde(flatten)]
    pub field: FieldNode,
    /// Only honoured for tuples without `each`.
    #[serde(default)]
    pub allow_unknown_properties: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub each: Option<Box<SchemaNode>>,
    /// Positional children (tuple mode). With `each` as well, `each` covers the rest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SchemaNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordNode {
    #[serde(flatten)]
    pub field: FieldNode,
    pub each: Box<SchemaNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionNode {
    pub field_name: String,
    pub property_name: String,
    pub conditions: Vec<UnionCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub else_conditional_fn_ref_id: Option<RefId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionCondition {
    pub conditional_fn_ref_id: RefId,
    pub schema: SchemaNode,
}

/// `{ "type": "root", "schema": ... }`; the `type` key is optional on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootNode {
    pub schema: SchemaNode,
}

// ————————————————————————————————————————————————————————————————————————————
// ACCESSORS
// ————————————————————————————————————————————————————————————————————————————

impl SchemaNode {
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaNode::Literal(_) => "literal",
            SchemaNode::Object(_) => "object",
            SchemaNode::Array(_) => "array",
            SchemaNode::Record(_) => "record",
            SchemaNode::Union(_) => "union",
        }
    }

    pub fn field_name(&self) -> &str {
        match self {
            SchemaNode::Union(u) => &u.field_name,
            SchemaNode::Literal(LiteralNode { field, .. })
            | SchemaNode::Object(ObjectNode { field, .. })
            | SchemaNode::Array(ArrayNode { field, .. })
            | SchemaNode::Record(RecordNode { field, .. }) => &field.field_name,
        }
    }

    pub fn property_name(&self) -> &str {
        match self {
            SchemaNode::Union(u) => &u.property_name,
            SchemaNode::Literal(LiteralNode { field, .. })
            | SchemaNode::Object(ObjectNode { field, .. })
            | SchemaNode::Array(ArrayNode { field, .. })
            | SchemaNode::Record(RecordNode { field, .. }) => &field.property_name,
        }
    }
}

impl RootNode {
    pub fn new(schema: SchemaNode) -> Self {
        Self { schema }
    }
}
