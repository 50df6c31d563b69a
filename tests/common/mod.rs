//! Tree builders and source helpers shared by the integration tests.
#![allow(dead_code)]

use guardgen::ir::{
    ArrayNode, FieldNode, GroupCondition, GroupSchema, LiteralNode, ObjectGroupNode, ObjectNode,
    RecordNode, SchemaNode, UnionCondition, UnionNode, ValidationNode,
};
use guardgen::{CompiledProgram, Compiler, CompilerOptions, RefId, RefsStore, RootNode};
use once_cell::sync::Lazy;
use regex::Regex;

pub fn field(name: &str) -> FieldNode {
    FieldNode {
        field_name: name.into(),
        property_name: name.into(),
        bail: true,
        is_optional: false,
        allow_null: false,
        parse_fn_id: None,
        validations: Vec::new(),
    }
}

pub fn rule(id: RefId) -> ValidationNode {
    ValidationNode { rule_fn_id: id, is_async: false, implicit: false }
}

pub fn literal(name: &str) -> SchemaNode {
    literal_with(field(name))
}

pub fn literal_with(field: FieldNode) -> SchemaNode {
    SchemaNode::Literal(LiteralNode { field, transform_fn_id: None })
}

pub fn object(name: &str, properties: Vec<SchemaNode>) -> SchemaNode {
    object_with(field(name), properties)
}

pub fn object_with(field: FieldNode, properties: Vec<SchemaNode>) -> SchemaNode {
    SchemaNode::Object(ObjectNode {
        field,
        allow_unknown_properties: false,
        properties,
        groups: Vec::new(),
    })
}

pub fn array_of(name: &str, each: SchemaNode) -> SchemaNode {
    array_with(field(name), Some(each), None)
}

pub fn tuple_of(name: &str, children: Vec<SchemaNode>) -> SchemaNode {
    array_with(field(name), None, Some(children))
}

pub fn array_with(
    field: FieldNode,
    each: Option<SchemaNode>,
    children: Option<Vec<SchemaNode>>,
) -> SchemaNode {
    SchemaNode::Array(ArrayNode {
        field,
        allow_unknown_properties: false,
        each: each.map(Box::new),
        children,
    })
}

pub fn record_of(name: &str, each: SchemaNode) -> SchemaNode {
    SchemaNode::Record(RecordNode { field: field(name), each: Box::new(each) })
}

pub fn union_of(
    name: &str,
    conditions: Vec<(RefId, SchemaNode)>,
    fallback: Option<RefId>,
) -> SchemaNode {
    SchemaNode::Union(UnionNode {
        field_name: name.into(),
        property_name: name.into(),
        conditions: conditions
            .into_iter()
            .map(|(conditional_fn_ref_id, schema)| UnionCondition { conditional_fn_ref_id, schema })
            .collect(),
        else_conditional_fn_ref_id: fallback,
    })
}

pub fn group_of(
    conditions: Vec<(RefId, Vec<SchemaNode>)>,
    fallback: Option<RefId>,
) -> ObjectGroupNode {
    ObjectGroupNode {
        conditions: conditions
            .into_iter()
            .map(|(conditional_fn_ref_id, children)| GroupCondition {
                conditional_fn_ref_id,
                schema: GroupSchema::SubObject { children },
            })
            .collect(),
        else_conditional_fn_ref_id: fallback,
    }
}

pub fn compile(schema: SchemaNode, refs: RefsStore) -> CompiledProgram {
    compile_with(schema, refs, CompilerOptions::default())
}

pub fn compile_with(
    schema: SchemaNode,
    refs: RefsStore,
    options: CompilerOptions,
) -> CompiledProgram {
    Compiler::new(refs)
        .with_options(options)
        .compile(&RootNode::new(schema))
        .expect("schema should compile")
}

/// Source with indentation stripped, so fragments can be matched verbatim.
pub fn flat(source: &str) -> String {
    source.lines().map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Every variable bound through `defineValue`, in emission order.
pub fn declared_variables(source: &str) -> Vec<String> {
    static DECL_RX: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"const ([A-Za-z_$][A-Za-z0-9_$]*) = defineValue\(").unwrap()
    });
    DECL_RX
        .captures_iter(source)
        .map(|c| c[1].to_string())
        .collect()
}

/// Byte offset of `needle`, panicking with the source on a miss.
pub fn position(source: &str, needle: &str) -> usize {
    source
        .find(needle)
        .unwrap_or_else(|| panic!("`{needle}` not found in:\n{source}"))
}
