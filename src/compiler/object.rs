use indexmap::IndexSet;

use crate::buffer::ScopeId;
use crate::error::CompileError;
use crate::field::{CompilerField, CompilerParent, CompilerUnionParent};
use crate::ir::{GroupSchema, ObjectGroupNode, ObjectNode, SchemaNode};
use crate::js;
use crate::refs::RefKind;
use crate::snippets::field::{
    FieldValidations, define_field_null_output, define_field_validations, define_is_valid_guard,
};
use crate::snippets::join_fragments;
use crate::snippets::object::{
    MoveProperties, define_move_properties, define_object_guard, define_object_initial_output,
};
use crate::snippets::union::{ConditionalBranch, ConditionalGuard, define_conditional_guard};

use super::{Compiler, display_path, names_of};

pub(crate) fn compile_object(
    cx: &mut Compiler,
    node: &ObjectNode,
    scope: ScopeId,
    parent: &CompilerParent,
    union: Option<&CompilerUnionParent>,
) -> Result<(), CompileError> {
    let field = cx.create_field_for("object", names_of(&node.field), parent, union);
    cx.define_field(scope, &field, &node.field, union)?;

    let object_parent = CompilerParent::object(&field);
    let output_container = field.output_container();
    let body = cx.buffer.child(scope);
    cx.buffer.write_statement(
        body,
        define_object_initial_output(&output_container, &field.output_expression),
    );
    for property in &node.properties {
        cx.compile_node(property, body, &object_parent, None)?;
    }
    for group in &node.groups {
        compile_group(cx, group, body, &field, &object_parent)?;
    }
    let fields_to_ignore = known_property_keys(node);
    cx.buffer.write_statement(
        body,
        define_move_properties(MoveProperties {
            variable_name: &field.variable_name,
            output_container: &output_container,
            allow_unknown_properties: node.allow_unknown_properties,
            fields_to_ignore: &fields_to_ignore,
        }),
    );

    let validations = define_field_validations(FieldValidations {
        variable_name: &field.variable_name,
        validations: &node.field.validations,
        bail: node.field.bail,
        drop_missing_check: true,
    });
    let body_code = cx.buffer.flush(body);
    let guarded = define_is_valid_guard(&field.variable_name, node.field.bail, &body_code);
    let guarded = join_fragments(&[&validations, &guarded]);
    let guard = define_object_guard(&field.variable_name, &guarded);
    let null_output = define_field_null_output(
        &field.variable_name,
        node.field.allow_null,
        &field.output_expression,
    );
    cx.buffer.write_statement(scope, join_fragments(&[&guard, &null_output]));
    Ok(())
}

/// Mutually exclusive property sets. Children compile against the enclosing
/// object, so their fields land in the same output container.
fn compile_group(
    cx: &mut Compiler,
    group: &ObjectGroupNode,
    scope: ScopeId,
    field: &CompilerField,
    object_parent: &CompilerParent,
) -> Result<(), CompileError> {
    let path = display_path(field);
    if group.conditions.is_empty() {
        return Err(CompileError::NoConditions { node: "object group", path });
    }
    let mut branches = Vec::with_capacity(group.conditions.len());
    for condition in &group.conditions {
        cx.check_ref(condition.conditional_fn_ref_id, RefKind::Conditional, &path)?;
        let guarded = cx.buffer.child(scope);
        match &condition.schema {
            GroupSchema::SubObject { children } => {
                for child in children {
                    cx.compile_node(child, guarded, object_parent, None)?;
                }
            }
            GroupSchema::Group(nested) => compile_group(cx, nested, guarded, field, object_parent)?,
        }
        branches.push(ConditionalBranch {
            conditional_fn_ref_id: condition.conditional_fn_ref_id,
            guarded_code_snippet: cx.buffer.flush(guarded),
        });
    }
    if let Some(id) = group.else_conditional_fn_ref_id {
        cx.check_ref(id, RefKind::Conditional, &path)?;
    }
    cx.buffer.write_statement(
        scope,
        define_conditional_guard(ConditionalGuard {
            variable_name: &field.variable_name,
            branches: &branches,
            else_conditional_fn_ref_id: group.else_conditional_fn_ref_id,
        }),
    );
    Ok(())
}

/// Input and output keys of every property, group branches included, as JS
/// string literals. Passthrough must skip all of them.
fn known_property_keys(node: &ObjectNode) -> Vec<String> {
    let mut keys = IndexSet::new();
    collect_keys(&node.properties, &mut keys);
    for group in &node.groups {
        collect_group_keys(group, &mut keys);
    }
    keys.into_iter().map(js::string_literal).collect()
}

fn collect_keys<'a>(children: &'a [SchemaNode], keys: &mut IndexSet<&'a str>) {
    for child in children {
        keys.insert(child.field_name());
        keys.insert(child.property_name());
    }
}

fn collect_group_keys<'a>(group: &'a ObjectGroupNode, keys: &mut IndexSet<&'a str>) {
    for condition in &group.conditions {
        match &condition.schema {
            GroupSchema::SubObject { children } => collect_keys(children, keys),
            GroupSchema::Group(nested) => collect_group_keys(nested, keys),
        }
    }
}
