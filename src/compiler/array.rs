use crate::buffer::ScopeId;
use crate::error::CompileError;
use crate::field::{CompilerParent, CompilerUnionParent};
use crate::ir::ArrayNode;
use crate::js;
use crate::snippets::array::{
    ArrayLoop, define_array_guard, define_array_initial_output, define_array_loop,
};
use crate::snippets::field::{
    FieldValidations, define_field_null_output, define_field_validations, define_is_valid_guard,
};
use crate::snippets::join_fragments;
use crate::snippets::object::{MoveProperties, define_move_properties};

use super::{Compiler, display_path, names_of};

/// Homogeneous list (`each`), fixed tuple (`children`) or tuple with a rest
/// element (both). Positional children own indices `0..n`; the `each` loop
/// picks up from `n`.
pub(crate) fn compile_array(
    cx: &mut Compiler,
    node: &ArrayNode,
    scope: ScopeId,
    parent: &CompilerParent,
    union: Option<&CompilerUnionParent>,
) -> Result<(), CompileError> {
    let field = cx.create_field_for("array", names_of(&node.field), parent, union);
    if node.each.is_none() && node.children.is_none() {
        return Err(CompileError::ArrayWithoutElements { path: display_path(&field) });
    }
    cx.define_field(scope, &field, &node.field, union)?;

    let output_container = field.output_container();
    let body = cx.buffer.child(scope);
    cx.buffer.write_statement(
        body,
        define_array_initial_output(&output_container, &field.output_expression),
    );

    let positional = node.children.as_deref().unwrap_or_default();
    for (index, child) in positional.iter().enumerate() {
        cx.compile_node(child, body, &CompilerParent::tuple(&field, index), None)?;
    }

    match &node.each {
        Some(each) => {
            let loop_scope = cx.buffer.child(body);
            cx.compile_node(each, loop_scope, &CompilerParent::array(&field), None)?;
            let loop_code_snippet = cx.buffer.flush(loop_scope);
            cx.buffer.write_statement(
                body,
                define_array_loop(ArrayLoop {
                    variable_name: &field.variable_name,
                    index_variable: &field.index_variable(),
                    size_variable: &field.size_variable(),
                    start_index: positional.len(),
                    loop_code_snippet: &loop_code_snippet,
                }),
            );
        }
        None => {
            let fields_to_ignore = (0..positional.len())
                .map(|index| js::string_literal(&index.to_string()))
                .collect::<Vec<_>>();
            cx.buffer.write_statement(
                body,
                define_move_properties(MoveProperties {
                    variable_name: &field.variable_name,
                    output_container: &output_container,
                    allow_unknown_properties: node.allow_unknown_properties,
                    fields_to_ignore: &fields_to_ignore,
                }),
            );
        }
    }

    let validations = define_field_validations(FieldValidations {
        variable_name: &field.variable_name,
        validations: &node.field.validations,
        bail: node.field.bail,
        drop_missing_check: true,
    });
    let body_code = cx.buffer.flush(body);
    let guarded = define_is_valid_guard(&field.variable_name, node.field.bail, &body_code);
    let guarded = join_fragments(&[&validations, &guarded]);
    let guard = define_array_guard(&field.variable_name, &guarded);
    let null_output = define_field_null_output(
        &field.variable_name,
        node.field.allow_null,
        &field.output_expression,
    );
    cx.buffer.write_statement(scope, join_fragments(&[&guard, &null_output]));
    Ok(())
}
