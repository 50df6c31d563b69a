use crate::buffer::ScopeId;
use crate::error::CompileError;
use crate::field::{CompilerParent, CompilerUnionParent};
use crate::ir::RecordNode;
use crate::snippets::field::{
    FieldValidations, define_field_null_output, define_field_validations, define_is_valid_guard,
};
use crate::snippets::join_fragments;
use crate::snippets::object::{define_object_guard, define_object_initial_output};
use crate::snippets::record::define_record_loop;

use super::{Compiler, names_of};

/// Object with arbitrary keys; every value is checked against `each`.
pub(crate) fn compile_record(
    cx: &mut Compiler,
    node: &RecordNode,
    scope: ScopeId,
    parent: &CompilerParent,
    union: Option<&CompilerUnionParent>,
) -> Result<(), CompileError> {
    let field = cx.create_field_for("record", names_of(&node.field), parent, union);
    cx.define_field(scope, &field, &node.field, union)?;

    let output_container = field.output_container();
    let body = cx.buffer.child(scope);
    cx.buffer.write_statement(
        body,
        define_object_initial_output(&output_container, &field.output_expression),
    );
    let loop_scope = cx.buffer.child(body);
    cx.compile_node(&node.each, loop_scope, &CompilerParent::record(&field), None)?;
    let loop_code_snippet = cx.buffer.flush(loop_scope);
    cx.buffer.write_statement(
        body,
        define_record_loop(&field.variable_name, &field.key_variable(), &loop_code_snippet),
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
