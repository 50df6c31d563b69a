use crate::buffer::ScopeId;
use crate::error::CompileError;
use crate::field::{CompilerParent, CompilerUnionParent};
use crate::ir::LiteralNode;
use crate::refs::RefKind;
use crate::snippets::field::{FieldValidations, define_field_validations, define_field_value_output};

use super::{Compiler, display_path, names_of};

/// Scalar leaf: declare, check existence, run rules, commit the (transformed)
/// value when it is defined and valid.
pub(crate) fn compile_literal(
    cx: &mut Compiler,
    node: &LiteralNode,
    scope: ScopeId,
    parent: &CompilerParent,
    union: Option<&CompilerUnionParent>,
) -> Result<(), CompileError> {
    let field = cx.create_field_for("literal", names_of(&node.field), parent, union);
    if let Some(id) = node.transform_fn_id {
        cx.check_ref(id, RefKind::Transform, &display_path(&field))?;
    }
    cx.define_field(scope, &field, &node.field, union)?;

    let validations = define_field_validations(FieldValidations {
        variable_name: &field.variable_name,
        validations: &node.field.validations,
        bail: node.field.bail,
        drop_missing_check: false,
    });
    cx.buffer.write_statement(scope, validations);
    cx.buffer.write_statement(
        scope,
        define_field_value_output(
            &field.variable_name,
            &field.output_expression,
            node.transform_fn_id,
        ),
    );
    Ok(())
}
