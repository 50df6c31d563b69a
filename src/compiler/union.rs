use crate::buffer::ScopeId;
use crate::error::CompileError;
use crate::field::{CompilerParent, CompilerUnionParent, FieldNames};
use crate::ir::UnionNode;
use crate::refs::RefKind;
use crate::snippets::union::{ConditionalBranch, ConditionalGuard, define_conditional_guard};

use super::{Compiler, display_path};

/// Discriminated alternatives over one slot. The first matching discriminant
/// wins; its branch compiles against the union's own field so every branch
/// reads and writes the same variable.
pub(crate) fn compile_union(
    cx: &mut Compiler,
    node: &UnionNode,
    scope: ScopeId,
    parent: &CompilerParent,
    union: Option<&CompilerUnionParent>,
) -> Result<(), CompileError> {
    let names = FieldNames {
        field_name: &node.field_name,
        property_name: &node.property_name,
    };
    let field = cx.create_field_for("union", names, parent, union);
    let path = display_path(&field);
    if node.conditions.is_empty() {
        return Err(CompileError::NoConditions { node: "union", path });
    }
    if union.is_none() {
        cx.define_union_slot(scope, &field);
    }

    let shared = CompilerUnionParent { field: field.clone() };
    let mut branches = Vec::with_capacity(node.conditions.len());
    for condition in &node.conditions {
        cx.check_ref(condition.conditional_fn_ref_id, RefKind::Conditional, &path)?;
        let guarded = cx.buffer.child(scope);
        cx.compile_node(&condition.schema, guarded, parent, Some(&shared))?;
        branches.push(ConditionalBranch {
            conditional_fn_ref_id: condition.conditional_fn_ref_id,
            guarded_code_snippet: cx.buffer.flush(guarded),
        });
    }
    if let Some(id) = node.else_conditional_fn_ref_id {
        cx.check_ref(id, RefKind::Conditional, &path)?;
    }
    cx.buffer.write_statement(
        scope,
        define_conditional_guard(ConditionalGuard {
            variable_name: &field.variable_name,
            branches: &branches,
            else_conditional_fn_ref_id: node.else_conditional_fn_ref_id,
        }),
    );
    Ok(())
}
