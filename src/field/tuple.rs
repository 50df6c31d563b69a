use super::{CompilerField, CompilerParent, join_path_expression, join_wildcard_path};

/// Positional tuple member. The index is static, so it stays in the wildcard path.
pub fn create_tuple_field(index: usize, counter: usize, parent: &CompilerParent) -> CompilerField {
    CompilerField {
        parent_value_expression: parent.value_expression.clone(),
        field_name_expression: index.to_string(),
        field_path_expression: join_path_expression(
            &parent.field_path_expression,
            &format!("'{index}'"),
        ),
        wildcard_path: join_wildcard_path(&parent.wildcard_path, &index.to_string()),
        variable_name: format!("item_{index}_{counter}"),
        value_expression: format!("{}[{index}]", parent.value_expression),
        output_expression: format!("{}[{index}]", parent.output_expression),
        is_array_member: true,
    }
}
