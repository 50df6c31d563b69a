use super::{
    CompilerField, CompilerParent, ROOT_PATH_EXPRESSION, WILDCARD, join_path_expression,
    join_wildcard_path,
};

/// Element of a homogeneous array, read at the loop index `<array>_i`.
pub fn create_array_field(counter: usize, parent: &CompilerParent) -> CompilerField {
    let index = format!("{}_i", parent.variable_name);
    let path_segment = if parent.field_path_expression == ROOT_PATH_EXPRESSION {
        format!("String({index})")
    } else {
        index.clone()
    };
    CompilerField {
        parent_value_expression: parent.value_expression.clone(),
        field_name_expression: index.clone(),
        field_path_expression: join_path_expression(&parent.field_path_expression, &path_segment),
        wildcard_path: join_wildcard_path(&parent.wildcard_path, WILDCARD),
        variable_name: format!("item_{counter}"),
        value_expression: format!("{}[{index}]", parent.value_expression),
        output_expression: format!("{}[{index}]", parent.output_expression),
        is_array_member: true,
    }
}
