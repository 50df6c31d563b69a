use super::{CompilerField, CompilerParent, WILDCARD, join_path_expression, join_wildcard_path};

/// Value under an arbitrary key of a record, read at the loop key `<record>_key`.
pub fn create_record_field(counter: usize, parent: &CompilerParent) -> CompilerField {
    let key = format!("{}_key", parent.variable_name);
    CompilerField {
        parent_value_expression: parent.value_expression.clone(),
        field_name_expression: key.clone(),
        field_path_expression: join_path_expression(&parent.field_path_expression, &key),
        wildcard_path: join_wildcard_path(&parent.wildcard_path, WILDCARD),
        variable_name: format!("value_{counter}"),
        value_expression: format!("{}[{key}]", parent.value_expression),
        output_expression: format!("{}[{key}]", parent.output_expression),
        is_array_member: false,
    }
}
