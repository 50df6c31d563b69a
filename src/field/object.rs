use super::{CompilerField, CompilerParent, FieldNames, join_path_expression, join_wildcard_path};
use crate::js;

/// Property of an object. Reads by `fieldName`, writes by `propertyName`.
pub fn create_object_field(
    names: FieldNames<'_>,
    counter: usize,
    parent: &CompilerParent,
) -> CompilerField {
    let name_literal = js::string_literal(names.field_name);
    CompilerField {
        parent_value_expression: parent.value_expression.clone(),
        field_name_expression: name_literal.clone(),
        field_path_expression: join_path_expression(&parent.field_path_expression, &name_literal),
        wildcard_path: join_wildcard_path(&parent.wildcard_path, names.field_name),
        variable_name: format!("{}_{counter}", js::identifier_stem(names.property_name)),
        value_expression: format!("{}[{name_literal}]", parent.value_expression),
        output_expression: format!(
            "{}[{}]",
            parent.output_expression,
            js::string_literal(names.property_name)
        ),
        is_array_member: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{CompilerParent, create_field};

    fn root() -> CompilerField {
        create_field(FieldNames { field_name: "*", property_name: "*" }, 1, &CompilerParent::root())
    }

    #[test]
    fn renamed_property_reads_source_key_and_writes_output_key() {
        let root = root();
        let parent = CompilerParent::object(&root);
        let field = create_object_field(
            FieldNames { field_name: "oauth_token", property_name: "oauthToken" },
            5,
            &parent,
        );
        assert_eq!(field.variable_name, "oauthToken_5");
        assert_eq!(field.value_expression, "root_item.value['oauth_token']");
        assert_eq!(field.output_expression, "root_item_out['oauthToken']");
        assert_eq!(field.field_path_expression, "'oauth_token'");
        assert_eq!(field.wildcard_path, "oauth_token");
        assert_eq!(field.parent_value_expression, "root_item.value");
    }

    #[test]
    fn nested_property_paths_join_with_dots() {
        let root = root();
        let profile = create_object_field(
            FieldNames { field_name: "profile", property_name: "profile" },
            2,
            &CompilerParent::object(&root),
        );
        let city = create_object_field(
            FieldNames { field_name: "city", property_name: "city" },
            3,
            &CompilerParent::object(&profile),
        );
        assert_eq!(city.field_path_expression, "'profile' + '.' + 'city'");
        assert_eq!(city.wildcard_path, "profile.city");
        assert_eq!(city.output_expression, "profile_2_out['city']");
    }
}
