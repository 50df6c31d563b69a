/// `if (ensureIsObject(<var>)) { ... }`
pub fn define_object_guard(variable_name: &str, guarded_code_snippet: &str) -> String {
    format!("if (ensureIsObject({variable_name})) {{\n{guarded_code_snippet}\n}}")
}

/// Allocate the output container and hang it into the parent output slot.
pub fn define_object_initial_output(output_container: &str, output_expression: &str) -> String {
    format!("const {output_container} = {{}};\n{output_expression} = {output_container};")
}

pub struct MoveProperties<'a> {
    pub variable_name: &'a str,
    pub output_container: &'a str,
    pub allow_unknown_properties: bool,
    /// JS literal expressions of keys validated explicitly.
    pub fields_to_ignore: &'a [String],
}

/// Copy unvalidated keys. Must be written after every known property.
pub fn define_move_properties(p: MoveProperties<'_>) -> String {
    if !p.allow_unknown_properties {
        return String::new();
    }
    format!(
        "moveProperties({}.value, {}, [{}]);",
        p.variable_name,
        p.output_container,
        p.fields_to_ignore.join(", ")
    )
}
