/// Loop over the record's own keys; the body is compiled once.
pub fn define_record_loop(
    variable_name: &str,
    key_variable: &str,
    loop_code_snippet: &str,
) -> String {
    format!(
        "for (const {key_variable} of Object.keys({variable_name}.value)) {{\n{loop_code_snippet}\n}}"
    )
}
