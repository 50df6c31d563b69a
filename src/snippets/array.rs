/// `if (ensureIsArray(<var>)) { ... }`
pub fn define_array_guard(variable_name: &str, guarded_code_snippet: &str) -> String {
    format!("if (ensureIsArray({variable_name})) {{\n{guarded_code_snippet}\n}}")
}

pub fn define_array_initial_output(output_container: &str, output_expression: &str) -> String {
    format!("const {output_container} = [];\n{output_expression} = {output_container};")
}

pub struct ArrayLoop<'a> {
    pub variable_name: &'a str,
    pub index_variable: &'a str,
    pub size_variable: &'a str,
    /// First index handled by the loop; non-zero after positional children.
    pub start_index: usize,
    pub loop_code_snippet: &'a str,
}

/// Counted loop over the source array; the body is compiled once.
pub fn define_array_loop(p: ArrayLoop<'_>) -> String {
    format!(
        "const {size} = {var}.value.length;\n\
         for (let {i} = {start}; {i} < {size}; {i}++) {{\n{body}\n}}",
        size = p.size_variable,
        var = p.variable_name,
        i = p.index_variable,
        start = p.start_index,
        body = p.loop_code_snippet,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_starts_at_given_index() {
        let src = define_array_loop(ArrayLoop {
            variable_name: "root_item",
            index_variable: "root_item_i",
            size_variable: "root_item_size",
            start_index: 2,
            loop_code_snippet: "body();",
        });
        assert_eq!(
            src,
            "const root_item_size = root_item.value.length;\n\
             for (let root_item_i = 2; root_item_i < root_item_size; root_item_i++) {\nbody();\n}"
        );
    }
}
