//! Code-generation templates.
//!
//! Every template takes a small parameter record and returns a JavaScript
//! fragment. Templates never recurse into child nodes: node compilers compile
//! children into a buffer scope first and hand the flushed text in as the
//! guarded/loop body. A template returns `""` when its code is statically
//! unnecessary (no rules, bail disabled, null not allowed, ...).
pub mod array;
pub mod field;
pub mod object;
pub mod record;
pub mod union;

use crate::refs::RefId;

/// `refs['ref://n']`
pub fn ref_lookup(id: RefId) -> String {
    format!("refs['{id}']")
}

/// `if (a && b) {\n<body>\n}`, or the bare body without conditions.
pub(crate) fn wrap_in_conditional(conditions: &[&str], body: &str) -> String {
    let conditions = conditions
        .iter()
        .copied()
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>();
    if conditions.is_empty() {
        return body.to_string();
    }
    format!("if ({}) {{\n{body}\n}}", conditions.join(" && "))
}

/// Join non-empty fragments line by line.
pub(crate) fn join_fragments(fragments: &[&str]) -> String {
    fragments
        .iter()
        .copied()
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Program prologue: unpack the runtime helpers and declare the result slot.
pub fn define_prologue() -> String {
    [
        "const { defineValue, ensureExists, ensureIsDefined, ensureNotNull, ensureIsObject, ensureIsArray, moveProperties } = helpers;",
        "const report = errorReporter.report.bind(errorReporter);",
        "let out;",
    ]
    .join("\n")
}

/// Program epilogue: surface collected errors, otherwise hand back the output.
pub fn define_epilogue() -> String {
    "if (errorReporter.hasErrors) {\nthrow errorReporter.createError();\n}\nreturn out;".to_string()
}
