//! Conditional chains shared by unions and object groups.
use crate::refs::RefId;

use super::ref_lookup;

pub struct ConditionalBranch {
    pub conditional_fn_ref_id: RefId,
    pub guarded_code_snippet: String,
}

pub struct ConditionalGuard<'a> {
    /// Field the discriminants are called with.
    pub variable_name: &'a str,
    pub branches: &'a [ConditionalBranch],
    pub else_conditional_fn_ref_id: Option<RefId>,
}

/// `if (refs[a](v.value, v)) {..} else if (refs[b](v.value, v)) {..} else { refs[c](v.value, v); }`
pub fn define_conditional_guard(p: ConditionalGuard<'_>) -> String {
    let var = p.variable_name;
    let mut parts = p
        .branches
        .iter()
        .enumerate()
        .map(|(index, branch)| {
            let keyword = if index == 0 { "if" } else { "else if" };
            format!(
                "{keyword} ({}({var}.value, {var})) {{\n{}\n}}",
                ref_lookup(branch.conditional_fn_ref_id),
                branch.guarded_code_snippet
            )
        })
        .collect::<Vec<_>>();
    if let Some(id) = p.else_conditional_fn_ref_id {
        parts.push(format!("else {{\n{}({var}.value, {var});\n}}", ref_lookup(id)));
    }
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(id: u64, body: &str) -> ConditionalBranch {
        ConditionalBranch {
            conditional_fn_ref_id: RefId::new(id).unwrap(),
            guarded_code_snippet: body.to_string(),
        }
    }

    #[test]
    fn chains_branches_in_order() {
        let branches = [branch(1, "a();"), branch(2, "b();")];
        let src = define_conditional_guard(ConditionalGuard {
            variable_name: "root_item",
            branches: &branches,
            else_conditional_fn_ref_id: None,
        });
        assert_eq!(
            src,
            "if (refs['ref://1'](root_item.value, root_item)) {\na();\n}\n\
             else if (refs['ref://2'](root_item.value, root_item)) {\nb();\n}"
        );
    }

    #[test]
    fn fallback_runs_in_else_block() {
        let branches = [branch(1, "a();")];
        let src = define_conditional_guard(ConditionalGuard {
            variable_name: "root_item",
            branches: &branches,
            else_conditional_fn_ref_id: Some(RefId::new(10).unwrap()),
        });
        assert!(src.ends_with("else {\nrefs['ref://10'](root_item.value, root_item);\n}"), "{src}");
    }
}
