//! Templates every field-bearing node uses: declaration, existence,
//! validations, bail gating, null fallback and literal output.
use crate::ir::ValidationNode;
use crate::options::OptionalNullPolicy;
use crate::refs::RefId;

use super::{ref_lookup, wrap_in_conditional};

// ————————————————————————————————————————————————————————————————————————————
// DECLARATION
// ————————————————————————————————————————————————————————————————————————————

pub struct FieldVariables<'a> {
    pub variable_name: &'a str,
    pub value_expression: &'a str,
    pub field_name_expression: &'a str,
    pub field_path_expression: &'a str,
    pub wildcard_path: &'a str,
    pub parent_value_expression: &'a str,
    pub is_array_member: bool,
    pub parse_fn_id: Option<RefId>,
    pub convert_empty_strings_to_null: bool,
}

/// `const <var> = defineValue(<value>, { ...field context... });`
pub fn define_field_variables(p: FieldVariables<'_>) -> String {
    let raw = if p.convert_empty_strings_to_null {
        format!("({v} === '' ? null : {v})", v = p.value_expression)
    } else {
        p.value_expression.to_string()
    };
    let value = match p.parse_fn_id {
        Some(id) => format!(
            "{}({raw}, {{\ndata: root,\nmeta: meta,\nparent: {}\n}})",
            ref_lookup(id),
            p.parent_value_expression
        ),
        None => raw,
    };
    format!(
        "const {var} = defineValue({value}, {{\n\
         data: root,\n\
         meta: meta,\n\
         fieldName: {name},\n\
         fieldPath: {path},\n\
         wildCardPath: {wildcard},\n\
         mutate: defineValue,\n\
         report: report,\n\
         isValid: true,\n\
         parent: {parent},\n\
         isArrayMember: {member},\n\
         }});",
        var = p.variable_name,
        name = p.field_name_expression,
        path = p.field_path_expression,
        wildcard = crate::js::string_literal(p.wildcard_path),
        parent = p.parent_value_expression,
        member = p.is_array_member,
    )
}

pub struct FieldReparse<'a> {
    pub variable_name: &'a str,
    pub parent_value_expression: &'a str,
    pub parse_fn_id: RefId,
}

/// Union branches share the union's declaration; a branch with its own parse
/// step pushes the parsed value back through `mutate`.
pub fn define_field_reparse(p: FieldReparse<'_>) -> String {
    format!(
        "{var}.mutate({}({var}.value, {{\ndata: root,\nmeta: meta,\nparent: {}\n}}), {var});",
        ref_lookup(p.parse_fn_id),
        p.parent_value_expression,
        var = p.variable_name,
    )
}

// ————————————————————————————————————————————————————————————————————————————
// EXISTENCE
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistenceCheck {
    /// present and not null
    Exists,
    /// present, null allowed
    IsDefined,
    /// may be missing, but not null
    NotNull,
    Skip,
}

pub fn existence_check(
    is_optional: bool,
    allow_null: bool,
    policy: OptionalNullPolicy,
) -> ExistenceCheck {
    match (is_optional, allow_null) {
        (false, false) => ExistenceCheck::Exists,
        (false, true) => ExistenceCheck::IsDefined,
        (true, true) => ExistenceCheck::Skip,
        (true, false) => match policy {
            OptionalNullPolicy::Permit => ExistenceCheck::Skip,
            OptionalNullPolicy::Reject => ExistenceCheck::NotNull,
        },
    }
}

pub fn define_field_existence_validations(check: ExistenceCheck, variable_name: &str) -> String {
    match check {
        ExistenceCheck::Exists => format!("ensureExists({variable_name});"),
        ExistenceCheck::IsDefined => format!("ensureIsDefined({variable_name});"),
        ExistenceCheck::NotNull => format!("ensureNotNull({variable_name});"),
        ExistenceCheck::Skip => String::new(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// VALIDATIONS
// ————————————————————————————————————————————————————————————————————————————

pub struct FieldValidations<'a> {
    pub variable_name: &'a str,
    pub validations: &'a [ValidationNode],
    pub bail: bool,
    /// Set once a type guard has already proven the value present.
    pub drop_missing_check: bool,
}

/// One call per rule, in declaration order.
pub fn define_field_validations(p: FieldValidations<'_>) -> String {
    p.validations
        .iter()
        .map(|rule| emit_validation_snippet(rule, &p))
        .collect::<Vec<_>>()
        .join("\n")
}

fn emit_validation_snippet(rule: &ValidationNode, p: &FieldValidations<'_>) -> String {
    let var = p.variable_name;
    let lookup = ref_lookup(rule.rule_fn_id);
    let call = format!("{lookup}.validator({var}.value, {lookup}.options, {var});");
    let call = if rule.is_async { format!("await {call}") } else { call };

    let bail_condition = if p.bail { format!("{var}.isValid") } else { String::new() };
    let present_condition = if rule.implicit || p.drop_missing_check {
        String::new()
    } else {
        format!("{var}.isDefined && {var}.value !== null")
    };
    wrap_in_conditional(&[&bail_condition, &present_condition], &call)
}

// ————————————————————————————————————————————————————————————————————————————
// GATING & OUTPUT
// ————————————————————————————————————————————————————————————————————————————

/// `if (<var>.isValid) { ... }` with bail; the bare snippet without.
pub fn define_is_valid_guard(
    variable_name: &str,
    bail: bool,
    guarded_code_snippet: &str,
) -> String {
    if !bail {
        return guarded_code_snippet.to_string();
    }
    format!("if ({variable_name}.isValid) {{\n{guarded_code_snippet}\n}}")
}

/// Chained after a type guard; `""` when null is not allowed.
pub fn define_field_null_output(
    variable_name: &str,
    allow_null: bool,
    output_expression: &str,
) -> String {
    if !allow_null {
        return String::new();
    }
    format!("else if ({variable_name}.value === null) {{\n{output_expression} = null;\n}}")
}

pub fn define_field_value_output(
    variable_name: &str,
    output_expression: &str,
    transform_fn_id: Option<RefId>,
) -> String {
    let value = match transform_fn_id {
        Some(id) => format!("{}({variable_name}.value, {variable_name})", ref_lookup(id)),
        None => format!("{variable_name}.value"),
    };
    format!(
        "if ({variable_name}.isDefined && {variable_name}.isValid) {{\n{output_expression} = {value};\n}}"
    )
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
