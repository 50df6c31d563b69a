//! Orchestrator: owns the per-compilation state (variable counter, reference
//! table, code buffer) and dispatches each schema node to its compiler.
//!
//! One `Compiler` drives exactly one pass. Nothing is shared between passes,
//! so independent compilations may run on separate threads.
pub mod array;
pub mod literal;
pub mod object;
pub mod record;
pub mod union;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::buffer::{CodeBuffer, ScopeId};
use crate::error::CompileError;
use crate::field::{self, CompilerField, CompilerParent, CompilerUnionParent, FieldNames};
use crate::ir::{FieldNode, RootNode, SchemaNode};
use crate::options::CompilerOptions;
use crate::refs::{RefId, RefKind, RefsStore};
use crate::snippets;
use crate::snippets::field::{
    FieldReparse, FieldVariables, define_field_existence_validations, define_field_reparse,
    define_field_variables, existence_check,
};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// One compiled field occurrence (union children excluded: they share a slot).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    pub kind: &'static str,
    pub variable_name: String,
    pub field_path_expression: String,
    pub wildcard_path: String,
}

#[derive(Debug, Clone)]
pub struct CompiledProgram {
    /// Function body taking `(root, meta, refs, helpers, errorReporter)`.
    pub source: String,
    pub refs: RefsStore,
    /// At least one rule is awaited; run the body as an async function.
    pub is_async: bool,
    pub fields: Vec<FieldRecord>,
}

pub struct Compiler {
    refs: RefsStore,
    options: CompilerOptions,
    variables_counter: usize,
    pub(crate) buffer: CodeBuffer,
    is_async: bool,
    fields: Vec<FieldRecord>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

/// Compile with default options.
pub fn compile(root: &RootNode, refs: RefsStore) -> Result<CompiledProgram, CompileError> {
    Compiler::new(refs).compile(root)
}

impl Compiler {
    pub fn new(refs: RefsStore) -> Self {
        Self {
            refs,
            options: CompilerOptions::default(),
            variables_counter: 0,
            buffer: CodeBuffer::new(),
            is_async: false,
            fields: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    /// Start numbering variables after `start`.
    pub fn with_counter_start(mut self, start: usize) -> Self {
        self.variables_counter = start;
        self
    }

    #[instrument(skip_all, fields(root = root.schema.kind()))]
    pub fn compile(mut self, root: &RootNode) -> Result<CompiledProgram, CompileError> {
        let scope = self.buffer.root();
        self.buffer.write_statement(scope, snippets::define_prologue());
        self.compile_node(&root.schema, scope, &CompilerParent::root(), None)?;
        self.buffer.write_statement(scope, snippets::define_epilogue());

        debug!(
            fields = self.fields.len(),
            refs = self.refs.len(),
            is_async = self.is_async,
            "compilation finished"
        );
        Ok(CompiledProgram {
            source: self.buffer.into_source(),
            refs: self.refs,
            is_async: self.is_async,
            fields: self.fields,
        })
    }

    /// Dispatch one node into `scope`.
    pub(crate) fn compile_node(
        &mut self,
        node: &SchemaNode,
        scope: ScopeId,
        parent: &CompilerParent,
        union: Option<&CompilerUnionParent>,
    ) -> Result<(), CompileError> {
        match node {
            SchemaNode::Literal(n) => literal::compile_literal(self, n, scope, parent, union),
            SchemaNode::Object(n) => object::compile_object(self, n, scope, parent, union),
            SchemaNode::Array(n) => array::compile_array(self, n, scope, parent, union),
            SchemaNode::Record(n) => record::compile_record(self, n, scope, parent, union),
            SchemaNode::Union(n) => union::compile_union(self, n, scope, parent, union),
        }
    }

    /// Derive the field for a node occurrence. Direct union children reuse
    /// the union's field and leave the counter alone.
    pub(crate) fn create_field_for(
        &mut self,
        kind: &'static str,
        names: FieldNames<'_>,
        parent: &CompilerParent,
        union: Option<&CompilerUnionParent>,
    ) -> CompilerField {
        if let Some(union) = union {
            return union.field.clone();
        }
        self.variables_counter += 1;
        let field = field::create_field(names, self.variables_counter, parent);
        debug!(
            kind,
            variable = %field.variable_name,
            wildcard = %field.wildcard_path,
            "field derived"
        );
        self.fields.push(FieldRecord {
            kind,
            variable_name: field.variable_name.clone(),
            field_path_expression: field.field_path_expression.clone(),
            wildcard_path: field.wildcard_path.clone(),
        });
        field
    }

    /// Declaration (or re-parse for union children) plus existence check.
    pub(crate) fn define_field(
        &mut self,
        scope: ScopeId,
        field: &CompilerField,
        node: &FieldNode,
        union: Option<&CompilerUnionParent>,
    ) -> Result<(), CompileError> {
        let path = display_path(field);
        if let Some(id) = node.parse_fn_id {
            self.check_ref(id, RefKind::Parse, &path)?;
        }
        for rule in &node.validations {
            self.check_ref(rule.rule_fn_id, RefKind::Rule, &path)?;
            self.is_async |= rule.is_async;
        }

        match (union, node.parse_fn_id) {
            (None, parse_fn_id) => self.buffer.write_statement(
                scope,
                define_field_variables(FieldVariables {
                    variable_name: &field.variable_name,
                    value_expression: &field.value_expression,
                    field_name_expression: &field.field_name_expression,
                    field_path_expression: &field.field_path_expression,
                    wildcard_path: &field.wildcard_path,
                    parent_value_expression: &field.parent_value_expression,
                    is_array_member: field.is_array_member,
                    parse_fn_id,
                    convert_empty_strings_to_null: self.options.convert_empty_strings_to_null,
                }),
            ),
            (Some(_), Some(parse_fn_id)) => self.buffer.write_statement(
                scope,
                define_field_reparse(FieldReparse {
                    variable_name: &field.variable_name,
                    parent_value_expression: &field.parent_value_expression,
                    parse_fn_id,
                }),
            ),
            (Some(_), None) => {}
        }

        let check =
            existence_check(node.is_optional, node.allow_null, self.options.optional_null_policy);
        self.buffer.write_statement(
            scope,
            define_field_existence_validations(check, &field.variable_name),
        );
        Ok(())
    }

    /// Declare a union's shared slot. Unions have no parse step or flags.
    pub(crate) fn define_union_slot(&mut self, scope: ScopeId, field: &CompilerField) {
        self.buffer.write_statement(
            scope,
            define_field_variables(FieldVariables {
                variable_name: &field.variable_name,
                value_expression: &field.value_expression,
                field_name_expression: &field.field_name_expression,
                field_path_expression: &field.field_path_expression,
                wildcard_path: &field.wildcard_path,
                parent_value_expression: &field.parent_value_expression,
                is_array_member: field.is_array_member,
                parse_fn_id: None,
                convert_empty_strings_to_null: self.options.convert_empty_strings_to_null,
            }),
        );
    }

    pub(crate) fn check_ref(
        &self,
        id: RefId,
        expected: RefKind,
        path: &str,
    ) -> Result<(), CompileError> {
        let entry = self.refs.get(id).ok_or_else(|| CompileError::UnknownRef {
            id,
            expected,
            path: path.to_string(),
        })?;
        if entry.kind() != expected {
            return Err(CompileError::RefKindMismatch {
                id,
                expected,
                found: entry.kind(),
                path: path.to_string(),
            });
        }
        Ok(())
    }
}

impl CompiledProgram {
    /// Wrap the body into a named function declaration.
    pub fn to_function_source(&self) -> String {
        let keyword = if self.is_async { "async function" } else { "function" };
        let mut out = format!("{keyword} anonymous(root, meta, refs, helpers, errorReporter) {{\n");
        for line in self.source.lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

/// Wildcard path for diagnostics.
pub(crate) fn display_path(field: &CompilerField) -> String {
    if field.wildcard_path.is_empty() {
        "<root>".to_string()
    } else {
        field.wildcard_path.clone()
    }
}

pub(crate) fn names_of(node: &FieldNode) -> FieldNames<'_> {
    FieldNames {
        field_name: &node.field_name,
        property_name: &node.property_name,
    }
}
