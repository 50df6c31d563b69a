//! Code buffer: an arena of statement scopes.
//!
//! Node compilers write statements into a scope, open child scopes for code
//! that a template will wrap (guards, loops, branches), and `flush` those
//! children back into a fragment. Indentation is never tracked while writing;
//! `into_source` re-indents the finished program in one pass from brace depth.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug, Default)]
struct Scope {
    parent: Option<ScopeId>,
    statements: Vec<String>,
}

#[derive(Debug)]
pub struct CodeBuffer {
    scopes: Vec<Scope>,
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self { scopes: vec![Scope::default()] }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Open an isolated scope below `parent`.
    pub fn child(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope { parent: Some(parent), statements: Vec::new() });
        id
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0].parent
    }

    /// Nesting depth of a scope (root = 0).
    pub fn depth(&self, scope: ScopeId) -> usize {
        let mut depth = 0;
        let mut cursor = self.parent(scope);
        while let Some(p) = cursor {
            depth += 1;
            cursor = self.parent(p);
        }
        depth
    }

    /// Empty fragments are dropped so templates can return `""` for elided code.
    pub fn write_statement(&mut self, scope: ScopeId, statement: impl Into<String>) {
        let statement = statement.into();
        if statement.trim().is_empty() {
            return;
        }
        tracing::trace!(scope = scope.0, depth = self.depth(scope), "write statement");
        self.scopes[scope.0].statements.push(statement);
    }

    /// Serialize one scope, in write order.
    pub fn flush(&self, scope: ScopeId) -> String {
        self.scopes[scope.0].statements.join("\n")
    }

    pub fn into_source(self) -> String {
        let raw = self.flush(self.root());
        reindent(&raw)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

const INDENT: &str = "  ";

/// Re-indent by bracket nesting. Every line that leaves brackets open adds
/// one level, however many it opened; the level closes with its last bracket.
/// Blank lines are dropped.
fn reindent(src: &str) -> String {
    let mut out = String::with_capacity(src.len() + src.len() / 4);
    let mut levels: Vec<usize> = Vec::new();
    for line in src.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (opens, closes_leading, closes_rest) = brace_balance(line);
        close_levels(&mut levels, closes_leading);
        for _ in 0..levels.len() {
            out.push_str(INDENT);
        }
        out.push_str(line);
        out.push('\n');
        close_levels(&mut levels, closes_rest);
        if opens > 0 {
            levels.push(opens);
        }
    }
    out
}

fn close_levels(levels: &mut Vec<usize>, mut closes: usize) {
    while closes > 0 {
        let Some(top) = levels.last_mut() else { break };
        *top -= 1;
        if *top == 0 {
            levels.pop();
        }
        closes -= 1;
    }
}

/// `(opening, leading closing, remaining closing)` braces/brackets/parens of a
/// line, ignoring anything inside string literals.
fn brace_balance(line: &str) -> (usize, usize, usize) {
    let mut opens = 0;
    let mut leading = 0;
    let mut rest = 0;
    let mut at_start = true;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in line.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                at_start = false;
            }
            '{' | '[' | '(' => {
                opens += 1;
                at_start = false;
            }
            '}' | ']' | ')' => {
                // a closer only counts as leading while nothing was opened on this line
                if at_start {
                    leading += 1;
                } else if opens > 0 {
                    opens -= 1;
                } else {
                    rest += 1;
                }
            }
            c if c.is_whitespace() => {}
            _ => at_start = false,
        }
    }
    (opens, leading, rest)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
