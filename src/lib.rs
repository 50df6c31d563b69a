//! Compile declarative schema trees into a single flat JavaScript validation
//! program. The program walks the input once, reports every violation through
//! the caller's error reporter and rebuilds a clean output value.
pub mod buffer;
pub mod cli;
pub mod compiler;
pub mod error;
pub mod field;
pub mod ir;
pub mod js;
pub mod options;
pub mod path_de;
pub mod refs;
pub mod snippets;

pub use compiler::{CompiledProgram, Compiler, FieldRecord, compile};
pub use error::{CompileError, RefsError, SchemaError};
pub use ir::RootNode;
pub use options::{CompilerOptions, OptionalNullPolicy};
pub use path_de::{SchemaBundle, load_bundle};
pub use refs::{RefEntry, RefId, RefKind, RefResolver, RefsStore};
