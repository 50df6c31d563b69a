//! CLI: schema bundle (JSON) → validation program (JS) + reference table.
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;

use crate::compiler::{CompiledProgram, Compiler};
use crate::options::{CompilerOptions, OptionalNullPolicy};
use crate::path_de::load_bundle;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile schema trees into flat JavaScript validation programs
#[derive(Parser, Debug)]
#[command(name = "guardgen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// compile each bundle into `<stem>.js` and `<stem>.refs.json`
    Compile(CompileOut),
    /// compile and print the derived field table as JSON
    Inspect(InspectOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select the bundle inside each document (e.g. /schemas/user)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct CompilerSettings {
    /// JSON file with compiler options; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// read '' as null before parsing and validating
    #[arg(long, default_value_t = false)]
    convert_empty_strings_to_null: bool,

    /// optional fields reject explicit null
    #[arg(long, default_value_t = false)]
    reject_optional_null: bool,
}

#[derive(clap::Parser, Debug)]
struct CompileOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    compiler_settings: CompilerSettings,

    /// wrap the body into a full (async) function declaration
    #[arg(long, default_value_t = false)]
    function: bool,

    /// output directory (stdout if omitted)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct InspectOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    compiler_settings: CompilerSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CompilerSettings {
    fn load_options(&self) -> anyhow::Result<CompilerOptions> {
        let mut options = match self.config.as_ref() {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                CompilerOptions::from_json_str(&source)
                    .with_context(|| format!("invalid config file {}", path.display()))?
            }
            None => CompilerOptions::default(),
        };
        if self.convert_empty_strings_to_null {
            options.convert_empty_strings_to_null = true;
        }
        if self.reject_optional_null {
            options.optional_null_policy = OptionalNullPolicy::Reject;
        }
        Ok(options)
    }
}

impl InputSettings {
    /// Compile every input in parallel; results keep input order.
    fn compile_all(
        &self,
        options: &CompilerOptions,
    ) -> anyhow::Result<Vec<(PathBuf, anyhow::Result<CompiledProgram>)>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let results = source_paths
            .into_par_iter()
            .map(|path| {
                let result = compile_file(&path, self.json_pointer.as_deref(), options);
                (path, result)
            })
            .collect();
        Ok(results)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Compile(target) => {
                let options = target.compiler_settings.load_options()?;
                let results = target.input_settings.compile_all(&options)?;
                let mut failures = 0usize;
                for (path, result) in results {
                    match result {
                        Ok(program) => {
                            let source = if target.function {
                                program.to_function_source()
                            } else {
                                program.source.clone()
                            };
                            match target.out_dir.as_ref() {
                                Some(out_dir) => {
                                    let written = write_outputs(out_dir, &path, &source, &program)?;
                                    eprintln!(
                                        "{} {} → {}",
                                        "compiled".green().bold(),
                                        path.display(),
                                        written.display()
                                    );
                                }
                                None => println!("{source}"),
                            }
                        }
                        Err(error) => {
                            failures += 1;
                            eprintln!("{} {}: {error:#}", "failed".red().bold(), path.display());
                        }
                    }
                }
                if failures > 0 {
                    bail!("{failures} input(s) failed to compile");
                }
                Ok(())
            }
            Command::Inspect(target) => {
                let options = target.compiler_settings.load_options()?;
                let results = target.input_settings.compile_all(&options)?;
                let mut report = serde_json::Map::new();
                for (path, result) in results {
                    let program =
                        result.with_context(|| format!("failed to compile {}", path.display()))?;
                    report.insert(
                        path.to_string_lossy().to_string(),
                        serde_json::json!({
                            "isAsync": program.is_async,
                            "fields": program.fields,
                        }),
                    );
                }
                let report_src = serde_json::to_string_pretty(&report)?;
                match target.out.as_ref() {
                    Some(out) => {
                        if let Some(parent) = out.parent() {
                            std::fs::create_dir_all(parent)?;
                        }
                        std::fs::write(out, &report_src)
                            .with_context(|| format!("failed to write {}", out.display()))?;
                    }
                    None => println!("{report_src}"),
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn compile_file(
    path: &Path,
    json_pointer: Option<&str>,
    options: &CompilerOptions,
) -> anyhow::Result<CompiledProgram> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {}", path.display()))?;
    let bundle = load_bundle(&source, json_pointer)
        .with_context(|| format!("failed to decode schema bundle {}", path.display()))?;
    let program = Compiler::new(bundle.refs)
        .with_options(options.clone())
        .compile(&bundle.root)?;
    Ok(program)
}

/// Write `<stem>.js` and `<stem>.refs.json`; returns the `.js` path.
fn write_outputs(
    out_dir: &Path,
    input: &Path,
    source: &str,
    program: &CompiledProgram,
) -> anyhow::Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("input path has no usable file stem: {}", input.display()))?;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;
    let js_path = out_dir.join(format!("{stem}.js"));
    let refs_path = out_dir.join(format!("{stem}.refs.json"));
    std::fs::write(&js_path, source)
        .with_context(|| format!("failed to write {}", js_path.display()))?;
    std::fs::write(&refs_path, serde_json::to_string_pretty(&program.refs)?)
        .with_context(|| format!("failed to write {}", refs_path.display()))?;
    Ok(js_path)
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Explicit glob that matched nothing is an error, not a no-op.
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
