//! Compile every bundle under `fixtures/` twice and check the output is
//! stable and every binding name is unique.
//!
//! `--json` prints the per-fixture report as JSON instead of status lines.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use colored::Colorize;
use guardgen::{Compiler, CompilerOptions, load_bundle};
use serde_json::json;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("fixtures")
}

fn check_fixture(path: &Path) -> anyhow::Result<usize> {
    let source = std::fs::read_to_string(path)?;
    let bundle = load_bundle(&source, None)?;
    let options = match path.with_extension("options.json") {
        p if p.exists() => CompilerOptions::from_json_str(&std::fs::read_to_string(&p)?)?,
        _ => CompilerOptions::default(),
    };

    let compile = || {
        Compiler::new(bundle.refs.clone())
            .with_options(options.clone())
            .compile(&bundle.root)
    };
    let first = compile()?;
    let second = compile()?;
    if first.source != second.source {
        bail!("two compilations produced different source");
    }

    let mut seen = HashSet::new();
    for field in &first.fields {
        if !seen.insert(field.variable_name.as_str()) {
            bail!("variable `{}` declared twice", field.variable_name);
        }
    }
    Ok(first.fields.len())
}

fn fixture_report(name: &str, outcome: Result<usize, &anyhow::Error>) -> serde_json::Value {
    match outcome {
        Ok(fields) => json!({ "fixture": name, "ok": true, "fields": fields }),
        Err(error) => json!({ "fixture": name, "ok": false, "error": format!("{error:#}") }),
    }
}

fn main() -> anyhow::Result<()> {
    let as_json = std::env::args().skip(1).any(|arg| arg == "--json");
    let pattern = fixtures_dir().join("*.json");
    let pattern = pattern.to_str().context("fixtures path is not valid UTF-8")?;
    let mut failures = 0usize;
    let mut reports = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry?;
        if path.to_string_lossy().ends_with(".options.json") {
            continue;
        }
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        match check_fixture(&path) {
            Ok(fields) => {
                if !as_json {
                    println!("{} {} ({fields} fields)", "ok".green().bold(), path.display());
                }
                reports.push(fixture_report(&name, Ok(fields)));
            }
            Err(error) => {
                failures += 1;
                if !as_json {
                    println!("{} {}: {error:#}", "FAIL".red().bold(), path.display());
                }
                reports.push(fixture_report(&name, Err(&error)));
            }
        }
    }
    let total = reports.len();
    if as_json {
        let summary = json!({ "total": total, "failures": failures, "fixtures": reports });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{total} fixture(s), {failures} failure(s)");
    }
    if failures > 0 {
        bail!("{failures} fixture(s) failed");
    }
    Ok(())
}
