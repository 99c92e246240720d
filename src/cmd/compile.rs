//! Compile command implementation
//!
//! Reads one or more Lua sources, runs the transform pipeline over them in
//! parallel, then records the results in history and usage stats on the
//! calling thread, in input order.

use anyhow::{Context, Result};
use chrono::Utc;
use console::style;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use crate::cmd::input::{read_file, read_input, write_file};
use crate::cmd::progress;
use crate::config::{ConfigLoader, Settings};
use crate::error::LuaCloakError;
use crate::fmt::{format_bytes, CHART, CHECKMARK, CROSSMARK, LOCK};
use crate::history::{CompileRecord, HistoryLedger, HistoryStore, StatsStore};
use crate::transform::{self, EncodingMethod, PipelineOptions, PipelineResult, TransformError};

/// Flags for `luacloak compile`
#[derive(Debug, Clone, Default)]
pub struct CompileArgs {
    /// Input files; empty means stdin
    pub files: Vec<PathBuf>,
    /// Directory for `.lua` outputs; `None` prints artifacts
    pub out_dir: Option<PathBuf>,
    /// Encoder override
    pub method: Option<EncodingMethod>,
    /// Force minification on
    pub minify: bool,
    /// Skip the history ledger
    pub no_history: bool,
    /// Print a JSON report instead of text
    pub json: bool,
    /// Skip the progress bar
    pub no_progress: bool,
}

/// One source to compile
#[derive(Debug, Clone)]
pub struct CompileJob {
    /// Where the source came from (`<stdin>` for stdin)
    pub name: String,
    /// Source text, already trimmed
    pub source: String,
}

/// A successful compile of one job
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    /// Job name
    pub name: String,
    /// Source text that was compiled
    pub source: String,
    /// Pipeline output
    pub result: PipelineResult,
}

/// Run the pipeline over every job in parallel
///
/// Results come back in job order.
pub fn compile_jobs(
    jobs: &[CompileJob],
    options: &PipelineOptions,
) -> Vec<Result<CompileOutcome, TransformError>> {
    jobs.par_iter()
        .map(|job| {
            transform::run(&job.source, options).map(|result| CompileOutcome {
                name: job.name.clone(),
                source: job.source.clone(),
                result,
            })
        })
        .collect()
}

/// Fold outcomes into the ledger, oldest first so the last input ends up newest
pub fn record_outcomes(
    ledger: HistoryLedger,
    outcomes: &[CompileOutcome],
    method: EncodingMethod,
    max_history: usize,
    now_millis: u64,
) -> HistoryLedger {
    outcomes.iter().fold(ledger, |ledger, outcome| {
        let id = ledger.next_id(now_millis);
        let record = CompileRecord::new(id, &outcome.source, &outcome.result.artifact, method);
        ledger.append(record, max_history)
    })
}

/// Output file for a job written into `out_dir`
///
/// Files map to `<stem>.obf.lua`; stdin maps to `compiled_<millis>.lua`.
pub fn output_path(out_dir: &Path, input: Option<&Path>, now_millis: u64) -> PathBuf {
    match input.and_then(|p| p.file_stem()) {
        Some(stem) => out_dir.join(format!("{}.obf.lua", stem.to_string_lossy())),
        None => out_dir.join(format!("compiled_{now_millis}.lua")),
    }
}

/// Output files for a batch written into `out_dir`, one per input
///
/// Inputs sharing a stem get `<stem>.1.obf.lua`, `<stem>.2.obf.lua`, and so
/// on, so no artifact in the batch overwrites another.
pub fn output_paths(out_dir: &Path, inputs: &[Option<&Path>], now_millis: u64) -> Vec<PathBuf> {
    let mut taken = HashSet::new();
    inputs
        .iter()
        .map(|&input| {
            let mut path = output_path(out_dir, input, now_millis);
            let stem = match input.and_then(|p| p.file_stem()) {
                Some(stem) => stem.to_string_lossy().into_owned(),
                None => format!("compiled_{now_millis}"),
            };
            let mut n = 0;
            while !taken.insert(path.clone()) {
                n += 1;
                path = out_dir.join(format!("{stem}.{n}.obf.lua"));
            }
            if n > 0 {
                warn!("output name taken, writing {}", path.display());
            }
            path
        })
        .collect()
}

/// Settings from `.luacloak.toml`, overridden by command-line flags
pub fn effective_settings(mut settings: Settings, args: &CompileArgs) -> Settings {
    if let Some(method) = args.method {
        settings.obfuscation_method = method;
    }
    if args.minify {
        settings.minify = true;
    }
    if args.no_history {
        settings.save_history = false;
    }
    settings
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    file: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    method: EncodingMethod,
    input_size: u64,
    output_size: u64,
    ratio: u8,
    rating: transform::Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    artifact: Option<&'a str>,
}

/// Main compile command handler
///
/// # Examples
///
/// ```no_run
/// use luacloak::cmd::compile::{cmd_compile, CompileArgs};
/// use std::path::PathBuf;
///
/// cmd_compile(&CompileArgs {
///     files: vec![PathBuf::from("main.lua")],
///     out_dir: Some(PathBuf::from("dist")),
///     ..Default::default()
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_compile(args: &CompileArgs) -> Result<()> {
    let project_root = env::current_dir()?;
    let settings = effective_settings(ConfigLoader::load(&project_root)?, args);
    let options = settings.to_pipeline_options();
    let now_millis = Utc::now().timestamp_millis().max(0) as u64;

    let jobs = if args.files.is_empty() {
        vec![CompileJob {
            name: "<stdin>".to_string(),
            source: read_input(None, "compile")?.trim().to_string(),
        }]
    } else {
        args.files
            .iter()
            .map(|path| {
                Ok(CompileJob {
                    name: path.display().to_string(),
                    source: read_file(path, "compile")?.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?
    };

    if progress::enabled(
        settings.enable_animations,
        settings.compile_delay_ms,
        args.no_progress,
        args.json,
    ) {
        progress::simulate(settings.compile_delay_ms);
    }

    info!(
        "compiling {} source(s) with {}",
        jobs.len(),
        settings.obfuscation_method
    );

    let mut outcomes = Vec::new();
    let mut first_error = None;
    for (job, result) in jobs.iter().zip(compile_jobs(&jobs, &options)) {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                eprintln!("{} {} skipped: {}", CROSSMARK, style(&job.name).yellow(), e);
                first_error.get_or_insert_with(|| (job.name.clone(), e));
            }
        }
    }

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let written: Vec<Option<PathBuf>> = match &args.out_dir {
        Some(dir) => {
            let inputs: Vec<Option<&Path>> = outcomes
                .iter()
                .map(|o| (o.name != "<stdin>").then(|| Path::new(&o.name)))
                .collect();
            let paths = output_paths(dir, &inputs, now_millis);
            for (outcome, path) in outcomes.iter().zip(&paths) {
                write_file(path, &outcome.result.artifact)?;
                debug!("wrote {}", path.display());
            }
            paths.into_iter().map(Some).collect()
        }
        None => vec![None; outcomes.len()],
    };

    if !outcomes.is_empty() {
        if settings.save_history {
            let store = HistoryStore::new(&project_root);
            let ledger = record_outcomes(
                store.load()?,
                &outcomes,
                settings.obfuscation_method,
                settings.max_history,
                now_millis,
            );
            store.save(&ledger)?;
        }
        StatsStore::new(&project_root).record(outcomes.len() as u64)?;
    }

    if args.json {
        present_json(&outcomes, &written, settings.obfuscation_method)?;
    } else {
        present_text(&outcomes, &written, settings.obfuscation_method);
    }

    match first_error {
        Some((name, e)) => {
            Err(anyhow::Error::new(LuaCloakError::from(e)).context(format!("{name} not compiled")))
        }
        None => Ok(()),
    }
}

/// Present artifacts and size figures
///
/// Artifacts not written to a file go to stdout; everything else goes to
/// stderr so the artifact can be piped.
fn present_text(outcomes: &[CompileOutcome], written: &[Option<PathBuf>], method: EncodingMethod) {
    for (outcome, path) in outcomes.iter().zip(written) {
        let result = &outcome.result;
        match path {
            Some(path) => eprintln!(
                "{} {} {} {}",
                LOCK,
                outcome.name,
                style("→").dim(),
                style(path.display()).bold()
            ),
            None => println!("{}", result.artifact),
        }
        eprintln!(
            "   {} {} ({}) → {} | ratio {}% | security {}",
            CHART,
            style(method).cyan(),
            format_bytes(result.input_size),
            style(format_bytes(result.output_size)).green(),
            result.ratio,
            style(result.rating).bold()
        );
    }

    if !outcomes.is_empty() {
        eprintln!("{} Code compiled successfully!", CHECKMARK);
    }
}

/// Present a JSON report on stdout
fn present_json(
    outcomes: &[CompileOutcome],
    written: &[Option<PathBuf>],
    method: EncodingMethod,
) -> Result<()> {
    let entries: Vec<JsonEntry<'_>> = outcomes
        .iter()
        .zip(written)
        .map(|(outcome, path)| JsonEntry {
            file: &outcome.name,
            output: path.as_ref().map(|p| p.display().to_string()),
            method,
            input_size: outcome.result.input_size,
            output_size: outcome.result.output_size,
            ratio: outcome.result.ratio,
            rating: outcome.result.rating,
            artifact: path.is_none().then_some(outcome.result.artifact.as_str()),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
