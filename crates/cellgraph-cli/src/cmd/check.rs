use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use cellgraph_core::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use crate::io::input;
use crate::output;

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub path: PathBuf,
    pub recursive: bool,
    pub extensions: Vec<String>,
    pub document_root: String,
    pub layer_root: String,
    pub max_bytes: usize,
    pub pattern_scan: bool,
}

impl CheckOptions {
    fn checker_config(&self) -> Result<CheckerConfig> {
        let cfg = CheckerConfig {
            roots: RootIds::new(&self.document_root, &self.layer_root),
            limits: ParseLimits {
                max_document_bytes: self.max_bytes,
            },
            scan_deprecated_patterns: self.pattern_scan,
        };
        validate_config(&cfg)?;
        Ok(cfg)
    }
}

#[derive(Debug, Serialize)]
pub struct CheckOut {
    pub ok: bool,
    pub verdict: Verdict,
    pub reports: Vec<Report>,
}

pub async fn run(opts: CheckOptions) -> Result<ExitCode> {
    let checker = IntegrityChecker::new(opts.checker_config()?);
    let targets = input::discover(&opts.path, opts.recursive, &opts.extensions)?;

    if targets.is_empty() {
        let verdict = aggregate(&[]);
        if output::is_json() {
            output::print(&CheckOut {
                ok: false,
                verdict,
                reports: Vec::new(),
            })?;
        } else {
            output::eprintln_line(&format!(
                "No .drawio files found in '{}'",
                opts.path.display()
            ));
        }
        return Ok(ExitCode::FAILURE);
    }

    let pb = if output::is_json() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(80));

    pb.set_message(format!("reading {} file(s)", targets.len()));
    let loaded = input::read_documents(&targets).await?;

    pb.set_message("checking");
    let mut docs = Vec::new();
    let mut slots = Vec::with_capacity(loaded.len());
    for item in loaded {
        match item {
            Ok(doc) => {
                docs.push(doc);
                slots.push(None);
            }
            Err(unreadable) => slots.push(Some(unreadable.into_report())),
        }
    }
    let mut checked = validate_batch(&docs, &checker).into_iter();
    let reports: Vec<Report> = slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| checked.next()))
        .collect();

    pb.finish_and_clear();

    let verdict = aggregate(&reports);
    info!(
        files = reports.len(),
        invalid = reports.iter().filter(|r| !r.is_valid()).count(),
        verdict = verdict.as_str(),
        "check finished"
    );

    if output::is_json() {
        output::print(&CheckOut {
            ok: verdict.is_success(),
            verdict,
            reports,
        })?;
    } else {
        let mut out = output::stdout();
        for r in &reports {
            output::write_report(&mut out, r)?;
        }
        output::write_summary(&mut out, verdict)?;
    }

    Ok(if verdict.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
