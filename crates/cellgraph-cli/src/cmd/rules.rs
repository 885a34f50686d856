use std::process::ExitCode;

use anyhow::Result;
use cellgraph_core::prelude::IntegrityChecker;
use serde::Serialize;

use crate::output;

#[derive(Debug, Serialize)]
pub struct RuleOut {
    pub id: &'static str,
    pub description: &'static str,
}

pub fn run() -> Result<ExitCode> {
    let checker = IntegrityChecker::default();
    let rules: Vec<RuleOut> = checker
        .rules()
        .iter()
        .map(|r| RuleOut {
            id: r.id(),
            description: r.description(),
        })
        .collect();

    if output::is_json() {
        output::print(&rules)?;
    } else {
        for r in &rules {
            println!("{:<20} {}", r.id, r.description);
        }
    }
    Ok(ExitCode::SUCCESS)
}
