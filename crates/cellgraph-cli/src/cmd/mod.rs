use std::process::ExitCode;

use anyhow::Result;

use crate::args::{Cli, Command};

mod check;
mod rules;

pub async fn dispatch(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Check {
            path,
            recursive,
            extensions,
            document_root,
            layer_root,
            max_bytes,
            no_pattern_scan,
        } => {
            let opts = check::CheckOptions {
                path,
                recursive,
                extensions,
                document_root,
                layer_root,
                max_bytes,
                pattern_scan: !no_pattern_scan,
            };
            check::run(opts).await
        }
        Command::Rules => rules::run(),
    }
}
