use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "cellgraph", version, about = "draw.io cell graph integrity checker")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log filter used when CELLGRAPH_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check a .drawio file, or every diagram in a directory.
    Check {
        /// File or directory.
        path: PathBuf,

        /// Descend into subdirectories.
        #[arg(long, short)]
        recursive: bool,

        /// File name suffix to collect from directories (repeatable).
        /// Default: .drawio and .drawio.svg
        #[arg(long = "ext", value_name = "SUFFIX")]
        extensions: Vec<String>,

        /// Id of the document root cell.
        #[arg(long, default_value = cellgraph_core::defaults::DOCUMENT_ROOT_ID)]
        document_root: String,

        /// Id of the default layer cell.
        #[arg(long, default_value = cellgraph_core::defaults::LAYER_ROOT_ID)]
        layer_root: String,

        /// Largest document accepted, in bytes.
        #[arg(long, default_value_t = cellgraph_core::defaults::MAX_DOCUMENT_BYTES)]
        max_bytes: usize,

        /// Skip the deprecated stencil namespace scan.
        #[arg(long)]
        no_pattern_scan: bool,
    },

    /// List the integrity rules in evaluation order.
    Rules,
}
