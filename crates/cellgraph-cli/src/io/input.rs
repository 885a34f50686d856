use std::path::{Path, PathBuf};

use anyhow::Result;
use cellgraph_core::prelude::{Report, SourceDocument, Stats};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Suffixes collected from directories when none are given.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".drawio", ".drawio.svg"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("'{}' not found", .0.display())]
    NotFound(PathBuf),
}

/// A file to check and the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: PathBuf,
    pub name: String,
}

/// A file that could not be read.
#[derive(Debug)]
pub struct Unreadable {
    pub name: String,
    pub error: std::io::Error,
}

impl Unreadable {
    pub fn into_report(self) -> Report {
        Report::new(
            self.name,
            vec![format!("failed to read file: {}", self.error)],
            Vec::new(),
            Stats::default(),
        )
    }
}

/// Resolve `path` to the files to check.
///
/// A file is taken as-is. A directory yields the entries whose names end in
/// one of `extensions`, top level only unless `recursive`, sorted by path.
pub fn discover(path: &Path, recursive: bool, extensions: &[String]) -> Result<Vec<Target>> {
    if path.is_file() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        return Ok(vec![Target {
            path: path.to_path_buf(),
            name,
        }]);
    }

    if !path.is_dir() {
        return Err(InputError::NotFound(path.to_path_buf()).into());
    }

    let suffixes: Vec<&str> = if extensions.is_empty() {
        DEFAULT_EXTENSIONS.to_vec()
    } else {
        extensions.iter().map(String::as_str).collect()
    };

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut targets = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if !suffixes.iter().any(|s| file_name.ends_with(s)) {
            continue;
        }
        targets.push(Target {
            name: relative_name(path, entry.path()),
            path: entry.into_path(),
        });
    }

    debug!(dir = %path.display(), found = targets.len(), "discovered documents");
    Ok(targets)
}

/// `entry` relative to `root`, with `/` separators.
fn relative_name(root: &Path, entry: &Path) -> String {
    let rel = entry.strip_prefix(root).unwrap_or(entry);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read every target concurrently; results keep the order of `targets`.
pub async fn read_documents(targets: &[Target]) -> Result<Vec<std::result::Result<SourceDocument, Unreadable>>> {
    let handles: Vec<_> = targets
        .iter()
        .cloned()
        .map(|t| tokio::spawn(async move { (tokio::fs::read(&t.path).await, t) }))
        .collect();

    let mut out = Vec::with_capacity(handles.len());
    for handle in handles {
        let (read, target) = handle.await?;
        match read {
            Ok(bytes) => out.push(Ok(SourceDocument::new(target.name, bytes))),
            Err(error) => {
                warn!(file = %target.path.display(), %error, "failed to read file");
                out.push(Err(Unreadable {
                    name: target.name,
                    error,
                }));
            }
        }
    }
    Ok(out)
}
