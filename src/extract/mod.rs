pub mod markdown;
pub mod plaintext;
pub mod po;
pub mod source_code;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::chunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Markdown,
    SourceCode,
    Translation,
    PlainText,
}

impl FileKind {
    /// Detect a supported file kind from the extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "md" | "mdx" | "markdown" => Some(FileKind::Markdown),
            "rs" | "js" | "mjs" | "ts" | "tsx" | "jsx" | "py" | "pyi" | "go" | "java" | "c"
            | "h" | "cpp" | "cc" | "hpp" => Some(FileKind::SourceCode),
            "po" => Some(FileKind::Translation),
            "txt" | "text" => Some(FileKind::PlainText),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Glob patterns to leave out of the walk.
    pub exclude: Vec<String>,
    /// Also descend into hidden files and directories.
    pub process_hidden: bool,
}

/// Walks a tree and extracts raw string constants from every supported file,
/// spreading file batches across a reusable worker pool.
pub struct Extractor {
    pool: rayon::ThreadPool,
}

impl Extractor {
    pub fn new(jobs: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("Failed to build extraction worker pool")?;
        Ok(Self { pool })
    }

    /// Collect the union of raw strings from every supported file under `path`.
    ///
    /// Worker results merge by set union, so completion order is irrelevant.
    pub fn collect_strings(&self, path: &Path, options: &WalkOptions) -> Result<HashSet<String>> {
        let files = if path.is_dir() {
            walk_files(path, options)?
        } else {
            vec![path.to_path_buf()]
        };
        debug!(files = files.len(), "starting extraction");
        if files.is_empty() {
            return Ok(HashSet::new());
        }

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} scanning {pos}/{len} files")
                .unwrap(),
        );

        let workers = self.pool.current_num_threads().max(1);
        let batch_size = files.len().div_ceil(workers);
        let batches: Vec<&[PathBuf]> = chunk::chunks(&files, batch_size)?.collect();

        let merged = self.pool.install(|| {
            batches
                .par_iter()
                .map(|batch| extract_from_files(batch, &progress))
                .reduce(HashSet::new, |mut union, part| {
                    union.extend(part);
                    union
                })
        });

        progress.finish_and_clear();
        Ok(merged)
    }
}

fn walk_files(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let mut overrides = OverrideBuilder::new(root);
    for pattern in &options.exclude {
        overrides
            .add(&format!("!{pattern}"))
            .with_context(|| format!("Invalid exclude pattern: {pattern}"))?;
    }
    let overrides = overrides
        .build()
        .context("Failed to compile exclude patterns")?;

    let mut files = Vec::new();
    for entry in WalkBuilder::new(root)
        .hidden(!options.process_hidden)
        .overrides(overrides)
        .build()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_some_and(|t| t.is_file()) && FileKind::from_path(path).is_some() {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn extract_from_files(paths: &[PathBuf], progress: &ProgressBar) -> HashSet<String> {
    let mut constants = HashSet::new();
    for path in paths {
        progress.inc(1);
        let Some(kind) = FileKind::from_path(path) else {
            continue;
        };
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            // Binary or badly encoded files are not worth failing the run over.
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unreadable file");
                continue;
            }
        };
        debug!(path = %path.display(), "extracting string constants");
        let strings = match kind {
            FileKind::Markdown => markdown::extract(&content),
            FileKind::SourceCode => source_code::extract(&content),
            FileKind::Translation => po::extract(&content),
            FileKind::PlainText => plaintext::extract(&content),
        };
        constants.extend(strings);
    }
    constants
}
