//! Tree and contents listing of a project directory.

use std::io::Write;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::DumpError;
use super::filter::DumpFilter;

const SEPARATOR: &str = "----------";

/// Counters for a finished dump.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DumpStats {
    pub dirs: usize,
    pub files: usize,
    pub unreadable: usize,
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}

/// Every kept entry under `root`, depth-first, siblings sorted by name.
fn collect_entries(root: &Path, filter: &DumpFilter) -> Vec<DirEntry> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry_name(entry);
            if entry.file_type().is_dir() {
                !filter.excludes_dir(&name)
            } else {
                !filter.excludes_file(&name)
            }
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .collect()
}

/// For each entry, whether no later sibling follows it.
fn last_flags(entries: &[DirEntry]) -> Vec<bool> {
    let mut flags = vec![false; entries.len()];
    let mut sibling_below: Vec<bool> = Vec::new();

    for (i, entry) in entries.iter().enumerate().rev() {
        let depth = entry.depth();
        if sibling_below.len() <= depth {
            sibling_below.resize(depth + 1, false);
        }
        flags[i] = !sibling_below[depth];
        sibling_below[depth] = true;
        sibling_below.truncate(depth + 1);
    }

    flags
}

/// Tree lines using box-drawing connectors, one per entry.
pub fn tree_lines(entries: &[DirEntry]) -> Vec<String> {
    let flags = last_flags(entries);
    let mut ancestors: Vec<bool> = Vec::new();
    let mut lines = Vec::with_capacity(entries.len());

    for (entry, is_last) in entries.iter().zip(flags) {
        ancestors.truncate(entry.depth().saturating_sub(1));

        let mut line: String = ancestors
            .iter()
            .map(|last| if *last { "    " } else { "│   " })
            .collect();
        line.push_str(if is_last { "└── " } else { "├── " });
        line.push_str(&entry_name(entry));
        lines.push(line);

        ancestors.push(is_last);
    }

    lines
}

/// `/`-separated path of `path` relative to `root`, with a leading slash.
fn display_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("/{}", parts.join("/"))
}

fn root_name(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| root.display().to_string())
}

/// Write the tree of `root` followed by the text of every kept file.
pub fn dump_project<W: Write>(
    root: &Path,
    filter: &DumpFilter,
    out: &mut W,
) -> Result<DumpStats, DumpError> {
    if !root.is_dir() {
        return Err(DumpError::NotADirectory(root.to_path_buf()));
    }

    let entries = collect_entries(root, filter);
    let mut stats = DumpStats::default();

    writeln!(out, "File Tree Structure:")?;
    writeln!(out, "{}", root_name(root))?;
    for line in tree_lines(&entries) {
        writeln!(out, "{line}")?;
    }

    write!(out, "\n\nFile Contents:\n\n")?;
    for entry in &entries {
        if entry.file_type().is_dir() {
            stats.dirs += 1;
            continue;
        }

        let path = display_path(root, entry.path());
        match std::fs::read_to_string(entry.path()) {
            Ok(content) => {
                debug!("Dumping {}", path);
                write!(out, "Ruta: {path}\nCode:\n{content}\n\n{SEPARATOR}\n\n")?;
                stats.files += 1;
            }
            Err(e) => {
                warn!("Could not read {}: {}", path, e);
                write!(out, "Ruta: {path}\nError reading file: {e}\n\n{SEPARATOR}\n\n")?;
                stats.unreadable += 1;
            }
        }
    }

    Ok(stats)
}
