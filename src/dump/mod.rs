//! Plain-text dump of a project: file tree, then every file's contents.

mod filter;
mod writer;

pub use filter::DumpFilter;
pub use writer::{DumpStats, dump_project, tree_lines};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while dumping a project.
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(path: &Path, bytes: &[u8]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, bytes).unwrap();
    }

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(&root.join("Cargo.toml"), b"[package]");
        write(&root.join("src/main.rs"), b"fn main() {}");
        write(&root.join("src/lib.rs"), b"pub mod a;");
        write(&root.join("node_modules/x.js"), b"module.exports = 1;");
        write(&root.join("README.md"), b"# Proyecto");
        write(&root.join("app.log"), b"log");
        write(&root.join(".env"), b"KEY=1");
        write(&root.join("datos.bin"), &[0xff, 0xfe, 0x00]);
        temp_dir
    }

    fn dump(root: &Path, filter: &DumpFilter) -> (String, DumpStats) {
        let mut out = Vec::new();
        let stats = dump_project(root, filter, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    // ===========================================
    // Filter tests
    // ===========================================

    #[test]
    fn test_filter_defaults() {
        let filter = DumpFilter::default();

        assert!(filter.excludes_dir("node_modules"));
        assert!(filter.excludes_dir(".git"));
        assert!(!filter.excludes_dir("src"));

        assert!(filter.excludes_file(".env"));
        assert!(filter.excludes_file("package-lock.json"));
        assert!(filter.excludes_file("server.log"));
        assert!(filter.excludes_file("Dockerfile"));
        assert!(filter.excludes_file(".eslintrc.json"));
        assert!(filter.excludes_file("README.md"));
        assert!(!filter.excludes_file("main.rs"));
        assert!(!filter.excludes_file("readme.md"));
    }

    #[test]
    fn test_filter_extensions_accept_leading_dot() {
        let filter = DumpFilter::empty()
            .with_extensions([".csv", "pdf"])
            .with_dirs(["Gestion"]);

        assert!(filter.excludes_file("datos.csv"));
        assert!(filter.excludes_file("reporte.pdf"));
        assert!(!filter.excludes_file("app.log"));
        assert!(filter.excludes_dir("Gestion"));
    }

    // ===========================================
    // Dump tests
    // ===========================================

    #[test]
    fn test_dump_tree_section() {
        let temp_dir = project();
        let (text, _) = dump(temp_dir.path(), &DumpFilter::default());

        let name = temp_dir
            .path()
            .canonicalize()
            .unwrap()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        let expected = format!(
            "File Tree Structure:\n{name}\n\
             ├── Cargo.toml\n\
             ├── datos.bin\n\
             └── src\n    \
             ├── lib.rs\n    \
             └── main.rs\n\n\nFile Contents:\n\n"
        );
        assert!(text.starts_with(&expected), "got:\n{text}");
    }

    #[test]
    fn test_dump_contents_section() {
        let temp_dir = project();
        let (text, stats) = dump(temp_dir.path(), &DumpFilter::default());

        assert!(text.contains("Ruta: /Cargo.toml\nCode:\n[package]\n\n----------\n\n"));
        assert!(text.contains("Ruta: /src/main.rs\nCode:\nfn main() {}\n\n----------\n\n"));
        assert!(text.contains("Ruta: /datos.bin\nError reading file: "));
        assert!(!text.contains("module.exports"));
        assert!(!text.contains("KEY=1"));

        let lib = text.find("Ruta: /src/lib.rs").unwrap();
        let main = text.find("Ruta: /src/main.rs").unwrap();
        assert!(lib < main);

        assert_eq!(
            stats,
            DumpStats {
                dirs: 1,
                files: 3,
                unreadable: 1,
            }
        );
    }

    #[test]
    fn test_tree_prefixes_nested_last_branch() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(&root.join("a/b/c.txt"), b"c");
        write(&root.join("a/d.txt"), b"d");
        write(&root.join("z.txt"), b"z");

        let (text, _) = dump(root, &DumpFilter::empty());
        let tree: Vec<&str> = text.lines().skip(2).take(5).collect();
        assert_eq!(
            tree,
            vec![
                "├── a",
                "│   ├── b",
                "│   │   └── c.txt",
                "│   └── d.txt",
                "└── z.txt",
            ]
        );
    }

    #[test]
    fn test_dump_rejects_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let result = dump_project(&temp_dir.path().join("nada"), &DumpFilter::default(), &mut out);
        assert!(matches!(result, Err(DumpError::NotADirectory(_))));
    }
}
