//! Which directories and files a dump leaves out.

use std::path::Path;

const EXCLUDED_DIRS: [&str; 21] = [
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".vscode",
    ".idea",
    "bin",
    "obj",
    ".github",
    ".next",
    "out",
    "__pycache__",
    ".nuxt",
    ".cache",
    "vendor",
    "bower_components",
    "tmp",
    "temp",
    "public",
    "static",
];

/// Matched against the file name without its last extension.
const EXCLUDED_STEMS: [&str; 8] = [
    "package-lock",
    "yarn.lock",
    ".DS_Store",
    "thumbs",
    ".dockerignore",
    ".env",
    ".gitignore",
    "Dockerfile",
];

const EXCLUDED_EXTENSIONS: [&str; 10] = [
    "log",
    "lock",
    "gitignore",
    "gitattributes",
    "env",
    "bak",
    "tmp",
    "swp",
    "map",
    "tsbuildinfo",
];

const EXCLUDED_NAMES: [&str; 11] = [
    "package-lock.json",
    "yarn.lock",
    ".npmrc",
    ".yarnrc",
    ".prettierrc",
    ".eslintrc.json",
    ".eslintrc.js",
    ".prettierignore",
    "README.md",
    "LICENSE",
    "CHANGELOG.md",
];

/// Name-based exclusion rules. Names are compared case-sensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpFilter {
    pub dirs: Vec<String>,
    pub stems: Vec<String>,
    pub extensions: Vec<String>,
    pub names: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for DumpFilter {
    fn default() -> Self {
        Self {
            dirs: owned(&EXCLUDED_DIRS),
            stems: owned(&EXCLUDED_STEMS),
            extensions: owned(&EXCLUDED_EXTENSIONS),
            names: owned(&EXCLUDED_NAMES),
        }
    }
}

impl DumpFilter {
    /// No exclusions at all.
    pub fn empty() -> Self {
        Self {
            dirs: Vec::new(),
            stems: Vec::new(),
            extensions: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Also skip directories with these names.
    pub fn with_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Extensions may be given with or without the leading dot.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions.extend(
            extensions
                .into_iter()
                .map(|e| e.into().trim_start_matches('.').to_string()),
        );
        self
    }

    fn contains(list: &[String], value: &str) -> bool {
        list.iter().any(|item| item == value)
    }

    pub fn excludes_dir(&self, name: &str) -> bool {
        Self::contains(&self.dirs, name)
    }

    pub fn excludes_file(&self, name: &str) -> bool {
        if Self::contains(&self.names, name) {
            return true;
        }

        let path = Path::new(name);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
        if Self::contains(&self.stems, stem) {
            return true;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| Self::contains(&self.extensions, e))
    }
}
