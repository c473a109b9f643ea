//! File-type filters offered by the open and save prompts.

use std::path::Path;

/// Plain text, markup and data formats.
pub const TEXT_EXTS: &[&str] = &[
    "txt",
    "md",
    "markdown",
    "rst",
    "csv",
    "tsv",
    "log",
    "ini",
    "cfg",
    "conf",
    "env",
    "properties",
    "json",
    "jsonc",
    "toml",
    "yaml",
    "yml",
    "xml",
];

/// Source code formats.
pub const CODE_EXTS: &[&str] = &[
    "js", "jsx", "cjs", "mjs", "ts", "tsx", "svelte", "vue", "py", "rb", "php", "pl", "pm", "sh",
    "bash", "zsh", "ps1", "psm1", "psd1", "c", "h", "hpp", "hh", "hxx", "cpp", "cc", "cxx", "ino",
    "m", "mm", "java", "kt", "kts", "scala", "go", "rs", "swift", "dart", "r", "jl", "lua", "hs",
    "clj", "cljs", "edn", "ex", "exs", "erl", "hrl", "nim", "zig", "sql",
];

/// A named group of extensions, shown as one entry in a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

impl FileFilter {
    /// Whether `path` has one of this filter's extensions (case-insensitive).
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(ext))
            })
    }
}

/// The filters used by both the open and the save prompt.
pub fn default_filters() -> [FileFilter; 2] {
    [
        FileFilter {
            name: "Text/Markdown",
            extensions: TEXT_EXTS,
        },
        FileFilter {
            name: "Code",
            extensions: CODE_EXTS,
        },
    ]
}

/// Whether any default filter accepts `path`.
pub fn is_supported(path: &Path) -> bool {
    default_filters().iter().any(|filter| filter.matches(path))
}
