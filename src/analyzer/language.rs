//! Language Classification
//!
//! Fixed extension table mapping file paths to language display names.
//! Anything not in the table lands in the `Unknown` bucket.
//!
//! ```rust,ignore
//! use codegrade::analyzer::language::Language;
//!
//! assert_eq!(Language::from_path("src/main.rs").as_str(), "Rust");
//! assert_eq!(Language::from_path("notes.xyz").as_str(), "Unknown");
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

// =============================================================================
// Language Metadata Table
// =============================================================================

struct LanguageMeta {
    /// Display name, also the key in per-project language counts
    display_name: &'static str,
    /// Code fence identifier used when embedding source in prompts
    highlight_str: &'static str,
    extensions: &'static [&'static str],
}

macro_rules! lang_meta {
    ($display:literal, $highlight:literal, [$($ext:literal),*]) => {
        LanguageMeta {
            display_name: $display,
            highlight_str: $highlight,
            extensions: &[$($ext),*],
        }
    };
}

impl Language {
    fn meta(&self) -> LanguageMeta {
        match self {
            // Systems Languages
            Language::Rust => lang_meta!("Rust", "rust", ["rs"]),
            Language::Go => lang_meta!("Go", "go", ["go"]),
            Language::C => lang_meta!("C", "c", ["c", "h"]),
            Language::Cpp => lang_meta!("C++", "cpp", ["cpp", "cc", "cxx", "hpp", "hh", "hxx"]),
            Language::Zig => lang_meta!("Zig", "zig", ["zig"]),

            // JVM Languages
            Language::Java => lang_meta!("Java", "java", ["java"]),
            Language::Kotlin => lang_meta!("Kotlin", "kotlin", ["kt", "kts"]),
            Language::Scala => lang_meta!("Scala", "scala", ["scala", "sc"]),

            // Web Languages
            Language::TypeScript => lang_meta!("TypeScript", "typescript", ["ts", "tsx", "mts", "cts"]),
            Language::JavaScript => lang_meta!("JavaScript", "javascript", ["js", "jsx", "mjs", "cjs"]),
            Language::Html => lang_meta!("HTML", "html", ["html", "htm"]),
            Language::Css => lang_meta!("CSS", "css", ["css", "scss", "sass", "less"]),
            Language::Vue => lang_meta!("Vue", "vue", ["vue"]),
            Language::Svelte => lang_meta!("Svelte", "svelte", ["svelte"]),

            // Scripting Languages
            Language::Python => lang_meta!("Python", "python", ["py", "pyi", "pyw"]),
            Language::Ruby => lang_meta!("Ruby", "ruby", ["rb", "rake"]),
            Language::Php => lang_meta!("PHP", "php", ["php"]),
            Language::Perl => lang_meta!("Perl", "perl", ["pl", "pm"]),
            Language::Lua => lang_meta!("Lua", "lua", ["lua"]),
            Language::R => lang_meta!("R", "r", ["r"]),

            // Shell
            Language::Shell => lang_meta!("Shell", "bash", ["sh", "bash", "zsh", "fish"]),
            Language::PowerShell => lang_meta!("PowerShell", "powershell", ["ps1", "psm1"]),

            // Mobile
            Language::Swift => lang_meta!("Swift", "swift", ["swift"]),
            Language::ObjectiveC => lang_meta!("Objective-C", "objectivec", ["m", "mm"]),
            Language::Dart => lang_meta!("Dart", "dart", ["dart"]),

            // .NET
            Language::CSharp => lang_meta!("C#", "csharp", ["cs"]),
            Language::FSharp => lang_meta!("F#", "fsharp", ["fs", "fsx"]),

            // Functional
            Language::Elixir => lang_meta!("Elixir", "elixir", ["ex", "exs"]),
            Language::Erlang => lang_meta!("Erlang", "erlang", ["erl", "hrl"]),
            Language::Haskell => lang_meta!("Haskell", "haskell", ["hs"]),
            Language::OCaml => lang_meta!("OCaml", "ocaml", ["ml", "mli"]),

            // Data/Config
            Language::Sql => lang_meta!("SQL", "sql", ["sql"]),
            Language::Yaml => lang_meta!("YAML", "yaml", ["yaml", "yml"]),
            Language::Json => lang_meta!("JSON", "json", ["json"]),
            Language::Toml => lang_meta!("TOML", "toml", ["toml"]),
            Language::Xml => lang_meta!("XML", "xml", ["xml"]),
            Language::Markdown => lang_meta!("Markdown", "markdown", ["md", "markdown"]),

            Language::Unknown => lang_meta!("Unknown", "text", []),
        }
    }
}

// =============================================================================
// Language Enum Definition
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    // Systems Languages
    Rust,
    Go,
    C,
    Cpp,
    Zig,

    // JVM Languages
    Java,
    Kotlin,
    Scala,

    // Web Languages
    TypeScript,
    JavaScript,
    Html,
    Css,
    Vue,
    Svelte,

    // Scripting Languages
    Python,
    Ruby,
    Php,
    Perl,
    Lua,
    R,

    // Shell
    Shell,
    PowerShell,

    // Mobile
    Swift,
    ObjectiveC,
    Dart,

    // .NET
    CSharp,
    FSharp,

    // Functional
    Elixir,
    Erlang,
    Haskell,
    OCaml,

    // Data/Config
    Sql,
    Yaml,
    Json,
    Toml,
    Xml,
    Markdown,

    #[default]
    Unknown,
}

impl Language {
    /// Display name (human-readable)
    pub fn as_str(&self) -> &'static str {
        self.meta().display_name
    }

    /// Code fence identifier for this language
    pub fn highlight_str(&self) -> &'static str {
        self.meta().highlight_str
    }

    /// Detect language from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Self {
        let ext_lower = ext.to_lowercase();

        Self::all_variants()
            .iter()
            .find(|lang| lang.meta().extensions.contains(&ext_lower.as_str()))
            .copied()
            .unwrap_or(Language::Unknown)
    }

    /// Detect language from a file path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Language::Unknown)
    }

    fn all_variants() -> &'static [Language] {
        &[
            Language::Rust, Language::Go, Language::C, Language::Cpp, Language::Zig,
            Language::Java, Language::Kotlin, Language::Scala,
            Language::TypeScript, Language::JavaScript, Language::Html, Language::Css,
            Language::Vue, Language::Svelte, Language::Python, Language::Ruby,
            Language::Php, Language::Perl, Language::Lua, Language::R,
            Language::Shell, Language::PowerShell, Language::Swift,
            Language::ObjectiveC, Language::Dart, Language::CSharp, Language::FSharp,
            Language::Elixir, Language::Erlang, Language::Haskell, Language::OCaml,
            Language::Sql, Language::Yaml, Language::Json, Language::Toml,
            Language::Xml, Language::Markdown,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("rs"), Language::Rust);
        assert_eq!(Language::from_extension("RS"), Language::Rust);
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("tsx"), Language::TypeScript);
        assert_eq!(Language::from_extension("xyz"), Language::Unknown);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path("src/main.rs").as_str(), "Rust");
        assert_eq!(Language::from_path("a.py").as_str(), "Python");
        assert_eq!(Language::from_path("notes.xyz").as_str(), "Unknown");
        assert_eq!(Language::from_path("Makefile"), Language::Unknown);
        assert_eq!(Language::from_path(".gitignore"), Language::Unknown);
    }

    #[test]
    fn test_extensions_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for lang in Language::all_variants() {
            for ext in lang.meta().extensions {
                assert!(seen.insert(*ext), "duplicate extension: {}", ext);
            }
        }
    }

    #[test]
    fn test_highlight_str() {
        assert_eq!(Language::Rust.highlight_str(), "rust");
        assert_eq!(Language::Unknown.highlight_str(), "text");
        assert!(!Language::Unknown.is_known());
    }
}
