//! Extension table and language classification
//!
//! The table defines the fixed universe of files that count as code.
//! Anything not listed here is skipped by the scanner.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Label returned for extensions that are not in the table
pub const OTHER_LANGUAGE: &str = "Other";

/// Recognized extensions (lowercase, leading dot) and their language names
const EXTENSION_TABLE: &[(&str, &str)] = &[
    (".py", "Python"),
    (".js", "JavaScript"),
    (".jsx", "React"),
    (".ts", "TypeScript"),
    (".tsx", "React TypeScript"),
    (".html", "HTML"),
    (".css", "CSS"),
    (".scss", "SCSS"),
    (".java", "Java"),
    (".c", "C"),
    (".cpp", "C++"),
    (".h", "C/C++ Header"),
    (".cs", "C#"),
    (".php", "PHP"),
    (".rb", "Ruby"),
    (".go", "Go"),
    (".rs", "Rust"),
    (".swift", "Swift"),
    (".kt", "Kotlin"),
    (".dart", "Dart"),
    (".sql", "SQL"),
    (".sh", "Shell"),
    (".bat", "Batch"),
    (".ps1", "PowerShell"),
    (".yaml", "YAML"),
    (".yml", "YAML"),
    (".json", "JSON"),
    (".md", "Markdown"),
    (".xml", "XML"),
    (".vue", "Vue"),
    (".scala", "Scala"),
    (".m", "Objective-C"),
    (".mm", "Objective-C++"),
    (".r", "R"),
];

static LANGUAGES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| EXTENSION_TABLE.iter().copied().collect());

/// Normalize an extension to the table's key form: lowercase with a leading dot.
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}

/// Map an extension to its language name, or [`OTHER_LANGUAGE`] if unknown.
///
/// Case-insensitive; the leading dot is optional.
pub fn language_for(ext: &str) -> &'static str {
    LANGUAGES
        .get(normalize_extension(ext).as_str())
        .copied()
        .unwrap_or(OTHER_LANGUAGE)
}

/// Whether files with this extension are counted as code
pub fn is_code_extension(ext: &str) -> bool {
    LANGUAGES.contains_key(normalize_extension(ext).as_str())
}

/// All recognized extensions in table order
pub fn extensions() -> impl Iterator<Item = &'static str> {
    EXTENSION_TABLE.iter().map(|(ext, _)| *ext)
}
