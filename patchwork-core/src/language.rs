//! Heuristic programming-language detection for snippet text
//!
//! A fixed catalog of per-language rules scores a sample by counting regex
//! matches in its text; an optional filename hint is scored through a
//! separate pattern list at triple weight. The highest-scoring language
//! wins, with `Plaintext` as the fallback when nothing matches.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Multiplier applied to filename-pattern hits over content-pattern hits.
const FILENAME_WEIGHT: u32 = 3;

/// Flat score granted when the sample parses as JSON outright.
const JSON_STRUCTURAL_BONUS: u32 = 10;

/// A supported language tag.
///
/// `Plaintext` is the sentinel for "no signal" and has no detection rule.
/// Unrecognized tags in persisted data deserialize to `Plaintext` rather
/// than failing the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
    Python,
    Java,
    Go,
    Rust,
    Cpp,
    C,
    Csharp,
    Php,
    Ruby,
    Swift,
    Kotlin,
    Dart,
    Bash,
    Powershell,
    Sql,
    Html,
    Css,
    Scss,
    Json,
    Yaml,
    Xml,
    Markdown,
    #[serde(other)]
    Plaintext,
}

impl Language {
    /// The stable lowercase tag used in persisted data.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Csharp => "csharp",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Dart => "dart",
            Language::Bash => "bash",
            Language::Powershell => "powershell",
            Language::Sql => "sql",
            Language::Html => "html",
            Language::Css => "css",
            Language::Scss => "scss",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Xml => "xml",
            Language::Markdown => "markdown",
            Language::Plaintext => "plaintext",
        }
    }

    /// Parse a tag string; `None` for anything outside the closed set.
    pub fn from_tag(tag: &str) -> Option<Language> {
        match tag {
            "javascript" => Some(Language::Javascript),
            "typescript" => Some(Language::Typescript),
            "python" => Some(Language::Python),
            "java" => Some(Language::Java),
            "go" => Some(Language::Go),
            "rust" => Some(Language::Rust),
            "cpp" => Some(Language::Cpp),
            "c" => Some(Language::C),
            "csharp" => Some(Language::Csharp),
            "php" => Some(Language::Php),
            "ruby" => Some(Language::Ruby),
            "swift" => Some(Language::Swift),
            "kotlin" => Some(Language::Kotlin),
            "dart" => Some(Language::Dart),
            "bash" => Some(Language::Bash),
            "powershell" => Some(Language::Powershell),
            "sql" => Some(Language::Sql),
            "html" => Some(Language::Html),
            "css" => Some(Language::Css),
            "scss" => Some(Language::Scss),
            "json" => Some(Language::Json),
            "yaml" => Some(Language::Yaml),
            "xml" => Some(Language::Xml),
            "markdown" => Some(Language::Markdown),
            "plaintext" => Some(Language::Plaintext),
            _ => None,
        }
    }

    /// Human-readable label for pickers and list rows.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Javascript => "JavaScript",
            Language::Typescript => "TypeScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::Csharp => "C#",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Swift => "Swift",
            Language::Kotlin => "Kotlin",
            Language::Dart => "Dart",
            Language::Bash => "Bash",
            Language::Powershell => "PowerShell",
            Language::Sql => "SQL",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Scss => "SCSS",
            Language::Json => "JSON",
            Language::Yaml => "YAML",
            Language::Xml => "XML",
            Language::Markdown => "Markdown",
            Language::Plaintext => "Plain Text",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Display name for a raw tag string.
///
/// Tags outside the closed set echo back unchanged, so callers rendering
/// persisted data never have to handle a failure.
pub fn language_display_name(tag: &str) -> String {
    match Language::from_tag(tag) {
        Some(language) => language.display_name().to_string(),
        None => tag.to_string(),
    }
}

/// One detection rule: what to look for in content, what to look for in a
/// filename, and how much a hit is worth.
struct LanguageRule {
    language: Language,
    content_patterns: Vec<Regex>,
    filename_patterns: Vec<Regex>,
    weight: u32,
}

fn rule(
    language: Language,
    weight: u32,
    content_patterns: &[&str],
    filename_patterns: &[&str],
) -> LanguageRule {
    let compile = |p: &&str| Regex::new(p).unwrap();
    LanguageRule {
        language,
        weight,
        content_patterns: content_patterns.iter().map(compile).collect(),
        filename_patterns: filename_patterns.iter().map(compile).collect(),
    }
}

/// The detection catalog, compiled once and shared by every call.
///
/// Declaration order doubles as the tie-break order: the first rule to reach
/// the maximum score wins. TypeScript carries weight 2 so that samples
/// matching both it and JavaScript resolve to the more specific language.
static RULES: Lazy<Vec<LanguageRule>> = Lazy::new(|| {
    vec![
        rule(
            Language::Javascript,
            1,
            &[
                r"\b(function|const|let|var|=>|import|export|require)\b",
                r"\b(console\.log|document\.|window\.)",
            ],
            &[r"(?i)\.(js|jsx|mjs)$"],
        ),
        rule(
            Language::Typescript,
            2,
            &[
                r"\b(interface|type|enum|implements|extends)\b",
                r":\s*(string|number|boolean|object|any|unknown|void)",
            ],
            &[r"(?i)\.(ts|tsx)$"],
        ),
        rule(
            Language::Python,
            1,
            &[
                r"\b(def|class|import|from|if __name__|print|len|range)\b",
                r"(?m)^\s*#.*$",
            ],
            &[r"(?i)\.(py|pyw)$"],
        ),
        rule(
            Language::Java,
            1,
            &[
                r"\b(public|private|protected|class|interface|extends|implements)\b",
                r"\b(System\.out\.println|String|int|void|main)\b",
            ],
            &[r"(?i)\.java$"],
        ),
        rule(
            Language::Go,
            1,
            &[
                r"\b(package|import|func|var|const|type|struct)\b",
                r"\b(fmt\.Print|make|len|cap)\b",
            ],
            &[r"(?i)\.go$"],
        ),
        rule(
            Language::Rust,
            1,
            &[
                r"\b(fn|let|mut|struct|enum|impl|trait|use|mod)\b",
                r"\b(println!|vec!|String|i32|u32)\b",
            ],
            &[r"(?i)\.rs$"],
        ),
        rule(
            Language::Cpp,
            1,
            &[
                r"\b(#include|using namespace|std::|cout|cin|endl)\b",
                r"\b(int|float|double|char|void|class|template)\b",
            ],
            &[r"(?i)\.(cpp|hpp|cc|h)$"],
        ),
        rule(
            Language::C,
            1,
            &[
                r"\b(#include|printf|scanf|malloc|free|struct)\b",
                r"\b(int|float|double|char|void)\b",
            ],
            &[r"(?i)\.(c|h)$"],
        ),
        rule(
            Language::Csharp,
            1,
            &[
                r"\b(using|namespace|class|interface|public|private|static|void)\b",
                r"\b(Console\.WriteLine|string|int|bool|var)\b",
            ],
            &[r"(?i)\.cs$"],
        ),
        rule(
            Language::Php,
            1,
            &[
                r"<\?php",
                r"\b(echo|print|var_dump|isset|function|class)\b",
                r"\$\w+",
            ],
            &[r"(?i)\.(php|phtml)$"],
        ),
        rule(
            Language::Ruby,
            1,
            &[
                r"\b(def|class|module|end|puts|print|require)\b",
                r"\b(attr_accessor|attr_reader|attr_writer)\b",
            ],
            &[r"(?i)\.rb$"],
        ),
        rule(
            Language::Swift,
            1,
            &[
                r"\b(func|var|let|class|struct|enum|protocol|import)\b",
                r"\b(print|String|Int|Bool|Array|Dictionary)\b",
            ],
            &[r"(?i)\.swift$"],
        ),
        rule(
            Language::Kotlin,
            1,
            &[
                r"\b(fun|val|var|class|interface|object|companion)\b",
                r"\b(println|String|Int|Boolean|List|Map)\b",
            ],
            &[r"(?i)\.(kt|kts)$"],
        ),
        rule(
            Language::Dart,
            1,
            &[
                r"\b(void|main|class|extends|implements|import|library)\b",
                r"\b(print|String|int|bool|List|Map)\b",
            ],
            &[r"(?i)\.dart$"],
        ),
        rule(
            Language::Bash,
            1,
            &[
                r"^#!",
                r"\b(echo|cd|ls|grep|awk|sed|curl|wget)\b",
                r"\$\{?\w+\}?",
            ],
            &[r"(?i)\.(sh|bash)$"],
        ),
        rule(
            Language::Powershell,
            1,
            &[
                r"\b(Get-|Set-|New-|Remove-|Write-Host|Write-Output)\b",
                r"\$\w+",
            ],
            &[r"(?i)\.(ps1|psm1)$"],
        ),
        rule(
            Language::Sql,
            1,
            &[
                r"(?i)\b(SELECT|FROM|WHERE|INSERT|UPDATE|DELETE|CREATE|ALTER|DROP)\b",
                r"(?i)\b(JOIN|LEFT|RIGHT|INNER|OUTER|ON|AS|GROUP BY|ORDER BY)\b",
            ],
            &[r"(?i)\.sql$"],
        ),
        rule(
            Language::Html,
            1,
            &[
                r"(?i)</?[a-z][\s\S]*>",
                r"(?i)<!DOCTYPE html>",
                r"(?i)<(div|span|p|h[1-6]|body|head|html)",
            ],
            &[r"(?i)\.(html|htm)$"],
        ),
        rule(
            Language::Css,
            1,
            &[
                r"\{[^}]*\}",
                r"\.[a-zA-Z][\w-]*\s*\{",
                r"#[a-zA-Z][\w-]*\s*\{",
            ],
            &[r"(?i)\.css$"],
        ),
        rule(
            Language::Scss,
            1,
            &[r"\$\w+:", r"@import|@mixin|@include|@extend"],
            &[r"(?i)\.(scss|sass)$"],
        ),
        rule(
            Language::Json,
            1,
            &[
                r"^\s*\{[\s\S]*\}\s*$",
                r"^\s*\[[\s\S]*\]\s*$",
                r#""[^"]*"\s*:\s*(".*"|[\d.]+|true|false|null)"#,
            ],
            &[r"(?i)\.json$"],
        ),
        rule(
            Language::Yaml,
            1,
            &[r"(?m)^\s*[\w-]+:\s*[\w\s\-.]*$", r"(?m)^\s*-\s+"],
            &[r"(?i)\.(yaml|yml)$"],
        ),
        rule(
            Language::Xml,
            1,
            &[r"(?i)<\?xml", r"(?i)</?[a-z][\s\S]*>"],
            &[r"(?i)\.(xml|xsd|xsl)$"],
        ),
        rule(
            Language::Markdown,
            1,
            &[
                r"(?m)^#{1,6}\s+",
                r"\*\*.*\*\*|\*.*\*",
                r"\[.*\]\(.*\)",
                r"```[\s\S]*```",
            ],
            &[r"(?i)\.(md|markdown)$"],
        ),
    ]
});

/// Detect the language of a code sample.
///
/// Never fails: a sample with no recognizable signal returns
/// [`Language::Plaintext`]. Scores accumulate per rule, filename hits count
/// triple, and a sample that parses as JSON gets a flat structural bonus
/// that outweighs keyword-level guesses.
pub fn detect_language(code: &str, filename: Option<&str>) -> Language {
    if code.trim().is_empty() {
        return Language::Plaintext;
    }

    let mut scores: HashMap<Language, u32> = HashMap::new();

    // Filename pass: an explicit extension is a much stronger signal than
    // any single content match.
    if let Some(filename) = filename {
        for rule in RULES.iter() {
            for pattern in &rule.filename_patterns {
                if pattern.is_match(filename) {
                    *scores.entry(rule.language).or_insert(0) += rule.weight * FILENAME_WEIGHT;
                }
            }
        }
    }

    // Content pass: every non-overlapping match contributes.
    for rule in RULES.iter() {
        let mut score = 0;
        for pattern in &rule.content_patterns {
            score += pattern.find_iter(code).count() as u32 * rule.weight;
        }
        if score > 0 {
            *scores.entry(rule.language).or_insert(0) += score;
        }
    }

    // A sample that parses as JSON outright is JSON, whatever the keyword
    // counts say. Parse failures just withhold the bonus.
    let trimmed = code.trim_start();
    if (trimmed.starts_with('{') || trimmed.starts_with('['))
        && serde_json::from_str::<serde_json::Value>(code).is_ok()
    {
        *scores.entry(Language::Json).or_insert(0) += JSON_STRUCTURAL_BONUS;
    }

    // Strictly-highest score wins; ties go to the earliest rule in catalog
    // order, so equal scores never overwrite an earlier winner.
    let mut best = Language::Plaintext;
    let mut best_score = 0;
    for rule in RULES.iter() {
        if let Some(&score) = scores.get(&rule.language) {
            if score > best_score {
                best_score = score;
                best = rule.language;
            }
        }
    }

    best
}

/// Every detectable language, in catalog order.
///
/// `Plaintext` is not listed; it is the fallback, not a detection target.
pub fn supported_languages() -> Vec<Language> {
    RULES.iter().map(|rule| rule.language).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_plaintext() {
        assert_eq!(detect_language("", None), Language::Plaintext);
        assert_eq!(detect_language("   \n\t  ", None), Language::Plaintext);
    }

    #[test]
    fn test_rust_sample() {
        let code = r#"fn main() { let mut x = 5; println!("{}", x); }"#;
        assert_eq!(detect_language(code, None), Language::Rust);
    }

    #[test]
    fn test_typescript_weight_beats_javascript() {
        let code = "interface User {\n  id: number;\n  name: string;\n}";
        assert_eq!(detect_language(code, None), Language::Typescript);
    }

    #[test]
    fn test_filename_extension_dominates() {
        assert_eq!(
            detect_language("print(1)", Some("script.py")),
            Language::Python
        );
        assert_eq!(
            detect_language("x", Some("styles.CSS")),
            Language::Css
        );
    }

    #[test]
    fn test_json_structural_bonus() {
        assert_eq!(
            detect_language(r#"{"a": 1, "b": [1, 2, 3]}"#, None),
            Language::Json
        );
        // Invalid JSON must not get the bonus.
        assert_ne!(detect_language("{invalid json", None), Language::Json);
    }

    #[test]
    fn test_shell_script() {
        let code = "#!/bin/bash\nset -euo pipefail\necho \"Deploying to prod...\"";
        assert_eq!(detect_language(code, None), Language::Bash);
    }

    #[test]
    fn test_supported_languages_excludes_plaintext() {
        let languages = supported_languages();
        assert!(!languages.is_empty());
        assert!(!languages.contains(&Language::Plaintext));
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(language_display_name("cpp"), "C++");
        assert_eq!(language_display_name("plaintext"), "Plain Text");
        assert_eq!(language_display_name("brainfuck"), "brainfuck");
    }

    #[test]
    fn test_tag_round_trip() {
        for language in supported_languages() {
            assert_eq!(Language::from_tag(language.as_tag()), Some(language));
        }
    }

    #[test]
    fn test_unknown_tag_deserializes_to_plaintext() {
        let language: Language = serde_json::from_str("\"cobol\"").unwrap();
        assert_eq!(language, Language::Plaintext);
    }
}
