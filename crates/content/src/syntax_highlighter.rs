use serde::Serialize;
use std::collections::HashMap;
use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter};

/// A run of source text sharing one highlight class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub text: String,
}

impl Token {
    fn new(class: Option<&str>, text: &str) -> Self {
        Self {
            class: class.map(str::to_string),
            text: text.to_string(),
        }
    }
}

/// Highlighted source, one token list per line
pub type TokenLines = Vec<Vec<Token>>;

const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "function.builtin",
    "function",
    "keyword",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "string",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

/// Bundled grammars: name, language, highlights query, locals query
fn grammars() -> Vec<(&'static str, tree_sitter::Language, &'static str, &'static str)> {
    vec![
        ("rust", tree_sitter_rust::LANGUAGE.into(), tree_sitter_rust::HIGHLIGHTS_QUERY, ""),
        (
            "javascript",
            tree_sitter_javascript::LANGUAGE.into(),
            tree_sitter_javascript::HIGHLIGHT_QUERY,
            tree_sitter_javascript::LOCALS_QUERY,
        ),
        (
            "typescript",
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            tree_sitter_typescript::HIGHLIGHTS_QUERY,
            tree_sitter_typescript::LOCALS_QUERY,
        ),
        (
            "tsx",
            tree_sitter_typescript::LANGUAGE_TSX.into(),
            tree_sitter_typescript::HIGHLIGHTS_QUERY,
            tree_sitter_typescript::LOCALS_QUERY,
        ),
        ("python", tree_sitter_python::LANGUAGE.into(), tree_sitter_python::HIGHLIGHTS_QUERY, ""),
        ("go", tree_sitter_go::LANGUAGE.into(), tree_sitter_go::HIGHLIGHTS_QUERY, ""),
        ("c", tree_sitter_c::LANGUAGE.into(), tree_sitter_c::HIGHLIGHT_QUERY, ""),
        ("cpp", tree_sitter_cpp::LANGUAGE.into(), tree_sitter_cpp::HIGHLIGHT_QUERY, ""),
        ("java", tree_sitter_java::LANGUAGE.into(), tree_sitter_java::HIGHLIGHTS_QUERY, ""),
        ("json", tree_sitter_json::LANGUAGE.into(), tree_sitter_json::HIGHLIGHTS_QUERY, ""),
        ("bash", tree_sitter_bash::LANGUAGE.into(), tree_sitter_bash::HIGHLIGHT_QUERY, ""),
        ("html", tree_sitter_html::LANGUAGE.into(), tree_sitter_html::HIGHLIGHTS_QUERY, ""),
        ("css", tree_sitter_css::LANGUAGE.into(), tree_sitter_css::HIGHLIGHTS_QUERY, ""),
    ]
}

pub struct SyntaxHighlighter {
    configs: HashMap<&'static str, HighlightConfiguration>,
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let mut configs = HashMap::new();
        for (name, language, highlights, locals) in grammars() {
            Self::add_language_config(&mut configs, name, language, highlights, locals);
        }
        Self { configs }
    }

    fn add_language_config(
        configs: &mut HashMap<&'static str, HighlightConfiguration>,
        name: &'static str,
        language: tree_sitter::Language,
        highlights_query: &str,
        locals_query: &str,
    ) {
        match HighlightConfiguration::new(language, name, highlights_query, "", locals_query) {
            Ok(mut config) => {
                config.configure(HIGHLIGHT_NAMES);
                configs.insert(name, config);
            }
            Err(e) => log::warn!("Skipping {} highlighting: {}", name, e),
        }
    }

    pub fn supports(&self, language: &str) -> bool {
        self.configs.contains_key(canonical_language(language))
    }

    /// Tokenize `code` as `language`, split into lines.
    ///
    /// Unknown languages, and grammars that fail mid-way, yield a single
    /// unstyled token per line.
    pub fn highlight(&self, code: &str, language: &str) -> TokenLines {
        let Some(config) = self.configs.get(canonical_language(language)) else {
            return plain_lines(code);
        };

        match Self::highlight_with(config, code) {
            Ok(lines) => lines,
            Err(e) => {
                log::debug!("Highlighting {} failed, using plain text: {:?}", language, e);
                plain_lines(code)
            }
        }
    }

    fn highlight_with(
        config: &HighlightConfiguration,
        code: &str,
    ) -> Result<TokenLines, tree_sitter_highlight::Error> {
        let mut highlighter = Highlighter::new();
        let highlights = highlighter.highlight(config, code.as_bytes(), None, |_| None)?;

        let mut lines: TokenLines = vec![Vec::new()];
        let mut classes: Vec<&str> = Vec::new();

        for event in highlights {
            match event? {
                HighlightEvent::Source { start, end } => {
                    push_text(&mut lines, classes.last().copied(), &code[start..end]);
                }
                HighlightEvent::HighlightStart(highlight) => {
                    classes.push(HIGHLIGHT_NAMES.get(highlight.0).copied().unwrap_or("text"));
                }
                HighlightEvent::HighlightEnd => {
                    classes.pop();
                }
            }
        }

        Ok(lines)
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the usual short names authors put in `language-*` classes
pub fn canonical_language(language: &str) -> &str {
    match language {
        "ts" => "typescript",
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "py" => "python",
        "rs" => "rust",
        "golang" => "go",
        "sh" | "shell" | "zsh" => "bash",
        "h" => "c",
        "cc" | "cxx" | "hpp" => "cpp",
        "htm" | "xhtml" => "html",
        other => other,
    }
}

fn plain_lines(code: &str) -> TokenLines {
    let mut lines: TokenLines = vec![Vec::new()];
    push_text(&mut lines, None, code);
    lines
}

fn push_text(lines: &mut TokenLines, class: Option<&str>, text: &str) {
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            lines.push(Vec::new());
        }
        if part.is_empty() {
            continue;
        }
        if let Some(line) = lines.last_mut() {
            line.push(Token::new(class, part));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &[Token]) -> String {
        line.iter().map(|token| token.text.as_str()).collect()
    }

    #[test]
    fn test_highlight_rust_keywords() {
        let highlighter = SyntaxHighlighter::new();
        let lines = highlighter.highlight("fn main() {}", "rust");

        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "fn main() {}");
        assert!(lines[0]
            .iter()
            .any(|token| token.text == "fn" && token.class.as_deref() == Some("keyword")));
    }

    #[test]
    fn test_highlight_splits_lines() {
        let highlighter = SyntaxHighlighter::new();
        let lines = highlighter.highlight("let a = 1;\nlet b = 2;", "ts");

        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "let a = 1;");
        assert_eq!(line_text(&lines[1]), "let b = 2;");
    }

    #[test]
    fn test_multiline_token_keeps_class_on_each_line() {
        let highlighter = SyntaxHighlighter::new();
        let lines = highlighter.highlight("/* one\ntwo */", "javascript");

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].class.as_deref(), Some("comment"));
        assert_eq!(lines[1][0].class.as_deref(), Some("comment"));
        assert_eq!(line_text(&lines[1]), "two */");
    }

    #[test]
    fn test_unknown_language_is_plain() {
        let highlighter = SyntaxHighlighter::new();
        let lines = highlighter.highlight("a\n\nb", "plaintext");

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], vec![Token::new(None, "a")]);
        assert!(lines[1].is_empty());
        assert_eq!(lines[2], vec![Token::new(None, "b")]);
    }

    #[test]
    fn test_canonical_language() {
        assert_eq!(canonical_language("ts"), "typescript");
        assert_eq!(canonical_language("sh"), "bash");
        assert_eq!(canonical_language("rust"), "rust");
        assert!(SyntaxHighlighter::new().supports("js"));
    }
}
