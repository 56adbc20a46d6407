use regex::Regex;
use std::sync::OnceLock;

use crate::dom::{Element, ParsedNode};

/// Source text pulled out of a `<pre><code>` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSnippet {
    pub language: String,
    pub code: String,
}

/// Extract the code of a `pre` element.
///
/// Only the first direct `code` child is considered. Returns `None` when
/// there is no such child or it holds nothing but whitespace; the caller
/// then keeps the author's markup as written.
pub fn extract_code(pre: &Element, default_language: &str) -> Option<CodeSnippet> {
    let code = pre
        .children
        .iter()
        .filter_map(ParsedNode::as_element)
        .find(|child| child.is("code"))?;

    let text = code.text_content();
    if text.trim().is_empty() {
        return None;
    }

    let language = code
        .attributes
        .get("class")
        .and_then(language_hint)
        .unwrap_or(default_language);

    // The closing tag usually sits on its own line
    let text = text.strip_suffix('\n').unwrap_or(&text);

    Some(CodeSnippet {
        language: language.to_string(),
        code: text.to_string(),
    })
}

fn language_hint(class: &str) -> Option<&str> {
    static LANGUAGE_RE: OnceLock<Regex> = OnceLock::new();
    let re = LANGUAGE_RE.get_or_init(|| Regex::new(r"language-(\w+)").unwrap());

    re.captures(class)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Html5everParser, MarkupParser};

    fn pre(markup: &str) -> Element {
        let nodes = Html5everParser::default().parse(markup).unwrap();
        nodes[0].as_element().unwrap().clone()
    }

    #[test]
    fn test_extract_code_with_language() {
        let snippet = extract_code(
            &pre(r#"<pre><code class="hljs language-ts">const x = 1;</code></pre>"#),
            "plaintext",
        )
        .unwrap();

        assert_eq!(snippet.language, "ts");
        assert_eq!(snippet.code, "const x = 1;");
    }

    #[test]
    fn test_extract_code_default_language() {
        let snippet = extract_code(&pre("<pre><code>echo hi\n</code></pre>"), "plaintext").unwrap();
        assert_eq!(snippet.language, "plaintext");
        assert_eq!(snippet.code, "echo hi");
    }

    #[test]
    fn test_extract_code_flattens_markup() {
        let snippet = extract_code(
            &pre(r#"<pre><code class="language-rust"><span>fn</span> main() {}</code></pre>"#),
            "plaintext",
        )
        .unwrap();
        assert_eq!(snippet.code, "fn main() {}");
    }

    #[test]
    fn test_no_code_child() {
        assert!(extract_code(&pre("<pre>raw text, no code child</pre>"), "plaintext").is_none());
    }

    #[test]
    fn test_nested_code_is_not_direct_child() {
        assert!(extract_code(&pre("<pre><div><code>x</code></div></pre>"), "plaintext").is_none());
    }

    #[test]
    fn test_whitespace_only_code() {
        assert!(extract_code(&pre("<pre><code>  \n </code></pre>"), "plaintext").is_none());
    }

    #[test]
    fn test_first_code_child_wins() {
        let snippet = extract_code(
            &pre(r#"<pre><code class="language-go">first</code><code class="language-c">second</code></pre>"#),
            "plaintext",
        )
        .unwrap();
        assert_eq!(snippet.language, "go");
        assert_eq!(snippet.code, "first");
    }
}
