//! Immutable parse tree for post bodies.
//!
//! Markup is parsed with html5ever in fragment mode (as if it were the
//! contents of `<body>`) and copied into plain owned nodes, so nothing
//! downstream ever touches the reference-counted DOM.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_fragment, LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::RenderError;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

// Parsing runs with scripting enabled, so <noscript> content is raw text too
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script",
    "style",
    "xmp",
    "iframe",
    "noembed",
    "noframes",
    "noscript",
    "plaintext",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

/// Element attributes in source order.
///
/// Setting a name that is already present replaces its value in place
/// (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Attributes,
    pub children: Vec<ParsedNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedNode {
    Text(String),
    Element(Element),
}

impl Element {
    pub fn new(tag: impl Into<String>, attributes: Attributes, children: Vec<ParsedNode>) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            children,
        }
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Concatenated text of every descendant text node
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        push_text(&self.children, &mut text);
        text
    }

    /// Serialize this element and its sub-tree back into HTML
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

impl ParsedNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ParsedNode::Element(element) => Some(element),
            ParsedNode::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            ParsedNode::Text(text) => text.clone(),
            ParsedNode::Element(element) => element.text_content(),
        }
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_node(self, false, &mut out);
        out
    }
}

fn push_text(nodes: &[ParsedNode], out: &mut String) {
    for node in nodes {
        match node {
            ParsedNode::Text(text) => out.push_str(text),
            ParsedNode::Element(element) => push_text(&element.children, out),
        }
    }
}

fn write_node(node: &ParsedNode, raw_text: bool, out: &mut String) {
    match node {
        ParsedNode::Text(text) if raw_text => out.push_str(text),
        ParsedNode::Text(text) => out.push_str(&escape_text(text)),
        ParsedNode::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in element.attributes.iter() {
        out.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
    }
    out.push('>');

    if is_void_element(&element.tag) {
        return;
    }

    let raw_text = RAW_TEXT_ELEMENTS
        .iter()
        .any(|raw| raw.eq_ignore_ascii_case(&element.tag));
    for child in &element.children {
        write_node(child, raw_text, out);
    }

    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub(crate) fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Source of parse trees for raw post markup.
pub trait MarkupParser {
    /// Whether parsing is possible in the current context at all.
    ///
    /// When this is false the pipeline skips enrichment entirely instead of
    /// treating the document as broken.
    fn is_available(&self) -> bool {
        true
    }

    fn parse(&self, markup: &str) -> Result<Vec<ParsedNode>, RenderError>;
}

/// HTML5 fragment parser backed by html5ever.
#[derive(Debug, Clone)]
pub struct Html5everParser {
    max_depth: usize,
}

impl Html5everParser {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for Html5everParser {
    fn default() -> Self {
        Self::new(crate::config::default_max_depth())
    }
}

impl MarkupParser for Html5everParser {
    fn parse(&self, markup: &str) -> Result<Vec<ParsedNode>, RenderError> {
        let context = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from("body"));
        let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
            .one(markup);

        if !dom.errors.is_empty() {
            log::debug!("Markup parsed with {} recoverable error(s)", dom.errors.len());
        }

        // Fragment parsing puts the parsed nodes under a synthetic <html> root
        let document_children = dom.document.children.borrow();
        let root = document_children
            .iter()
            .find(|child| matches!(&child.data, NodeData::Element { name, .. } if &*name.local == "html"))
            .cloned()
            .unwrap_or_else(|| dom.document.clone());

        let mut nodes = Vec::new();
        for child in root.children.borrow().iter() {
            copy_node(child, 1, self.max_depth, &mut nodes)?;
        }

        Ok(nodes)
    }
}

fn copy_node(
    handle: &Handle,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<ParsedNode>,
) -> Result<(), RenderError> {
    match &handle.data {
        NodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            // Merge adjacent text runs
            if let Some(ParsedNode::Text(previous)) = out.last_mut() {
                previous.push_str(&text);
            } else {
                out.push(ParsedNode::Text(text));
            }
        }
        NodeData::Element { name, attrs, .. } => {
            if depth > max_depth {
                return Err(RenderError::TooDeep { limit: max_depth });
            }

            let attributes = attrs
                .borrow()
                .iter()
                .map(|attr| {
                    let name = match &attr.name.prefix {
                        Some(prefix) => format!("{}:{}", &**prefix, &*attr.name.local),
                        None => attr.name.local.to_string(),
                    };
                    (name, attr.value.to_string())
                })
                .collect();

            let mut children = Vec::new();
            for child in handle.children.borrow().iter() {
                copy_node(child, depth + 1, max_depth, &mut children)?;
            }

            out.push(ParsedNode::Element(Element::new(
                name.local.to_string(),
                attributes,
                children,
            )));
        }
        // Comments, doctypes and processing instructions carry no content
        _ => {}
    }

    Ok(())
}

/// Parser used where no markup parsing is possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableParser;

impl MarkupParser for UnavailableParser {
    fn is_available(&self) -> bool {
        false
    }

    fn parse(&self, _markup: &str) -> Result<Vec<ParsedNode>, RenderError> {
        Err(RenderError::ParserUnavailable)
    }
}
