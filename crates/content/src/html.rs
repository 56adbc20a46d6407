//! Serializes render trees back into HTML for server-side output.

use std::fmt::Write;

use crate::dom::{escape_attribute, escape_text, is_void_element};
use crate::render_tree::{PropValue, Props, RenderNode, RenderedDocument, CLASS_NAME};
use crate::style::to_css;
use crate::syntax_highlighter::TokenLines;

/// Write a rendered document as HTML.
///
/// Unprocessed documents are emitted exactly as the author wrote them.
pub fn to_html(document: &RenderedDocument) -> String {
    match document {
        RenderedDocument::Enriched { nodes, .. } => {
            let mut out = String::new();
            for node in nodes {
                write_node(node, &mut out);
            }
            out
        }
        RenderedDocument::Unprocessed { markup } => markup.clone(),
    }
}

fn write_node(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::Text { text } => out.push_str(&escape_text(text)),
        RenderNode::RawHtml { html } => out.push_str(html),
        RenderNode::PlainElement {
            tag,
            props,
            children,
        }
        | RenderNode::GenericPassthrough {
            tag,
            props,
            children,
            ..
        } => write_element(tag, props, children, out),
        RenderNode::ImageViewer { index, props, .. } => {
            out.push_str("<img");
            write_props(props, out);
            let _ = write!(out, r#" data-gallery-index="{}">"#, index);
        }
        RenderNode::CodeBlock {
            language, lines, ..
        } => write_code_block(language, lines, out),
        RenderNode::Video {
            sources,
            props,
            children,
            ..
        } => {
            out.push_str("<video");
            write_props(props, out);
            out.push('>');
            for slot in 0..=children.len() {
                for source in sources.iter().filter(|source| source.slot == slot) {
                    out.push_str("<source");
                    write_props(&source.props, out);
                    out.push('>');
                }
                if let Some(child) = children.get(slot) {
                    write_node(child, out);
                }
            }
            out.push_str("</video>");
        }
    }
}

fn write_element(tag: &str, props: &Props, children: &[RenderNode], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    write_props(props, out);
    out.push('>');

    if is_void_element(tag) {
        return;
    }

    for child in children {
        write_node(child, out);
    }
    let _ = write!(out, "</{}>", tag);
}

fn write_props(props: &Props, out: &mut String) {
    for (name, value) in props.iter() {
        let name = if name == CLASS_NAME { "class" } else { name };

        match value {
            PropValue::Text(text) => {
                let _ = write!(out, r#" {}="{}""#, name, escape_attribute(text));
            }
            PropValue::Flag(true) => {
                let _ = write!(out, " {}", name);
            }
            PropValue::Flag(false) => {}
            PropValue::Style(style) if style.is_empty() => {}
            PropValue::Style(style) => {
                let _ = write!(out, r#" {}="{}""#, name, escape_attribute(&to_css(style)));
            }
        }
    }
}

fn write_code_block(language: &str, lines: &TokenLines, out: &mut String) {
    let _ = write!(
        out,
        r#"<pre class="language-{}"><code>"#,
        escape_attribute(language)
    );

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for token in line {
            match &token.class {
                Some(class) => {
                    let _ = write!(
                        out,
                        r#"<span class="{}">{}</span>"#,
                        escape_attribute(&class.replace('.', " ")),
                        escape_text(&token.text)
                    );
                }
                None => out.push_str(&escape_text(&token.text)),
            }
        }
    }

    out.push_str("</code></pre>");
}
