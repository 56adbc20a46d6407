//! Output tree handed to the presentation layer.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::dom::Attributes;
use crate::image::ImageList;
use crate::style::{parse_style, StyleMap};
use crate::syntax_highlighter::TokenLines;

/// Property name the presentation layer expects for `class`
pub const CLASS_NAME: &str = "className";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Text(String),
    Flag(bool),
    Style(StyleMap),
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Flag(value)
    }
}

impl From<StyleMap> for PropValue {
    fn from(value: StyleMap) -> Self {
        PropValue::Style(value)
    }
}

/// Element properties in source order; setting an existing name replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(Vec<(String, PropValue)>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy attributes 1:1, except `class` becomes `className` and `style`
    /// becomes a parsed style map.
    pub fn from_attributes(attributes: &Attributes) -> Self {
        let mut props = Self::new();

        for (name, value) in attributes.iter() {
            match name {
                "class" => props.set(CLASS_NAME, value),
                "style" => props.set("style", parse_style(value)),
                _ => props.set(name, value),
            }
        }

        props
    }

    pub fn set(&mut self, name: &str, value: impl Into<PropValue>) {
        let value = value.into();

        match self.0.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            PropValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Props {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A `<source>` child of a video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSource {
    /// Rewritten URL, absent when the author wrote no `src`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Number of the video's other children written before this source
    pub slot: usize,
    pub props: Props,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderNode {
    Text {
        text: String,
    },
    /// Markup emitted verbatim, used when a fragment cannot be enriched
    RawHtml {
        html: String,
    },
    PlainElement {
        tag: String,
        props: Props,
        children: Vec<RenderNode>,
    },
    /// An image opening the lightbox at `index`.
    ///
    /// Viewer entries are keyed by `src`, so two images with the same
    /// resolved URL share one viewer key.
    ImageViewer {
        src: String,
        index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        overlay: Option<String>,
        props: Props,
    },
    CodeBlock {
        language: String,
        code: String,
        lines: TokenLines,
    },
    Video {
        #[serde(skip_serializing_if = "Option::is_none")]
        poster: Option<String>,
        sources: Vec<VideoSource>,
        props: Props,
        children: Vec<RenderNode>,
    },
    GenericPassthrough {
        tag: String,
        key: String,
        props: Props,
        children: Vec<RenderNode>,
    },
}

impl RenderNode {
    pub fn text(text: impl Into<String>) -> Self {
        RenderNode::Text { text: text.into() }
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::PlainElement { children, .. }
            | RenderNode::Video { children, .. }
            | RenderNode::GenericPassthrough { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first, pre-order walk over this node and its descendants
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a RenderNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// One rendered post body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderedDocument {
    /// Enriched tree, paired with the gallery images its viewers index into
    Enriched {
        nodes: Vec<RenderNode>,
        images: ImageList,
    },
    /// Original markup, to be displayed without any enrichment
    Unprocessed { markup: String },
}

impl RenderedDocument {
    pub fn unprocessed(markup: &str) -> Self {
        RenderedDocument::Unprocessed {
            markup: markup.to_string(),
        }
    }

    pub fn is_enriched(&self) -> bool {
        matches!(self, RenderedDocument::Enriched { .. })
    }

    pub fn nodes(&self) -> &[RenderNode] {
        match self {
            RenderedDocument::Enriched { nodes, .. } => nodes,
            RenderedDocument::Unprocessed { .. } => &[],
        }
    }

    pub fn images(&self) -> &ImageList {
        match self {
            RenderedDocument::Enriched { images, .. } => images,
            RenderedDocument::Unprocessed { .. } => ImageList::empty(),
        }
    }

    /// Every image viewer in render order
    pub fn image_viewers(&self) -> Vec<&RenderNode> {
        let mut viewers = Vec::new();
        for node in self.nodes() {
            node.walk(&mut |node| {
                if matches!(node, RenderNode::ImageViewer { .. }) {
                    viewers.push(node);
                }
            });
        }
        viewers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_from_attributes() {
        let attributes: Attributes = vec![
            ("id", "intro"),
            ("class", "lead wide"),
            ("style", "margin-top: 4px; broken"),
        ]
        .into_iter()
        .collect();

        let props = Props::from_attributes(&attributes);
        assert_eq!(props.text("id"), Some("intro"));
        assert_eq!(props.text(CLASS_NAME), Some("lead wide"));
        assert!(props.get("class").is_none());

        let Some(PropValue::Style(style)) = props.get("style") else {
            panic!("style should be parsed");
        };
        assert_eq!(style.get("marginTop"), Some(&"4px".to_string()));
    }

    #[test]
    fn test_props_set_replaces() {
        let mut props = Props::new();
        props.set("loading", "eager");
        props.set("controls", true);
        props.set("loading", "lazy");

        let names: Vec<_> = props.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["loading", "controls"]);
        assert_eq!(props.text("loading"), Some("lazy"));
    }

    #[test]
    fn test_serialize_render_node() {
        let mut props = Props::new();
        props.set("controls", true);
        let node = RenderNode::PlainElement {
            tag: "h2".to_string(),
            props,
            children: vec![RenderNode::text("Title")],
        };

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "plainElement");
        assert_eq!(json["props"]["controls"], true);
        assert_eq!(json["children"][0]["text"], "Title");
    }

    #[test]
    fn test_unprocessed_document_has_no_images() {
        let document = RenderedDocument::unprocessed("<p>x</p>");
        assert!(!document.is_enriched());
        assert!(document.images().is_empty());
        assert!(document.nodes().is_empty());
    }
}
