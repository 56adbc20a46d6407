use serde::Serialize;

use crate::cdn::CdnRewriter;
use crate::dom::{Attributes, ParsedNode};
use crate::tag::Tag;

/// Gallery entry for one rendered image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    /// CDN-rewritten source URL
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ImageInfo {
    /// Build the gallery entry for an `<img>`'s attributes.
    ///
    /// Images without a usable `src` get no entry and no viewer.
    pub fn from_attributes(attributes: &Attributes, rewriter: &CdnRewriter) -> Option<Self> {
        let src = attributes.get("src").filter(|src| !src.trim().is_empty())?;

        Some(Self {
            src: rewriter.rewrite_url(src),
            alt: attributes.get("alt").map(str::to_string),
            title: attributes.get("title").map(str::to_string),
        })
    }

    /// Caption shown in the lightbox overlay: the alt text, else the title
    pub fn caption(&self) -> Option<&str> {
        self.alt
            .as_deref()
            .filter(|alt| !alt.is_empty())
            .or(self.title.as_deref())
            .filter(|caption| !caption.is_empty())
    }
}

/// Images of one document in render order, addressed by index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageList(Vec<ImageInfo>);

static NO_IMAGES: ImageList = ImageList(Vec::new());

impl ImageList {
    /// Shared empty list, for documents rendered without enrichment
    pub fn empty() -> &'static ImageList {
        &NO_IMAGES
    }

    pub fn get(&self, index: usize) -> Option<&ImageInfo> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageInfo> {
        self.0.iter()
    }
}

impl From<Vec<ImageInfo>> for ImageList {
    fn from(images: Vec<ImageInfo>) -> Self {
        Self(images)
    }
}

impl<'a> IntoIterator for &'a ImageList {
    type Item = &'a ImageInfo;
    type IntoIter = std::slice::Iter<'a, ImageInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collect every image of a parsed document, depth-first in document order.
pub fn collect_images(nodes: &[ParsedNode], rewriter: &CdnRewriter) -> ImageList {
    let mut images = Vec::new();
    visit(nodes, rewriter, &mut images);
    ImageList(images)
}

fn visit(nodes: &[ParsedNode], rewriter: &CdnRewriter, images: &mut Vec<ImageInfo>) {
    for node in nodes {
        let ParsedNode::Element(element) = node else {
            continue;
        };

        match Tag::of(&element.tag) {
            // Children of an image are never rendered
            Tag::Img => images.extend(ImageInfo::from_attributes(&element.attributes, rewriter)),
            // Direct <source> children become source entries, their sub-trees are dropped
            Tag::Video => {
                for child in &element.children {
                    if !is_source(child) {
                        visit(std::slice::from_ref(child), rewriter, images);
                    }
                }
            }
            tag if tag.is_opaque() => {}
            _ => visit(&element.children, rewriter, images),
        }
    }
}

/// Whether `node` is a `<source>` element, as the video handler treats it
pub(crate) fn is_source(node: &ParsedNode) -> bool {
    matches!(node, ParsedNode::Element(element) if element.is("source"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Html5everParser, MarkupParser};

    fn collect(markup: &str) -> ImageList {
        let nodes = Html5everParser::default().parse(markup).unwrap();
        let rewriter = CdnRewriter::new(
            Some("https://cdn.example.com".to_string()),
            vec!["old.example.com".to_string()],
        );
        collect_images(&nodes, &rewriter)
    }

    #[test]
    fn test_collect_in_document_order() {
        let images = collect(
            r#"<img src="http://old.example.com/1.jpg" alt="one">
            <div><p><img src="/2.jpg" title="two"></p></div>
            <img src="https://elsewhere.com/3.jpg">"#,
        );

        assert_eq!(images.len(), 3);
        assert_eq!(images.get(0).unwrap().src, "https://cdn.example.com/1.jpg");
        assert_eq!(images.get(0).unwrap().alt.as_deref(), Some("one"));
        assert_eq!(images.get(1).unwrap().src, "/2.jpg");
        assert_eq!(images.get(1).unwrap().title.as_deref(), Some("two"));
        assert_eq!(images.get(2).unwrap().alt, None);
    }

    #[test]
    fn test_skip_images_without_src() {
        let images = collect(r#"<img alt="none"><img src=""><img src="a.jpg">"#);
        assert_eq!(images.len(), 1);
        assert_eq!(images.get(0).unwrap().src, "a.jpg");
    }

    #[test]
    fn test_skip_opaque_subtrees() {
        let images = collect(r#"<h2><img src="h.jpg"> Title</h2><pre><img src="p.jpg"></pre><img src="a.jpg">"#);
        assert_eq!(images.len(), 1);
        assert_eq!(images.get(0).unwrap().src, "a.jpg");
    }

    #[test]
    fn test_skip_unrendered_subtrees() {
        let images = collect(
            r#"<svg><video><source><foreignObject><img src="hidden.jpg"></foreignObject></source></video></svg><img src="after.jpg">"#,
        );
        assert_eq!(images.len(), 1);
        assert_eq!(images.get(0).unwrap().src, "after.jpg");
    }

    #[test]
    fn test_caption_prefers_alt() {
        let info = ImageInfo {
            src: "a.jpg".to_string(),
            alt: Some(String::new()),
            title: Some("Title".to_string()),
        };
        assert_eq!(info.caption(), Some("Title"));

        let info = ImageInfo {
            alt: Some("Alt".to_string()),
            ..info
        };
        assert_eq!(info.caption(), Some("Alt"));
    }
}
