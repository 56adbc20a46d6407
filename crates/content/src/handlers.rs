//! Per-tag transforms used by the converter.

use crate::code_block::extract_code;
use crate::converter::Converter;
use crate::dom::{Element, ParsedNode};
use crate::error::RenderError;
use crate::image::{is_source, ImageInfo};
use crate::render_tree::{Props, RenderNode, VideoSource};

pub const DEFAULT_REFERRER_POLICY: &str = "strict-origin-when-cross-origin";

impl Converter<'_> {
    pub(crate) fn image(&mut self, element: &Element) -> RenderNode {
        let mut props = Props::from_attributes(&element.attributes);
        props.set("loading", "lazy");
        props.set("decoding", "async");

        match ImageInfo::from_attributes(&element.attributes, self.rewriter) {
            Some(info) => {
                props.set("src", info.src.as_str());
                RenderNode::ImageViewer {
                    index: self.take_image_index(),
                    overlay: info.caption().map(str::to_string),
                    src: info.src,
                    props,
                }
            }
            // Not in the gallery, so no viewer either
            None => RenderNode::PlainElement {
                tag: element.tag.clone(),
                props,
                children: Vec::new(),
            },
        }
    }

    pub(crate) fn iframe(
        &mut self,
        element: &Element,
        depth: usize,
    ) -> Result<RenderNode, RenderError> {
        let attributes = &element.attributes;
        let mut props = Props::from_attributes(attributes);

        let eager = attributes
            .get("loading")
            .is_some_and(|loading| loading.trim().eq_ignore_ascii_case("eager"));
        if !eager {
            props.set("loading", "lazy");
        }

        if attributes
            .get("referrerpolicy")
            .map_or(true, |policy| policy.trim().is_empty())
        {
            props.set("referrerpolicy", DEFAULT_REFERRER_POLICY);
        }

        props.set("allowfullscreen", true);

        Ok(RenderNode::PlainElement {
            tag: element.tag.clone(),
            props,
            children: self.convert_children(&element.children, depth + 1)?,
        })
    }

    /// `h2` keeps nothing but its text
    pub(crate) fn heading(&mut self, element: &Element) -> RenderNode {
        let text = element.text_content();
        let children = if text.is_empty() {
            Vec::new()
        } else {
            vec![RenderNode::text(text)]
        };

        RenderNode::PlainElement {
            tag: element.tag.clone(),
            props: Props::new(),
            children,
        }
    }

    pub(crate) fn code_block(&mut self, element: &Element) -> RenderNode {
        match extract_code(element, self.default_language) {
            Some(snippet) => RenderNode::CodeBlock {
                lines: self.highlighter.highlight(&snippet.code, &snippet.language),
                language: snippet.language,
                code: snippet.code,
            },
            None => {
                log::debug!("<pre> without usable <code> child, keeping markup as written");
                RenderNode::RawHtml {
                    html: element.to_markup(),
                }
            }
        }
    }

    pub(crate) fn video(
        &mut self,
        element: &Element,
        depth: usize,
    ) -> Result<RenderNode, RenderError> {
        let attributes = &element.attributes;
        let mut props = Props::from_attributes(attributes);
        props.set("controls", true);

        if let Some(src) = attributes.get("src") {
            props.set("src", self.rewriter.rewrite_url(src));
        }

        let poster = attributes
            .get("poster")
            .map(|poster| self.rewriter.rewrite_url(poster));
        if let Some(poster) = &poster {
            props.set("poster", poster.as_str());
        }

        let mut sources = Vec::new();
        let mut children = Vec::new();
        for (position, child) in element.children.iter().enumerate() {
            match child {
                ParsedNode::Element(source) if is_source(child) => {
                    sources.push(self.video_source(source, children.len()));
                }
                other => children.push(self.convert_node(other, position, depth + 1)?),
            }
        }

        Ok(RenderNode::Video {
            poster,
            sources,
            props,
            children,
        })
    }

    fn video_source(&self, source: &Element, slot: usize) -> VideoSource {
        let mut props = Props::from_attributes(&source.attributes);
        let src = source
            .attributes
            .get("src")
            .map(|src| self.rewriter.rewrite_url(src));

        if let Some(src) = &src {
            props.set("src", src.as_str());
        }

        VideoSource { src, slot, props }
    }

    /// Any other element: props copied, children converted, keyed by
    /// position among its siblings
    pub(crate) fn passthrough(
        &mut self,
        tag: &str,
        element: &Element,
        position: usize,
        depth: usize,
    ) -> Result<RenderNode, RenderError> {
        Ok(RenderNode::GenericPassthrough {
            tag: tag.to_string(),
            key: format!("{}-{}", tag, position),
            props: Props::from_attributes(&element.attributes),
            children: self.convert_children(&element.children, depth + 1)?,
        })
    }
}
