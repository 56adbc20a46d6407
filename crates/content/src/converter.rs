//! Walks a parsed document and builds the render tree.

use crate::cdn::CdnRewriter;
use crate::dom::{Element, ParsedNode};
use crate::error::RenderError;
use crate::render_tree::RenderNode;
use crate::syntax_highlighter::SyntaxHighlighter;
use crate::tag::Tag;

pub struct Converter<'a> {
    pub(crate) rewriter: &'a CdnRewriter,
    pub(crate) highlighter: &'a SyntaxHighlighter,
    pub(crate) default_language: &'a str,
    max_depth: usize,
    next_image: usize,
}

impl<'a> Converter<'a> {
    pub fn new(
        rewriter: &'a CdnRewriter,
        highlighter: &'a SyntaxHighlighter,
        default_language: &'a str,
        max_depth: usize,
    ) -> Self {
        Self {
            rewriter,
            highlighter,
            default_language,
            max_depth,
            next_image: 0,
        }
    }

    /// Convert the top-level nodes of a document
    pub fn convert(&mut self, nodes: &[ParsedNode]) -> Result<Vec<RenderNode>, RenderError> {
        self.convert_children(nodes, 0)
    }

    /// Number of image viewers emitted so far
    pub fn images_seen(&self) -> usize {
        self.next_image
    }

    pub(crate) fn take_image_index(&mut self) -> usize {
        let index = self.next_image;
        self.next_image += 1;
        index
    }

    pub(crate) fn convert_children(
        &mut self,
        nodes: &[ParsedNode],
        depth: usize,
    ) -> Result<Vec<RenderNode>, RenderError> {
        nodes
            .iter()
            .enumerate()
            .map(|(position, node)| self.convert_node(node, position, depth))
            .collect()
    }

    pub(crate) fn convert_node(
        &mut self,
        node: &ParsedNode,
        position: usize,
        depth: usize,
    ) -> Result<RenderNode, RenderError> {
        match node {
            ParsedNode::Text(text) => Ok(RenderNode::text(text.as_str())),
            ParsedNode::Element(element) => self.convert_element(element, position, depth),
        }
    }

    fn convert_element(
        &mut self,
        element: &Element,
        position: usize,
        depth: usize,
    ) -> Result<RenderNode, RenderError> {
        if depth >= self.max_depth {
            return Err(RenderError::TooDeep {
                limit: self.max_depth,
            });
        }

        let node = match Tag::of(&element.tag) {
            Tag::Img => self.image(element),
            Tag::Iframe => self.iframe(element, depth)?,
            Tag::H2 => self.heading(element),
            Tag::Pre => self.code_block(element),
            Tag::Video => self.video(element, depth)?,
            Tag::Other(tag) => self.passthrough(tag, element, position, depth)?,
        };

        Ok(node)
    }
}
