//! Rendering pipeline for blog post bodies.
//!
//! A post body (an HTML string) is parsed once, its images are collected
//! for the lightbox gallery, and the tree is converted into a
//! [`RenderNode`] tree with lazy-loaded media, CDN-rewritten resources and
//! highlighted code blocks. Anything that goes wrong degrades to showing
//! the original markup.

pub mod cache;
pub mod cdn;
pub mod code_block;
pub mod config;
pub mod converter;
pub mod dom;
pub mod error;
mod handlers;
pub mod html;
pub mod image;
pub mod pipeline;
pub mod render_tree;
pub mod style;
pub mod syntax_highlighter;
pub mod tag;

pub use cache::DocumentCache;
pub use cdn::CdnRewriter;
pub use config::{load_config, RenderConfig};
pub use dom::{Attributes, Element, Html5everParser, MarkupParser, ParsedNode, UnavailableParser};
pub use error::RenderError;
pub use html::to_html;
pub use image::{collect_images, ImageInfo, ImageList};
pub use pipeline::ContentRenderer;
pub use render_tree::{PropValue, Props, RenderNode, RenderedDocument, VideoSource};
pub use style::{parse_style, StyleMap};
pub use syntax_highlighter::{SyntaxHighlighter, Token, TokenLines};
