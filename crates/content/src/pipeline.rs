use crate::cdn::CdnRewriter;
use crate::config::RenderConfig;
use crate::converter::Converter;
use crate::dom::{Html5everParser, MarkupParser};
use crate::error::RenderError;
use crate::image::collect_images;
use crate::render_tree::RenderedDocument;
use crate::syntax_highlighter::SyntaxHighlighter;

/// Turns raw post bodies into enriched render trees.
///
/// Rendering never fails from the caller's point of view: when the markup
/// cannot be parsed or converted, the document comes back unprocessed.
pub struct ContentRenderer<P = Html5everParser> {
    parser: P,
    rewriter: CdnRewriter,
    highlighter: SyntaxHighlighter,
    default_language: String,
    max_depth: usize,
}

impl ContentRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self::with_parser(config, Html5everParser::new(config.limits.max_depth))
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

impl<P: MarkupParser> ContentRenderer<P> {
    pub fn with_parser(config: &RenderConfig, parser: P) -> Self {
        Self {
            parser,
            rewriter: config.cdn.rewriter(),
            highlighter: SyntaxHighlighter::new(),
            default_language: config.highlight.default_language.clone(),
            max_depth: config.limits.max_depth,
        }
    }

    pub fn rewriter(&self) -> &CdnRewriter {
        &self.rewriter
    }

    pub fn highlighter(&self) -> &SyntaxHighlighter {
        &self.highlighter
    }

    /// Render one post body.
    pub fn render(&self, markup: &str) -> RenderedDocument {
        if !self.parser.is_available() {
            log::debug!("No markup parser available, rendering markup unprocessed");
            return RenderedDocument::unprocessed(markup);
        }

        match self.try_render(markup) {
            Ok(document) => document,
            Err(e) => {
                log::warn!("Failed to enrich document, rendering markup unprocessed: {}", e);
                RenderedDocument::unprocessed(markup)
            }
        }
    }

    /// Parse, collect images, convert. Errors are not recovered here.
    pub fn try_render(&self, markup: &str) -> Result<RenderedDocument, RenderError> {
        let nodes = self.parser.parse(markup)?;

        // Both passes run over the same, never-mutated tree
        let images = collect_images(&nodes, &self.rewriter);

        let mut converter = Converter::new(
            &self.rewriter,
            &self.highlighter,
            &self.default_language,
            self.max_depth,
        );
        let nodes = converter.convert(&nodes)?;

        if converter.images_seen() != images.len() {
            return Err(RenderError::GalleryMismatch {
                collected: images.len(),
                rendered: converter.images_seen(),
            });
        }

        Ok(RenderedDocument::Enriched { nodes, images })
    }
}
