use thiserror::Error;

/// Failures that abort the enrichment of a whole document.
///
/// None of these reach the reader: the pipeline catches them and hands the
/// original markup to the presentation layer instead.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no markup parser is available in this context")]
    ParserUnavailable,

    #[error("document nesting exceeds {limit} levels")]
    TooDeep { limit: usize },

    #[error("gallery has {collected} images but {rendered} viewers were rendered")]
    GalleryMismatch { collected: usize, rendered: usize },
}
