/// Element kinds with a dedicated handler; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'a> {
    Img,
    Iframe,
    H2,
    Pre,
    Video,
    Other(&'a str),
}

impl<'a> Tag<'a> {
    pub fn of(name: &'a str) -> Self {
        const HANDLED: [(&str, Tag<'static>); 5] = [
            ("img", Tag::Img),
            ("iframe", Tag::Iframe),
            ("h2", Tag::H2),
            ("pre", Tag::Pre),
            ("video", Tag::Video),
        ];

        HANDLED
            .iter()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(name))
            .map(|(_, kind)| *kind)
            .unwrap_or(Tag::Other(name))
    }

    /// Whether the converter renders this element's sub-tree as opaque
    /// content (flattened text or a code block) rather than walking it.
    ///
    /// The image collector must skip the same sub-trees, otherwise gallery
    /// indices drift away from the rendered viewers.
    pub fn is_opaque(self) -> bool {
        matches!(self, Tag::H2 | Tag::Pre)
    }
}
