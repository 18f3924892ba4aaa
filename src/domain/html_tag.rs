use once_cell::sync::Lazy;
use scraper::Selector;

/// Element kinds whose text can carry promotional copy on a retail page.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HtmlTag {
    H1Tag,
    H2Tag,
    H3Tag,
    H4Tag,
    ATag,
    StrongTag,
    PTag,
    SpanTag,
    LiTag,
}

pub const PROMO_TAGS: [HtmlTag; 9] = [
    HtmlTag::H1Tag,
    HtmlTag::H2Tag,
    HtmlTag::H3Tag,
    HtmlTag::H4Tag,
    HtmlTag::ATag,
    HtmlTag::StrongTag,
    HtmlTag::PTag,
    HtmlTag::SpanTag,
    HtmlTag::LiTag,
];

impl HtmlTag {
    pub fn name(&self) -> &'static str {
        match self {
            HtmlTag::H1Tag => "h1",
            HtmlTag::H2Tag => "h2",
            HtmlTag::H3Tag => "h3",
            HtmlTag::H4Tag => "h4",
            HtmlTag::ATag => "a",
            HtmlTag::StrongTag => "strong",
            HtmlTag::PTag => "p",
            HtmlTag::SpanTag => "span",
            HtmlTag::LiTag => "li",
        }
    }
}

static PROMO_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    let group = PROMO_TAGS
        .iter()
        .map(|tag| tag.name())
        .collect::<Vec<&str>>()
        .join(",");
    Selector::parse(&group).unwrap()
});

/// A group selector matching every promo tag; matches come back in document order.
pub fn promo_selector() -> &'static Selector {
    &PROMO_SELECTOR
}
