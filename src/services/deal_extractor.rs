use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use crate::domain::html_tag::promo_selector;

pub const MAX_DEALS: usize = 8;
pub const MIN_DEAL_CHARS: usize = 12;
pub const MAX_DEAL_CHARS: usize = 120;

static PROMO_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(%|off|sale|deal|clearance|save|outlet)").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\u{FEFF}]+").unwrap());

// Byte order marks count as whitespace, as they do in browser string handling.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

pub fn normalize_text(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(text.trim_matches(is_blank), " ")
        .into_owned()
}

/// Keyword hit and a length strictly between the bounds, counted in UTF-16 code units.
pub fn is_promotional(text: &str) -> bool {
    let len = text.encode_utf16().count();
    PROMO_KEYWORDS.is_match(text) && len > MIN_DEAL_CHARS && len < MAX_DEAL_CHARS
}

/// Up to eight unique promotional lines from a page, in document order.
pub fn extract_deals(html: &str) -> Vec<String> {
    if html.is_empty() {
        return vec![];
    }

    let document = Html::parse_document(html);

    document
        .select(promo_selector())
        .map(|element| normalize_text(&element.text().collect::<String>()))
        .filter(|text| is_promotional(text))
        .unique()
        .take(MAX_DEALS)
        .collect()
}
