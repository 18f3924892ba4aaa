use thiserror::Error;
use url::Url;

/// A retail page scraped for promotional copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub key: String,
    pub url: String,
    pub fallback: String,
}

impl Source {
    pub fn new(key: &str, url: &str, fallback: &str) -> Self {
        Source {
            key: key.to_string(),
            url: url.to_string(),
            fallback: fallback.to_string(),
        }
    }

    pub fn parsed_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }
}

#[derive(Debug, Error)]
#[error("source {key} has an invalid url")]
pub struct InvalidSource {
    pub key: String,
    #[source]
    pub source: url::ParseError,
}

/// Every source URL must parse as an absolute URL.
pub fn validate_sources(sources: &[Source]) -> Result<(), InvalidSource> {
    for source in sources.iter() {
        source.parsed_url().map_err(|e| InvalidSource {
            key: source.key.clone(),
            source: e,
        })?;
    }
    Ok(())
}

pub fn default_sources() -> Vec<Source> {
    vec![
        Source::new(
            "rei",
            "https://www.rei.com/outlet",
            "Visit REI Outlet for current offers.",
        ),
        Source::new(
            "moosejaw",
            "https://www.moosejaw.com/content/sale",
            "See Moosejaw’s Sale page for live deals.",
        ),
        Source::new(
            "backcountry",
            "https://www.backcountry.com/sc/current-deals",
            "See Backcountry’s current-deals section for discounts.",
        ),
    ]
}
