use std::time::Duration;

use actix_web::{get, http::header::CACHE_CONTROL, web, HttpResponse};
use serde::Serialize;

use crate::{domain::DealSet, services::DealScraper};

/// How long an upstream cache may keep serving a computed deal list.
#[derive(Debug, Clone, Copy)]
pub struct RevalidationWindow(pub Duration);

impl RevalidationWindow {
    pub fn cache_control(&self) -> String {
        let secs = self.0.as_secs();
        format!(
            "public, max-age=0, s-maxage={}, stale-while-revalidate={}",
            secs, secs
        )
    }
}

#[derive(Serialize)]
struct DealsResponse {
    success: bool,
    deals: DealSet,
}

#[get("/deals")]
async fn get_deals(
    scraper: web::Data<DealScraper>,
    window: web::Data<RevalidationWindow>,
) -> HttpResponse {
    let deals = scraper.gather().await;

    HttpResponse::Ok()
        .insert_header((CACHE_CONTROL, window.cache_control()))
        .json(DealsResponse {
            success: true,
            deals,
        })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::RevalidationWindow;

    #[test]
    fn cache_control_carries_the_window() {
        let window = RevalidationWindow(Duration::from_secs(1800));
        assert_eq!(
            window.cache_control(),
            "public, max-age=0, s-maxage=1800, stale-while-revalidate=1800"
        );
    }
}
