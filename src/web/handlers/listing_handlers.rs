// src/web/handlers/listing_handlers.rs
use crate::core::pagination::{paginate, PageOutcome};
use crate::core::search::{company_facets, filter_jobs, location_facets};
use crate::core::skills::skill_facets;
use crate::web::types::{ListingParams, ServerConfig};
use crate::web::views::{render, Facets, ListingsTemplate};

use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::{Responder, State};
use tracing::info;

#[derive(Responder)]
pub enum ListingResponse {
    Page(RawHtml<String>),
    Redirect(Redirect),
}

pub async fn listings_handler(
    params: ListingParams,
    config: &State<ServerConfig>,
) -> Result<ListingResponse, Status> {
    let jobs = config.store.load().await;
    let criteria = params.criteria();
    let filtered = filter_jobs(&jobs, &criteria);
    info!("Filtered {} of {} jobs", filtered.len(), jobs.len());

    let page = match paginate(&filtered, config.page_size, params.page_number()) {
        PageOutcome::Page(page) => page,
        PageOutcome::Redirect => {
            let target = params.page_href(1);
            info!(
                "Page {} is out of range, redirecting to {}",
                params.page_number(),
                target
            );
            return Ok(ListingResponse::Redirect(Redirect::to(target)));
        }
    };

    info!(
        "Showing jobs {} to {} of {}",
        page.first_position(),
        page.last_position(),
        page.total_items
    );

    let facets = Facets {
        locations: location_facets(&jobs),
        companies: company_facets(&jobs),
        skills: skill_facets(&jobs),
    };

    render(&ListingsTemplate::new(&params, &facets, &page)).map(ListingResponse::Page)
}
