//! Listing module for Forum-Scribe
//!
//! Produces the ordered set of discussion links for a run, either by walking
//! the structured topic-list endpoint or by scraping a rendered listing page.

mod paginator;
mod scrape;

pub use paginator::{paginate_forum, ListingQuery, Pagination};
pub use scrape::scrape_listing;
