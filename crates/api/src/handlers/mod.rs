pub mod aggregate;
pub mod common;
pub mod health;
pub mod scrape;
pub mod trends;

pub use aggregate::post_aggregate;
pub use common::{error_response, ApiError, ErrorResponse};
pub use health::{health, ready};
pub use scrape::post_scrape;
pub use trends::{post_trends, trend_term};
