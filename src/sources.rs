pub mod boxoffice_scraper;
pub mod movies_csv;
pub mod omdb_api;

pub use boxoffice_scraper::{BoxOffice, BoxOfficeScraper};
pub use movies_csv::MoviesTable;
pub use omdb_api::{Movie, OmdbAPI, OmdbResponse};

use crate::Result;

use async_trait::async_trait;

pub struct Sources<'a> {
    pub omdb_api: OmdbAPI<'a>,
    pub boxoffice_scraper: BoxOfficeScraper<'a>,
}

/// A remote source queried once per identifier.
#[async_trait]
pub trait Extract {
    type Data: Send;

    async fn extract(&self, imdb_id: &str) -> Result<Self::Data>;
}
