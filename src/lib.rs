pub mod config;
pub mod error;
mod options;
pub mod sources;
pub mod transform;

pub use config::Config;
pub use error::{AggregatorError, Result};
pub use options::RunOptions;

use sources::{BoxOfficeScraper, Extract, Movie, MoviesTable, OmdbAPI, OmdbResponse, Sources};
use transform::Dataset;

use regex::Regex;
use std::{collections::HashMap, path::Path, time::Instant};

type Json = serde_json::Value;

const IMDB_ID_PATTERN: &str = r"^tt\d+$";

/// Outcome of enriching one identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment {
    Enriched(Movie),
    /// Raw payload of an API not-found answer.
    NotFound(Json),
    Failed(String),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub rows: usize,
    pub enriched: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl RunSummary {
    fn count(&mut self, enrichment: &Enrichment) {
        match enrichment {
            Enrichment::Enriched(_) => self.enriched += 1,
            Enrichment::NotFound(_) => self.not_found += 1,
            Enrichment::Failed(_) => self.failed += 1,
        }
    }
}

pub struct Aggregator {
    config: Config,
    client: reqwest::Client,
    id_pattern: Regex,
}

impl Aggregator {
    pub fn new(config: Config) -> Result<Aggregator> {
        let id_pattern = Regex::new(IMDB_ID_PATTERN)?;

        Ok(Aggregator {
            config,
            client: reqwest::Client::new(),
            id_pattern,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn sources(&self) -> Sources<'_> {
        Sources {
            omdb_api: OmdbAPI::new(&self.config.omdb_api, self.client.clone()),
            boxoffice_scraper: BoxOfficeScraper::new(
                &self.config.boxoffice_scraper,
                self.client.clone(),
            ),
        }
    }

    pub async fn enrich(&self, imdb_id: &str) -> Enrichment {
        let sources = self.sources();
        self.enrich_with(&sources, imdb_id).await
    }

    async fn enrich_with(&self, sources: &Sources<'_>, imdb_id: &str) -> Enrichment {
        if !self.id_pattern.is_match(imdb_id) {
            tracing::warn!("Skipping malformed identifier {:?}.", imdb_id);
            return Enrichment::Failed(format!("Malformed identifier {:?}", imdb_id));
        }

        match sources.omdb_api.extract(imdb_id).await {
            Ok(OmdbResponse::Found(mut movie)) => {
                match sources.boxoffice_scraper.extract(imdb_id).await {
                    Ok(box_office) => movie.box_office = box_office,
                    Err(err) => {
                        tracing::warn!("Could not scrape box office for {}: {}", imdb_id, err)
                    }
                }
                Enrichment::Enriched(movie)
            }
            Ok(OmdbResponse::NotFound(payload)) => {
                tracing::debug!("OMDb has no record for {}: {}", imdb_id, payload);
                Enrichment::NotFound(payload)
            }
            Err(err) => {
                tracing::warn!("Could not fetch OMDb record for {}: {}", imdb_id, err);
                Enrichment::Failed(err.to_string())
            }
        }
    }

    /// Requests are sent one at a time; repeated identifiers are only fetched once.
    async fn extract(&self, table: &MoviesTable) -> HashMap<String, Enrichment> {
        let sources = self.sources();
        let mut enrichments: HashMap<String, Enrichment> = HashMap::new();

        for imdb_id in table.identifiers() {
            if enrichments.contains_key(imdb_id) {
                continue;
            }

            tracing::debug!("Enriching {:?} ({} done).", imdb_id, enrichments.len());
            let enrichment = self.enrich_with(&sources, imdb_id).await;
            enrichments.insert(imdb_id.to_owned(), enrichment);
        }

        enrichments
    }

    fn transform(
        &self,
        table: &MoviesTable,
        enrichments: &HashMap<String, Enrichment>,
    ) -> Result<Dataset> {
        Dataset::assemble(table, enrichments)
    }

    fn load(&self, dataset: &Dataset, output: &Path) -> Result<()> {
        dataset.write_file(output)?;
        tracing::info!("Wrote {} rows to {}.", dataset.len(), output.display());

        Ok(())
    }

    pub async fn run(&self, options: Option<RunOptions>) -> Result<RunSummary> {
        let options = options.unwrap_or_default();
        let input = options
            .input
            .unwrap_or_else(|| self.config.aggregator.input.clone());
        let output = options
            .output
            .unwrap_or_else(|| self.config.aggregator.output.clone());

        let start = Instant::now();
        let mut table = MoviesTable::from_path(&input, &self.config.aggregator.id_column)?;
        if let Some(limit) = options.limit {
            table.truncate(limit);
        }
        tracing::info!("Loaded {} rows from {}.", table.len(), input.display());

        let enrichments = self.extract(&table).await;
        let dataset = self.transform(&table, &enrichments)?;
        self.load(&dataset, &output)?;

        let mut summary = RunSummary {
            rows: dataset.len(),
            ..RunSummary::default()
        };
        for enrichment in enrichments.values() {
            summary.count(enrichment);
        }

        tracing::info!(
            "Finished in {:?}: {} enriched, {} not found, {} failed.",
            start.elapsed(),
            summary.enriched,
            summary.not_found,
            summary.failed
        );

        Ok(summary)
    }
}
