use crate::Result;

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

const DEFAULT_CRITIC_RATING_INDEX: usize = 1;

fn default_critic_rating_index() -> usize {
    DEFAULT_CRITIC_RATING_INDEX
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregatorConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub id_column: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OmdbAPIConfig {
    pub url: String,
    pub api_key: String,
    /// Position of the critic score inside the `Ratings` list.
    #[serde(default = "default_critic_rating_index")]
    pub critic_rating_index: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoxOfficeScraperConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub aggregator: AggregatorConfig,
    pub omdb_api: OmdbAPIConfig,
    pub boxoffice_scraper: BoxOfficeScraperConfig,
}

impl Config {
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Config> {
        let config = fs::read_to_string(filename)?;
        let config: Config = toml::from_str(&config)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            aggregator: AggregatorConfig {
                input: PathBuf::from("the-movies-dataset/movies_metadata.csv"),
                output: PathBuf::from("movies_dataset.csv"),
                id_column: "imdb_id".to_owned(),
            },
            omdb_api: OmdbAPIConfig {
                url: "http://www.omdbapi.com/".to_owned(),
                api_key: "myAPI_KEY".to_owned(),
                critic_rating_index: DEFAULT_CRITIC_RATING_INDEX,
            },
            boxoffice_scraper: BoxOfficeScraperConfig {
                url: "https://www.boxofficemojo.com/title/".to_owned(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file() {
        let config = Config::from_file("config/config.toml").unwrap();
        assert_eq!(config.omdb_api.url, "http://www.omdbapi.com/");
        assert_eq!(config.omdb_api.critic_rating_index, 1);
        assert_eq!(config.aggregator.id_column, "imdb_id");
        assert_eq!(
            config.boxoffice_scraper.url,
            "https://www.boxofficemojo.com/title/"
        );
    }

    #[test]
    fn test_from_file_failure() {
        assert!(Config::from_file("should_fail.toml").is_err());
    }

    #[test]
    fn test_critic_rating_index_defaults() {
        let config: Config = toml::from_str(
            r#"
            [aggregator]
            input = "in.csv"
            output = "out.csv"
            id_column = "imdb_id"

            [omdb_api]
            url = "http://localhost/"
            api_key = "key"

            [boxoffice_scraper]
            url = "http://localhost/title/"
            "#,
        )
        .unwrap();
        assert_eq!(config.omdb_api.critic_rating_index, 1);
        assert_eq!(config.aggregator.input, PathBuf::from("in.csv"));
    }

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.omdb_api.url, "http://www.omdbapi.com/");
        assert_eq!(config.aggregator.output, PathBuf::from("movies_dataset.csv"));
    }
}
