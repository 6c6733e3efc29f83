use crate::config::OmdbAPIConfig;
use crate::error::AggregatorError;
use crate::sources::{BoxOffice, Extract};
use crate::Result;

use async_trait::async_trait;
use time::{format_description::FormatItem, macros::format_description, Date};

type Json = serde_json::Value;

const RELEASED_FORMAT: &[FormatItem<'_>] = format_description!("[day padding:none] [month repr:short] [year]");

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Movie {
    pub imdb_id: String,
    pub title: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<Date>,
    pub runtime: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub awards: Option<String>,
    pub metascore: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub rotten_tomatoes_score: Option<u32>,
    pub box_office: BoxOffice,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OmdbResponse {
    Found(Movie),
    /// The API answered with `"Response": "False"`; the payload is kept verbatim.
    NotFound(Json),
}

pub struct OmdbAPI<'a> {
    config: &'a OmdbAPIConfig,
    client: reqwest::Client,
}

impl OmdbAPI<'_> {
    pub fn new(config: &OmdbAPIConfig, client: reqwest::Client) -> OmdbAPI {
        OmdbAPI { config, client }
    }

    fn extract_value<'a>(json: &'a Json, key: &str) -> &'a Json {
        json.pointer(key).unwrap_or(&Json::Null)
    }

    fn extract_string(json: &Json, key: &str) -> Option<String> {
        Self::extract_value(json, key)
            .as_str()
            .map(ToOwned::to_owned)
    }

    fn parse_released(released: Option<&str>) -> Option<Date> {
        Date::parse(released?.trim(), RELEASED_FORMAT).ok()
    }

    fn parse_critic_score(&self, json: &Json) -> Option<u32> {
        let key = format!("/Ratings/{}/Value", self.config.critic_rating_index);
        Self::extract_value(json, &key)
            .as_str()
            .and_then(|value| value.trim().trim_end_matches('%').parse::<u32>().ok())
    }

    async fn fetch(&self, imdb_id: &str) -> Result<Json> {
        let body = self
            .client
            .get(self.config.url.as_str())
            .query(&[("apikey", self.config.api_key.as_str()), ("i", imdb_id)])
            .send()
            .await?
            .text()
            .await?;

        Ok(serde_json::from_str(&body)?)
    }

    /// The record keeps the requested identifier even when OMDb answers with
    /// a different canonical `imdbID`.
    pub fn transform(&self, imdb_id: &str, json: Json) -> Result<OmdbResponse> {
        if !json.is_object() {
            return Err(AggregatorError::UnexpectedResponse(format!(
                "expected a JSON object for {}, got {}",
                imdb_id, json
            )));
        }

        if Self::extract_value(&json, "/Response").as_str() == Some("False") {
            return Ok(OmdbResponse::NotFound(json));
        }

        Ok(OmdbResponse::Found(Movie {
            imdb_id: imdb_id.to_owned(),
            title: Self::extract_string(&json, "/Title"),
            year: Self::extract_string(&json, "/Year"),
            rated: Self::extract_string(&json, "/Rated"),
            released: Self::parse_released(Self::extract_value(&json, "/Released").as_str()),
            runtime: Self::extract_string(&json, "/Runtime"),
            director: Self::extract_string(&json, "/Director"),
            actors: Self::extract_string(&json, "/Actors"),
            awards: Self::extract_string(&json, "/Awards"),
            metascore: Self::extract_string(&json, "/Metascore"),
            imdb_rating: Self::extract_string(&json, "/imdbRating"),
            imdb_votes: Self::extract_string(&json, "/imdbVotes"),
            rotten_tomatoes_score: self.parse_critic_score(&json),
            box_office: BoxOffice::default(),
        }))
    }
}

#[async_trait]
impl Extract for OmdbAPI<'_> {
    type Data = OmdbResponse;

    async fn extract(&self, imdb_id: &str) -> Result<Self::Data> {
        let json = self.fetch(imdb_id).await?;

        self.transform(imdb_id, json)
    }
}
