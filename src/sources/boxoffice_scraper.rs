use crate::config::BoxOfficeScraperConfig;
use crate::error::AggregatorError;
use crate::sources::Extract;
use crate::Result;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

const SUMMARY_ROWS: &str = ".mojo-summary-values > .a-section";
const PERFORMANCE_ROWS: &str = ".mojo-performance-summary-table .a-section";
const LABEL: &str = "span";
const MONEY: &str = "span.money";

const OPENING_LABEL: &str = "Domestic Opening";
const BUDGET_LABEL: &str = "Budget";
const DOMESTIC_LABEL: &str = "Domestic";

/// Box-office figures as printed on the title page, e.g. `$25,000,000`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BoxOffice {
    pub opening_weekend: Option<String>,
    pub budget: Option<String>,
    pub domestic_gross: Option<String>,
}

impl BoxOffice {
    /// Each figure is looked up on its own, so a page missing one section
    /// still yields the others.
    pub fn parse(html: &Html) -> BoxOffice {
        BoxOffice {
            opening_weekend: Self::money_for_label(html, SUMMARY_ROWS, OPENING_LABEL),
            budget: Self::money_for_label(html, SUMMARY_ROWS, BUDGET_LABEL),
            domestic_gross: Self::money_for_label(html, PERFORMANCE_ROWS, DOMESTIC_LABEL),
        }
    }

    fn selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|err| AggregatorError::Selector {
            selector: selector.to_owned(),
            message: err.to_string(),
        })
    }

    fn text(element: ElementRef) -> String {
        element.text().collect::<String>().trim().to_owned()
    }

    fn selectors(rows: &str) -> Result<(Selector, Selector, Selector)> {
        Ok((
            Self::selector(rows)?,
            Self::selector(LABEL)?,
            Self::selector(MONEY)?,
        ))
    }

    fn money_for_label(html: &Html, rows: &str, label: &str) -> Option<String> {
        let (row_selector, label_selector, money) = match Self::selectors(rows) {
            Ok(selectors) => selectors,
            Err(err) => {
                tracing::error!("{}", err);
                return None;
            }
        };

        html.select(&row_selector)
            .find(|row| {
                row.select(&label_selector)
                    .next()
                    .map(|span| Self::text(span).starts_with(label))
                    .unwrap_or(false)
            })
            .and_then(|row| row.select(&money).next())
            .map(Self::text)
            .filter(|value| !value.is_empty())
    }
}

pub struct BoxOfficeScraper<'a> {
    config: &'a BoxOfficeScraperConfig,
    client: reqwest::Client,
}

impl BoxOfficeScraper<'_> {
    pub fn new(config: &BoxOfficeScraperConfig, client: reqwest::Client) -> BoxOfficeScraper {
        BoxOfficeScraper { config, client }
    }

    pub fn title_url(&self, imdb_id: &str) -> String {
        format!("{}{}", self.config.url, imdb_id)
    }

    async fn load_title_page(&self, imdb_id: &str) -> Result<Html> {
        let body = self
            .client
            .get(self.title_url(imdb_id))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(Html::parse_document(&body))
    }
}

#[async_trait]
impl Extract for BoxOfficeScraper<'_> {
    type Data = BoxOffice;

    async fn extract(&self, imdb_id: &str) -> Result<Self::Data> {
        let html = self.load_title_page(imdb_id).await?;
        let box_office = BoxOffice::parse(&html);

        if box_office == BoxOffice::default() {
            tracing::debug!("No box office figures found for {}.", imdb_id);
        }

        Ok(box_office)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn load_fixture() -> String {
        fs::read_to_string("fixtures/boxoffice_title.html").unwrap()
    }

    #[test]
    fn test_parse() {
        let html = Html::parse_document(&load_fixture());
        let actual = BoxOffice::parse(&html);
        assert_eq!(actual.opening_weekend.as_deref(), Some("$727,327"));
        assert_eq!(actual.budget.as_deref(), Some("$25,000,000"));
        assert_eq!(actual.domestic_gross.as_deref(), Some("$28,767,189"));
    }

    #[test]
    fn test_parse_unexpected_structure() {
        let html = Html::parse_document("<html><body><div><p>Page moved</p></div></body></html>");
        assert_eq!(BoxOffice::parse(&html), BoxOffice::default());
    }

    #[test]
    fn test_parse_partial() {
        let html = Html::parse_document(
            r#"<div class="mojo-summary-values">
                 <div class="a-section"><span>Budget</span><span><span class="money">$1,000</span></span></div>
               </div>"#,
        );
        let actual = BoxOffice::parse(&html);
        assert_eq!(actual.budget.as_deref(), Some("$1,000"));
        assert_eq!(actual.opening_weekend, None);
        assert_eq!(actual.domestic_gross, None);
    }

    #[tokio::test]
    async fn test_extract() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/title/tt0111161"))
            .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture()))
            .mount(&server)
            .await;

        let config = BoxOfficeScraperConfig {
            url: format!("{}/title/", server.uri()),
        };
        let scraper = BoxOfficeScraper::new(&config, reqwest::Client::new());
        let actual = scraper.extract("tt0111161").await.unwrap();
        assert_eq!(actual.budget.as_deref(), Some("$25,000,000"));
    }

    #[tokio::test]
    async fn test_extract_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let config = BoxOfficeScraperConfig {
            url: format!("{}/title/", server.uri()),
        };
        let scraper = BoxOfficeScraper::new(&config, reqwest::Client::new());
        assert!(scraper.extract("tt9999999").await.is_err());
    }
}
