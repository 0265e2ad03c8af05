//! [`TriviaSource`] over HTTP using `gloo::net`.

use gloo::net::http::Request;
use trivia_core::{CategoryId, Result, TriviaError, TriviaSource};
use trivia_protocol::{CategoryDetail, CategorySummary, Endpoint};

#[derive(Clone, Debug, PartialEq)]
pub struct HttpSource {
    base: String,
}

impl HttpSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    async fn get_text(&self, endpoint: Endpoint) -> Result<String> {
        let url = endpoint.url(&self.base);
        log::trace!("GET {}", url);

        let response = Request::get(&url).send().await.map_err(source_error)?;
        if !response.ok() {
            return Err(TriviaError::Source(format!(
                "GET {} returned {} {}",
                url,
                response.status(),
                response.status_text()
            )));
        }

        response.text().await.map_err(source_error)
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(trivia_protocol::DEFAULT_API_BASE)
    }
}

fn source_error(err: gloo::net::Error) -> TriviaError {
    TriviaError::Source(err.to_string())
}

impl TriviaSource for HttpSource {
    async fn list_categories(&self, count: u32, offset: u32) -> Result<Vec<CategorySummary>> {
        let body = self
            .get_text(Endpoint::Categories { count, offset })
            .await?;
        trivia_protocol::decode_categories(&body)
            .map_err(|err| TriviaError::Source(format!("malformed category listing: {err}")))
    }

    async fn get_category(&self, id: CategoryId, offset: u32) -> Result<CategoryDetail> {
        let body = self.get_text(Endpoint::Category { id, offset }).await?;
        trivia_protocol::decode_category(&body)
            .map_err(|err| TriviaError::Source(format!("malformed category {id}: {err}")))
    }
}
