//! Semantic Scholar Graph API client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use citegraph_core::{Error, ProviderSettings, Result};

use crate::retry::{AttemptOutcome, FetchMachine, FetchState, RetryPolicy};
use crate::types::ProviderPaper;
use crate::PaperProvider;

/// Fields requested for the paper and for each reference/citation entry.
pub const PAPER_FIELDS: &str = "paperId,title,authors,year,publicationDate,citationCount,url,\
references.paperId,references.title,references.authors,references.year,\
references.publicationDate,references.citationCount,references.url,\
citations.paperId,citations.title,citations.authors,citations.year,\
citations.publicationDate,citations.citationCount,citations.url";

pub struct SemanticScholarClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl SemanticScholarClient {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(concat!("citegraph/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            retry: RetryPolicy::single(settings.retry_delay()),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn paper_url(&self, paper_id: &str) -> String {
        format!("{}/paper/{}", self.base_url, paper_id)
    }

    /// One HTTP round trip, classified for the retry machine.
    async fn attempt(&self, url: &str) -> std::result::Result<ProviderPaper, AttemptOutcome> {
        let mut request = self.client.get(url).query(&[("fields", PAPER_FIELDS)]);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AttemptOutcome::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<ProviderPaper>()
                .await
                .map_err(|e| AttemptOutcome::Decode(e.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(AttemptOutcome::RateLimited),
            StatusCode::NOT_FOUND => Err(AttemptOutcome::NotFound),
            status => Err(AttemptOutcome::Status(status.as_u16())),
        }
    }
}

#[async_trait]
impl PaperProvider for SemanticScholarClient {
    fn name(&self) -> &str {
        "semantic-scholar"
    }

    async fn fetch_paper(&self, paper_id: &str) -> Result<ProviderPaper> {
        let url = self.paper_url(paper_id);
        let mut machine = FetchMachine::new(self.retry);
        let mut fetched = None;
        machine.start();

        loop {
            match machine.state().clone() {
                FetchState::Idle => {
                    machine.start();
                }
                FetchState::Fetching { attempt } => {
                    debug!("Fetching {} (attempt {})", paper_id, attempt);
                    match self.attempt(&url).await {
                        Ok(paper) => {
                            fetched = Some(paper);
                            machine.record(AttemptOutcome::Success);
                        }
                        Err(outcome) => {
                            machine.record(outcome);
                        }
                    }
                }
                FetchState::RetryWait { attempt, delay } => {
                    warn!(
                        "Rate limited fetching {} on attempt {}, retrying in {:?}",
                        paper_id, attempt, delay
                    );
                    tokio::time::sleep(delay).await;
                    machine.resume();
                }
                FetchState::Done => break,
                FetchState::Failed(failure) => return Err(failure.into_error(paper_id)),
            }
        }

        let paper = fetched
            .ok_or_else(|| Error::Internal(format!("fetch of {} finished empty", paper_id)))?;
        if paper.id().is_none() {
            return Err(Error::NotFound(format!(
                "provider returned no identifier for {}",
                paper_id
            )));
        }
        Ok(paper)
    }
}
