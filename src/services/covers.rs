//! Book cover thumbnails from a volume search API.
//!
//! Cover lookup is best-effort: a failed, slow or empty lookup leaves the
//! recommendation without an image and never fails the query.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{Recommendation, VolumeSearchResponse},
};

/// Title and optional author of the book whose cover is wanted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverQuery {
    pub title: String,
    pub author: Option<String>,
}

impl From<&Recommendation> for CoverQuery {
    fn from(rec: &Recommendation) -> Self {
        Self {
            title: rec.title.clone(),
            author: rec.author.clone(),
        }
    }
}

/// Source of cover image URLs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CoverLookup: Send + Sync {
    /// Thumbnail URL of the best match, `None` if there is no image
    async fn find_cover(&self, query: &CoverQuery) -> AppResult<Option<String>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Google Books style `/volumes` search
#[derive(Clone)]
pub struct GoogleBooksCovers {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
}

impl GoogleBooksCovers {
    pub fn new(api_url: String, api_key: Option<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// `intitle:<title> inauthor:<author>`, author term only when known
    fn search_terms(query: &CoverQuery) -> String {
        match query.author.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            Some(author) => format!("intitle:{} inauthor:{}", query.title, author),
            None => format!("intitle:{}", query.title),
        }
    }
}

#[async_trait::async_trait]
impl CoverLookup for GoogleBooksCovers {
    async fn find_cover(&self, query: &CoverQuery) -> AppResult<Option<String>> {
        let url = format!("{}/volumes", self.api_url);

        let mut params = vec![("q", Self::search_terms(query))];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        let response = self.http_client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Volume search returned status {}: {}",
                status, body
            )));
        }

        let results: VolumeSearchResponse = response.json().await?;
        let thumbnail = results.first_thumbnail().map(str::to_string);

        tracing::debug!(
            title = %query.title,
            found = thumbnail.is_some(),
            provider = self.name(),
            "Cover lookup completed"
        );

        Ok(thumbnail)
    }

    fn name(&self) -> &'static str {
        "google_books"
    }
}

/// Used when cover lookups are turned off
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCovers;

#[async_trait::async_trait]
impl CoverLookup for DisabledCovers {
    async fn find_cover(&self, _query: &CoverQuery) -> AppResult<Option<String>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Fills `cover_url` on each recommendation, one lookup task per row.
///
/// Each row fails independently: errors, timeouts and panicked tasks leave
/// that row's `cover_url` as `None`.
pub async fn attach_covers(
    covers: Arc<dyn CoverLookup>,
    recommendations: &mut [Recommendation],
    timeout: Duration,
) {
    let tasks: Vec<_> = recommendations
        .iter()
        .map(|rec| {
            let covers = Arc::clone(&covers);
            let query = CoverQuery::from(rec);
            tokio::spawn(async move {
                tokio::time::timeout(timeout, covers.find_cover(&query)).await
            })
        })
        .collect();

    let mut missing = 0usize;

    for (rec, task) in recommendations.iter_mut().zip(tasks) {
        rec.cover_url = match task.await {
            Ok(Ok(Ok(url))) => url,
            Ok(Ok(Err(e))) => {
                tracing::warn!(title = %rec.title, error = %e, "Cover lookup failed");
                None
            }
            Ok(Err(_)) => {
                tracing::warn!(title = %rec.title, timeout_ms = timeout.as_millis() as u64, "Cover lookup timed out");
                None
            }
            Err(e) => {
                tracing::error!(title = %rec.title, error = %e, "Cover task join error");
                None
            }
        };

        if rec.cover_url.is_none() {
            missing += 1;
        }
    }

    tracing::debug!(
        provider = covers.name(),
        rows = recommendations.len(),
        missing,
        "Attached covers"
    );
}
