use serde::{Deserialize, Serialize};

/// Terminal state of a recommendation query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    MovieNotFound,
    NoMappedGenres,
    NoBooksFound,
    NoPlotSummary,
    Success,
}

/// What the service resolved about the requested movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub title: String,
    pub genres: String,
    pub primary_genre: String,
    /// `None` when the primary genre has no mapping
    pub mapped_book_genres: Option<Vec<String>>,
}

/// One ranked book returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    /// 1-based position in the ranking
    pub rank: usize,
    pub title: String,
    pub author: Option<String>,
    pub description: String,
    pub genres: Vec<String>,
    pub similarity: f64,
    pub cover_url: Option<String>,
}

/// Response body for GET /api/v1/recommendations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub query: String,
    pub outcome: Outcome,
    pub message: String,
    pub movie: Option<MovieSummary>,
    pub recommendations: Vec<Recommendation>,
}
