use serde::Deserialize;

pub mod recommendation;

pub use recommendation::{MovieSummary, Outcome, Recommendation, RecommendationResponse};

/// Genre label stored for movies whose genre field is empty
pub const NO_GENRES_LISTED: &str = "(no genres listed)";

/// A movie row from the movie catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// Title exactly as it appears in the catalog
    pub title: String,
    /// Title with any trailing `(YYYY)` removed
    pub clean_title: String,
    /// Pipe-delimited genre labels, e.g. `Action|Adventure`
    pub genres: String,
    /// Plot summary, `None` when blank
    pub overview: Option<String>,
}

impl Movie {
    /// Label before the first pipe, or the whole genre field
    pub fn primary_genre(&self) -> &str {
        self.genres.split('|').next().unwrap_or(&self.genres)
    }

    /// Plot text, if any non-whitespace text is present
    pub fn plot(&self) -> Option<&str> {
        self.overview
            .as_deref()
            .filter(|plot| !plot.trim().is_empty())
    }
}

/// A book row from the book catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub title: String,
    pub author: Option<String>,
    /// Empty when the catalog has no description
    pub description: String,
    /// Genre labels in catalog order, case preserved
    pub genres: Vec<String>,
}

// ============================================================================
// Volume Search API Types
// ============================================================================

/// Response from GET /volumes
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeSearchResponse {
    #[serde(default)]
    pub items: Option<Vec<Volume>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub small_thumbnail: Option<String>,
}

impl VolumeSearchResponse {
    /// Thumbnail of the first result, if it has one
    pub fn first_thumbnail(&self) -> Option<&str> {
        self.items
            .as_ref()?
            .first()?
            .volume_info
            .as_ref()?
            .image_links
            .as_ref()?
            .thumbnail
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(genres: &str, overview: Option<&str>) -> Movie {
        Movie {
            title: "Heat (1995)".to_string(),
            clean_title: "Heat".to_string(),
            genres: genres.to_string(),
            overview: overview.map(str::to_string),
        }
    }

    #[test]
    fn test_primary_genre_takes_first_label() {
        assert_eq!(movie("Action|Crime|Drama", None).primary_genre(), "Action");
    }

    #[test]
    fn test_primary_genre_without_pipe() {
        assert_eq!(movie("Science Fiction", None).primary_genre(), "Science Fiction");
    }

    #[test]
    fn test_blank_plot_is_none() {
        assert_eq!(movie("Drama", Some("   ")).plot(), None);
        assert_eq!(movie("Drama", None).plot(), None);
        assert_eq!(movie("Drama", Some("A heist")).plot(), Some("A heist"));
    }

    #[test]
    fn test_volume_response_first_thumbnail() {
        let json = r#"{
            "kind": "books#volumes",
            "totalItems": 2,
            "items": [
                {"volumeInfo": {"title": "Jaws", "imageLinks": {
                    "smallThumbnail": "http://books.example/s.jpg",
                    "thumbnail": "http://books.example/t.jpg"
                }}},
                {"volumeInfo": {"title": "Jaws 2"}}
            ]
        }"#;

        let response: VolumeSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_thumbnail(), Some("http://books.example/t.jpg"));
    }

    #[test]
    fn test_volume_response_without_items() {
        let response: VolumeSearchResponse =
            serde_json::from_str(r#"{"kind": "books#volumes", "totalItems": 0}"#).unwrap();
        assert_eq!(response.first_thumbnail(), None);
    }

    #[test]
    fn test_volume_response_without_image_links() {
        let response: VolumeSearchResponse =
            serde_json::from_str(r#"{"items": [{"volumeInfo": {"title": "Untitled"}}]}"#).unwrap();
        assert_eq!(response.first_thumbnail(), None);
    }
}
