use crate::{
    catalog::Catalog,
    models::{Book, Movie, MovieSummary, Outcome, Recommendation, RecommendationResponse},
    services::{
        catalog_filter::{filter_by_genre, GenreFilter},
        genre_mapping::GenreMapping,
        similarity::{self, RESULT_LIMIT},
    },
};

/// A catalog book with its plot similarity score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedBook<'a> {
    pub book: &'a Book,
    pub similarity: f64,
}

/// Where a recommendation query stopped
///
/// Every variant is an expected result; none of them is an error.
#[derive(Debug, PartialEq)]
pub enum QueryOutcome<'a> {
    MovieNotFound,
    NoMappedGenres {
        movie: &'a Movie,
    },
    NoBooksFound {
        movie: &'a Movie,
        book_genres: &'a [String],
    },
    NoPlotSummary {
        movie: &'a Movie,
        book_genres: &'a [String],
    },
    Success {
        movie: &'a Movie,
        book_genres: &'a [String],
        books: Vec<RankedBook<'a>>,
    },
}

/// Recommends books for a movie title.
///
/// Looks the title up, maps its primary genre to book genres, filters the
/// book catalog by those genres and ranks the survivors by how closely their
/// descriptions match the movie's plot. At most [`RESULT_LIMIT`] books are
/// returned.
pub fn recommend<'a>(
    catalog: &'a Catalog,
    mapping: &'a GenreMapping,
    title: &str,
) -> QueryOutcome<'a> {
    let Some(movie) = catalog.find_movie(title) else {
        tracing::info!(title = %title, "Movie not found");
        return QueryOutcome::MovieNotFound;
    };

    let primary_genre = movie.primary_genre();

    let (book_genres, candidates) = match filter_by_genre(primary_genre, mapping, catalog.books())
    {
        GenreFilter::NoMapping => {
            tracing::info!(movie = %movie.title, genre = %primary_genre, "No mapped book genres");
            return QueryOutcome::NoMappedGenres { movie };
        }
        GenreFilter::Matched { book_genres, books } => (book_genres, books),
    };

    if candidates.is_empty() {
        tracing::info!(movie = %movie.title, genre = %primary_genre, "No books for mapped genres");
        return QueryOutcome::NoBooksFound { movie, book_genres };
    }

    let Some(plot) = movie.plot() else {
        tracing::info!(movie = %movie.title, "Movie has no plot summary");
        return QueryOutcome::NoPlotSummary { movie, book_genres };
    };

    let descriptions: Vec<&str> = candidates.iter().map(|b| b.description.as_str()).collect();
    let ranked = similarity::top_n(similarity::rank(plot, &descriptions), RESULT_LIMIT);

    let books: Vec<RankedBook<'a>> = ranked
        .into_iter()
        .map(|scored| RankedBook {
            book: candidates[scored.index],
            similarity: scored.score,
        })
        .collect();

    tracing::info!(
        movie = %movie.title,
        genre = %primary_genre,
        candidates = candidates.len(),
        returned = books.len(),
        "Ranked book recommendations"
    );

    QueryOutcome::Success {
        movie,
        book_genres,
        books,
    }
}

impl<'a> QueryOutcome<'a> {
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::MovieNotFound => Outcome::MovieNotFound,
            Self::NoMappedGenres { .. } => Outcome::NoMappedGenres,
            Self::NoBooksFound { .. } => Outcome::NoBooksFound,
            Self::NoPlotSummary { .. } => Outcome::NoPlotSummary,
            Self::Success { .. } => Outcome::Success,
        }
    }

    pub fn movie(&self) -> Option<&'a Movie> {
        match self {
            Self::MovieNotFound => None,
            Self::NoMappedGenres { movie }
            | Self::NoBooksFound { movie, .. }
            | Self::NoPlotSummary { movie, .. }
            | Self::Success { movie, .. } => Some(*movie),
        }
    }

    fn book_genres(&self) -> Option<&'a [String]> {
        match self {
            Self::MovieNotFound | Self::NoMappedGenres { .. } => None,
            Self::NoBooksFound { book_genres, .. }
            | Self::NoPlotSummary { book_genres, .. }
            | Self::Success { book_genres, .. } => Some(*book_genres),
        }
    }

    /// User-facing notice for this outcome
    pub fn message(&self, query: &str) -> String {
        match self {
            Self::MovieNotFound => format!("Movie '{}' not found in the catalog.", query),
            Self::NoMappedGenres { movie } => {
                format!("No mapped book genres for '{}'.", movie.primary_genre())
            }
            Self::NoBooksFound { .. } => "No books found for mapped genres.".to_string(),
            Self::NoPlotSummary { .. } => "No plot summary found for this movie.".to_string(),
            Self::Success { books, .. } => {
                format!("Top {} book recommendations for '{}'.", books.len(), query)
            }
        }
    }

    /// Builds the response body; covers are attached separately
    pub fn to_response(&self, query: &str) -> RecommendationResponse {
        let movie = self.movie().map(|movie| MovieSummary {
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            primary_genre: movie.primary_genre().to_string(),
            mapped_book_genres: self.book_genres().map(<[String]>::to_vec),
        });

        let recommendations = match self {
            Self::Success { books, .. } => books
                .iter()
                .enumerate()
                .map(|(i, ranked)| Recommendation {
                    rank: i + 1,
                    title: ranked.book.title.clone(),
                    author: ranked.book.author.clone(),
                    description: ranked.book.description.clone(),
                    genres: ranked.book.genres.clone(),
                    similarity: ranked.similarity,
                    cover_url: None,
                })
                .collect(),
            _ => Vec::new(),
        };

        RecommendationResponse {
            query: query.to_string(),
            outcome: self.outcome(),
            message: self.message(query),
            movie,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::normalize::clean_title;

    fn movie(title: &str, genres: &str, overview: Option<&str>) -> Movie {
        Movie {
            title: title.to_string(),
            clean_title: clean_title(title),
            genres: genres.to_string(),
            overview: overview.map(str::to_string),
        }
    }

    fn book(title: &str, description: &str, genres: &[&str]) -> Book {
        Book {
            title: title.to_string(),
            author: None,
            description: description.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn jaws_catalog() -> Catalog {
        Catalog::new(
            vec![
                movie(
                    "Jaws (1975)",
                    "Thriller",
                    Some("A giant shark terrorizes a beach town"),
                ),
                movie("Koyaanisqatsi (1982)", "Foreign|Documentary", Some("Images")),
                movie("Quiet Film", "Western", Some("Cowboys ride west")),
                movie("Lost Reel", "Horror", None),
            ],
            vec![
                book("Jaws", "A shark attacks a coastal town", &["Thriller", "Horror"]),
                book("Persuasion", "A second chance at love", &["Romance"]),
                book("It", "", &["horror"]),
            ],
        )
    }

    #[test]
    fn test_end_to_end_jaws() {
        let catalog = jaws_catalog();
        let mapping = GenreMapping::default();

        let outcome = recommend(&catalog, &mapping, "Jaws (1975)");
        match &outcome {
            QueryOutcome::Success {
                movie,
                book_genres,
                books,
            } => {
                assert_eq!(movie.title, "Jaws (1975)");
                assert_eq!(*book_genres, ["Thriller", "Mystery Thriller", "Crime", "Suspense"]);
                assert_eq!(books.len(), 1);
                assert_eq!(books[0].book.title, "Jaws");
                assert!(books[0].similarity > 0.0);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(outcome.outcome(), Outcome::Success);
    }

    #[test]
    fn test_movie_not_found() {
        let catalog = jaws_catalog();
        let mapping = GenreMapping::default();
        let outcome = recommend(&catalog, &mapping, "Jaws 2");
        assert_eq!(outcome, QueryOutcome::MovieNotFound);
        assert_eq!(outcome.message("Jaws 2"), "Movie 'Jaws 2' not found in the catalog.");
    }

    #[test]
    fn test_unmapped_primary_genre() {
        let catalog = jaws_catalog();
        let mapping = GenreMapping::default();
        let outcome = recommend(&catalog, &mapping, "koyaanisqatsi");
        assert_eq!(outcome.outcome(), Outcome::NoMappedGenres);
        assert_eq!(outcome.message("koyaanisqatsi"), "No mapped book genres for 'Foreign'.");
    }

    #[test]
    fn test_mapped_but_no_books() {
        let catalog = jaws_catalog();
        let mapping = GenreMapping::default();
        let outcome = recommend(&catalog, &mapping, "Quiet Film");
        assert_eq!(outcome.outcome(), Outcome::NoBooksFound);
    }

    #[test]
    fn test_no_plot_summary() {
        let catalog = jaws_catalog();
        let mapping = GenreMapping::default();
        let outcome = recommend(&catalog, &mapping, "Lost Reel");
        assert_eq!(outcome.outcome(), Outcome::NoPlotSummary);
    }

    #[test]
    fn test_results_capped_and_sorted() {
        let mut books: Vec<Book> = (0..15)
            .map(|i| book(&format!("Filler {i}"), "gardening tips", &["Horror"]))
            .collect();
        books.push(book("Haunted", "a haunted house with ghosts", &["Horror"]));
        let catalog = Catalog::new(
            vec![movie("Poltergeist (1982)", "Horror", Some("Ghosts haunt a suburban house"))],
            books,
        );

        let mapping = GenreMapping::default();
        let outcome = recommend(&catalog, &mapping, "Poltergeist");
        let QueryOutcome::Success { books, .. } = outcome else {
            panic!("expected success");
        };

        assert_eq!(books.len(), RESULT_LIMIT);
        assert_eq!(books[0].book.title, "Haunted");
        assert!(books.windows(2).all(|w| w[0].similarity >= w[1].similarity));
        assert_eq!(books[1].book.title, "Filler 0");
    }

    #[test]
    fn test_to_response() {
        let catalog = jaws_catalog();
        let mapping = GenreMapping::default();
        let outcome = recommend(&catalog, &mapping, "jaws");
        let response = outcome.to_response("jaws");

        assert_eq!(response.outcome, Outcome::Success);
        assert_eq!(response.message, "Top 1 book recommendations for 'jaws'.");
        let summary = response.movie.unwrap();
        assert_eq!(summary.primary_genre, "Thriller");
        assert_eq!(summary.mapped_book_genres.unwrap().len(), 4);
        assert_eq!(response.recommendations[0].rank, 1);
        assert_eq!(response.recommendations[0].cover_url, None);
    }

    #[test]
    fn test_to_response_without_mapping_has_summary() {
        let catalog = jaws_catalog();
        let mapping = GenreMapping::default();
        let response = recommend(&catalog, &mapping, "Koyaanisqatsi")
            .to_response("Koyaanisqatsi");

        let summary = response.movie.unwrap();
        assert_eq!(summary.genres, "Foreign|Documentary");
        assert_eq!(summary.mapped_book_genres, None);
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn test_zero_similarity_serializes_unsigned() {
        let catalog = Catalog::new(
            vec![movie("Jaws (1975)", "Thriller", Some("A giant shark terrorizes a beach town"))],
            vec![
                book("Jaws", "A shark attacks a coastal town", &["Thriller"]),
                book("Blank", "", &["Thriller"]),
            ],
        );
        let mapping = GenreMapping::default();
        let response = recommend(&catalog, &mapping, "Jaws").to_response("Jaws");

        let blank = &response.recommendations[1];
        assert_eq!(blank.title, "Blank");
        assert!(blank.similarity.is_sign_positive());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["recommendations"][1]["similarity"], serde_json::json!(0.0));
        assert!(!serde_json::to_string(&response).unwrap().contains("-0.0"));
    }
}
