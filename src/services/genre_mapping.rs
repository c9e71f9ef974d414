use std::collections::BTreeMap;

use crate::models::NO_GENRES_LISTED;

/// Movie genre → book genres, as curated for the movie and book catalogs
const DEFAULT_TABLE: &[(&str, &[&str])] = &[
    ("Drama", &["Fiction", "Literature", "Historical Fiction"]),
    ("Comedy", &["Humor"]),
    ("Thriller", &["Thriller", "Mystery Thriller", "Crime", "Suspense"]),
    ("Romance", &["Romance"]),
    ("Action", &["Adventure", "Thriller"]),
    ("Horror", &["Horror"]),
    ("Documentary", &["Nonfiction", "Biography", "Memoir", "History"]),
    ("Crime", &["Crime", "Mystery", "Thriller"]),
    ("Adventure", &["Adventure", "Fantasy", "Science Fiction"]),
    ("Science Fiction", &["Science Fiction"]),
    ("Children", &["Childrens", "Middle Grade"]),
    ("Animation", &["Childrens", "Fantasy"]),
    ("Mystery", &["Mystery", "Crime", "Thriller"]),
    ("Fantasy", &["Fantasy", "Science Fiction Fantasy"]),
    ("War", &["Historical Fiction", "War", "History"]),
    ("Western", &["Historical Fiction", "Adventure"]),
    ("Musical", &["Fiction"]),
    ("Film-Noir", &["Mystery", "Crime"]),
    (NO_GENRES_LISTED, &["Fiction"]),
];

/// Read-only lookup from a movie genre label to an ordered list of book genres
///
/// Keys match exactly (case-sensitive). There is no fallback bucket: a genre
/// outside the table resolves to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreMapping {
    table: BTreeMap<String, Vec<String>>,
}

impl Default for GenreMapping {
    fn default() -> Self {
        Self::from_pairs(
            DEFAULT_TABLE
                .iter()
                .map(|(movie, books)| (*movie, books.iter().copied())),
        )
    }
}

impl GenreMapping {
    /// Builds a mapping from `(movie genre, book genres)` pairs
    pub fn from_pairs<K, V, I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = pairs
            .into_iter()
            .map(|(movie, books)| (movie.into(), books.into_iter().map(Into::into).collect()))
            .collect();
        Self { table }
    }

    pub fn lookup(&self, movie_genre: &str) -> Option<&[String]> {
        self.table.get(movie_genre).map(Vec::as_slice)
    }

    /// All entries ordered by movie genre
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.table
            .iter()
            .map(|(movie, books)| (movie.as_str(), books.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_size() {
        assert_eq!(GenreMapping::default().len(), 19);
    }

    #[test]
    fn test_lookup_preserves_order() {
        let mapping = GenreMapping::default();
        assert_eq!(
            mapping.lookup("Thriller").unwrap(),
            ["Thriller", "Mystery Thriller", "Crime", "Suspense"]
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mapping = GenreMapping::default();
        assert!(mapping.lookup("Drama").is_some());
        assert!(mapping.lookup("drama").is_none());
    }

    #[test]
    fn test_unmapped_genre_has_no_default() {
        let mapping = GenreMapping::default();
        assert!(mapping.lookup("Foreign").is_none());
        assert!(mapping.lookup("TV Movie").is_none());
        assert!(mapping.lookup("").is_none());
    }

    #[test]
    fn test_no_genres_sentinel_maps_to_fiction() {
        let mapping = GenreMapping::default();
        assert_eq!(mapping.lookup(NO_GENRES_LISTED).unwrap(), ["Fiction"]);
    }

    #[test]
    fn test_from_pairs() {
        let mapping = GenreMapping::from_pairs([("Drama", vec!["Fiction", "Literature"])]);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.lookup("Drama").unwrap(), ["Fiction", "Literature"]);
    }
}
