use std::collections::HashSet;

use crate::models::Book;
use crate::services::genre_mapping::GenreMapping;

/// Result of narrowing the book catalog to a movie genre
#[derive(Debug, PartialEq)]
pub enum GenreFilter<'a> {
    /// The movie genre is not a key in the mapping table
    NoMapping,
    /// The mapping resolved; `books` may be empty
    Matched {
        book_genres: &'a [String],
        books: Vec<&'a Book>,
    },
}

/// Selects books sharing at least one genre with the mapped list.
///
/// Genre comparison is exact equality after lowercasing both sides. Catalog
/// order is preserved.
pub fn filter_by_genre<'a>(
    movie_primary_genre: &str,
    mapping: &'a GenreMapping,
    books: &'a [Book],
) -> GenreFilter<'a> {
    let Some(book_genres) = mapping.lookup(movie_primary_genre) else {
        return GenreFilter::NoMapping;
    };

    let wanted: HashSet<String> = book_genres.iter().map(|g| g.to_lowercase()).collect();

    let books = books
        .iter()
        .filter(|book| {
            book.genres
                .iter()
                .any(|genre| wanted.contains(&genre.to_lowercase()))
        })
        .collect();

    GenreFilter::Matched { book_genres, books }
}
