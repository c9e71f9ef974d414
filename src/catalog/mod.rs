//! Movie and book catalogs, loaded once at startup and read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use crate::{
    error::AppResult,
    models::{Book, Movie},
    services::normalize::clean_title,
};

pub mod loader;

pub use loader::{load_books, load_movies, read_books, read_movies};

#[derive(Debug, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    books: Vec<Book>,
    /// Lower-cased clean title → index of the first movie carrying it
    title_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>, books: Vec<Book>) -> Self {
        let mut title_index = HashMap::with_capacity(movies.len());
        for (idx, movie) in movies.iter().enumerate() {
            title_index
                .entry(movie.clean_title.to_lowercase())
                .or_insert(idx);
        }

        Self {
            movies,
            books,
            title_index,
        }
    }

    /// Reads both catalog files
    pub fn load(movies_path: impl AsRef<Path>, books_path: impl AsRef<Path>) -> AppResult<Self> {
        let movies = load_movies(movies_path)?;
        let books = load_books(books_path)?;

        tracing::info!(
            movies = movies.len(),
            books = books.len(),
            "Loaded catalogs"
        );

        Ok(Self::new(movies, books))
    }

    /// Finds a movie by title, ignoring case and any trailing `(YYYY)`
    pub fn find_movie(&self, title: &str) -> Option<&Movie> {
        let key = clean_title(title).to_lowercase();
        self.title_index.get(&key).map(|&idx| &self.movies[idx])
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }
}
