use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    error::AppResult,
    models::{Book, Movie, NO_GENRES_LISTED},
    services::normalize::{clean_title, parse_genre_list},
};

/// Movie CSV row; other columns in the file are ignored
#[derive(Debug, Deserialize)]
struct MovieRow {
    original_title: String,
    #[serde(default)]
    genres: Option<String>,
    #[serde(default)]
    overview: Option<String>,
}

/// Book CSV row; other columns in the file are ignored
#[derive(Debug, Deserialize)]
struct BookRow {
    #[serde(rename = "Book")]
    title: String,
    #[serde(rename = "Author", default)]
    author: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
    #[serde(rename = "Genres", default)]
    genres: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        let clean = clean_title(&row.original_title);
        Self {
            title: row.original_title,
            clean_title: clean,
            genres: non_blank(row.genres).unwrap_or_else(|| NO_GENRES_LISTED.to_string()),
            overview: non_blank(row.overview),
        }
    }
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            genres: parse_genre_list(row.genres.as_deref()),
            title: row.title,
            author: non_blank(row.author),
            description: row.description.unwrap_or_default(),
        }
    }
}

/// Deserializes every row of a CSV stream, skipping rows that fail to parse.
///
/// Only I/O failures abort the load.
fn read_rows<R, T, U>(reader: R, kind: &'static str) -> AppResult<Vec<U>>
where
    R: Read,
    T: DeserializeOwned,
    U: From<T>,
{
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in csv_reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => records.push(U::from(row)),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                skipped += 1;
                tracing::warn!(kind, row = line + 1, error = %e, "Skipping malformed catalog row");
            }
        }
    }

    tracing::debug!(kind, loaded = records.len(), skipped, "Parsed catalog rows");
    Ok(records)
}

pub fn read_movies<R: Read>(reader: R) -> AppResult<Vec<Movie>> {
    read_rows::<R, MovieRow, Movie>(reader, "movie")
}

pub fn read_books<R: Read>(reader: R) -> AppResult<Vec<Book>> {
    read_rows::<R, BookRow, Book>(reader, "book")
}

/// Loads the movie catalog (`original_title`, `genres`, `overview`)
pub fn load_movies(path: impl AsRef<Path>) -> AppResult<Vec<Movie>> {
    read_movies(File::open(path)?)
}

/// Loads the book catalog (`Book`, `Author`, `Description`, `Genres`)
pub fn load_books(path: impl AsRef<Path>) -> AppResult<Vec<Book>> {
    read_books(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_movies() {
        let data = "\
id,original_title,genres,overview,runtime
1,Jaws (1975),Thriller|Horror,A giant shark terrorizes a beach town,124
2,Heat,,,170
3,Alien (1979),Horror|Science Fiction,   ,117
";
        let movies = read_movies(data.as_bytes()).unwrap();
        assert_eq!(movies.len(), 3);

        assert_eq!(movies[0].title, "Jaws (1975)");
        assert_eq!(movies[0].clean_title, "Jaws");
        assert_eq!(movies[0].primary_genre(), "Thriller");
        assert_eq!(movies[0].plot(), Some("A giant shark terrorizes a beach town"));

        assert_eq!(movies[1].genres, NO_GENRES_LISTED);
        assert_eq!(movies[1].overview, None);
        assert_eq!(movies[2].overview, None);
    }

    #[test]
    fn test_read_books() {
        let data = r#"Book,Author,Description,Genres,Avg_Rating
Jaws,Peter Benchley,A shark attacks a coastal town,"['Thriller', 'Horror']",3.9
Untitled,,,Horror,2.0
Broken,Nobody,Bad genres,"[Fiction]",1.0
"#;
        let books = read_books(data.as_bytes()).unwrap();
        assert_eq!(books.len(), 3);

        assert_eq!(books[0].author.as_deref(), Some("Peter Benchley"));
        assert_eq!(books[0].genres, vec!["Thriller", "Horror"]);

        assert_eq!(books[1].author, None);
        assert_eq!(books[1].description, "");
        assert_eq!(books[1].genres, vec!["Horror"]);

        assert!(books[2].genres.is_empty());
    }

    #[test]
    fn test_rows_without_required_column_are_skipped() {
        let data = "genres,overview\nDrama,Something happens\n";
        let movies = read_movies(data.as_bytes()).unwrap();
        assert!(movies.is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_movies("/nonexistent/reelshelf/movies.csv").is_err());
    }
}
