pub mod catalog_filter;
pub mod covers;
pub mod genre_mapping;
pub mod normalize;
pub mod recommendations;
pub mod similarity;

pub use covers::{attach_covers, CoverLookup, CoverQuery, DisabledCovers, GoogleBooksCovers};
pub use genre_mapping::GenreMapping;
pub use recommendations::{recommend, QueryOutcome, RankedBook};
