//! Title and genre-field normalization shared by the catalog loader and the
//! query path.

use once_cell::sync::Lazy;
use regex::Regex;

/// One or more trailing `(YYYY)` groups, each optionally preceded by whitespace
static TRAILING_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\s*\([0-9]{4}\))+$").expect("valid trailing year regex"));

/// Strips trailing parenthesized years and surrounding whitespace.
///
/// `clean_title("Inception (2010)") == "Inception"`. Repeated suffixes such as
/// `"Heat (1986) (1995)"` are removed together so the result is idempotent.
pub fn clean_title(title: &str) -> String {
    let trimmed = title.trim();
    TRAILING_YEAR_RE.replace(trimmed, "").trim().to_string()
}

/// Normalizes a raw book genre field into a list of genre labels.
///
/// - `"['Fiction', 'Romance']"` parses as a list literal
/// - `"Horror"` becomes `["Horror"]`
/// - empty, missing, or malformed values become `[]`
pub fn parse_genre_list(raw: Option<&str>) -> Vec<String> {
    let Some(value) = raw else {
        return Vec::new();
    };

    if value.starts_with('[') && value.ends_with(']') {
        return parse_list_literal(value).unwrap_or_default();
    }

    let value = value.trim();
    if value.is_empty() {
        Vec::new()
    } else {
        vec![value.to_string()]
    }
}

/// Parses a bracketed list of quoted strings, e.g. `['a', "b"]`.
///
/// Returns `None` on anything that is not a flat list of string literals.
fn parse_list_literal(value: &str) -> Option<Vec<String>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut quote = match chars.next() {
            None => break,
            Some(q @ ('\'' | '"')) => q,
            Some(_) => return None,
        };

        // adjacent literals concatenate: `'a' 'b'` is one item `ab`
        let mut item = String::new();
        loop {
            loop {
                match chars.next()? {
                    '\\' => match chars.next()? {
                        'n' => item.push('\n'),
                        't' => item.push('\t'),
                        other => item.push(other),
                    },
                    c if c == quote => break,
                    c => item.push(c),
                }
            }

            while chars.next_if(|c| c.is_whitespace()).is_some() {}

            match chars.next_if(|c| matches!(c, '\'' | '"')) {
                Some(next) => quote = next,
                None => break,
            }
        }
        items.push(item);

        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return None,
        }
    }

    Some(items)
}
