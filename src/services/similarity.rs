//! TF-IDF cosine ranking of candidate texts against a single reference text.
//!
//! The vector space is rebuilt from scratch on every call: the reference is
//! document 0 and each candidate follows it. Scores are only comparable within
//! one call.

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of ranked books returned per query
pub const RESULT_LIMIT: usize = 10;

/// Tokens are runs of two or more word characters
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Standard English stop-word list used by common TF-IDF vectorizers
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
    "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
    "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
    "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
    "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
    "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
    "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
    "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
    "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
    "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
    "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
    "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
    "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// A candidate's position in the input and its cosine similarity to the reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub index: usize,
    pub score: f64,
}

/// Sparse document vector keyed by vocabulary index; ordered so sums are deterministic
type SparseVector = BTreeMap<usize, f64>;

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Raw term counts per document, with terms interned into a shared vocabulary
fn term_counts(documents: &[&str]) -> (Vec<SparseVector>, usize) {
    let mut vocabulary: HashMap<String, usize> = HashMap::new();
    let counts = documents
        .iter()
        .map(|doc| {
            let mut counts = SparseVector::new();
            for token in tokenize(doc) {
                let next = vocabulary.len();
                let term = *vocabulary.entry(token).or_insert(next);
                *counts.entry(term).or_insert(0.0) += 1.0;
            }
            counts
        })
        .collect();

    (counts, vocabulary.len())
}

/// Converts counts to L2-normalized TF-IDF weights in place.
///
/// IDF is smoothed: `ln((1 + n) / (1 + df)) + 1`.
fn apply_tfidf(documents: &mut [SparseVector], vocabulary_size: usize) {
    let mut document_frequency = vec![0usize; vocabulary_size];
    for doc in documents.iter() {
        for &term in doc.keys() {
            document_frequency[term] += 1;
        }
    }

    let n = documents.len() as f64;
    let idf: Vec<f64> = document_frequency
        .iter()
        .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    for doc in documents.iter_mut() {
        for (term, weight) in doc.iter_mut() {
            *weight *= idf[*term];
        }

        let norm = doc.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            doc.values_mut().for_each(|w| *w /= norm);
        }
    }
}

/// Dot product of two normalized vectors; zero vectors give 0
fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|other| w * other))
        .fold(0.0, |acc, x| acc + x);
    // an empty float sum is -0.0; scores must be non-negative
    if dot > 0.0 {
        dot.min(1.0)
    } else {
        0.0
    }
}

/// Scores every candidate against `reference`, best first.
///
/// The result has one entry per candidate. Equal scores keep their input
/// order. Empty candidates score exactly 0.
pub fn rank<S: AsRef<str>>(reference: &str, candidates: &[S]) -> Vec<Scored> {
    let documents: Vec<&str> = std::iter::once(reference)
        .chain(candidates.iter().map(AsRef::as_ref))
        .collect();

    let (mut vectors, vocabulary_size) = term_counts(&documents);
    apply_tfidf(&mut vectors, vocabulary_size);

    let (reference_vector, candidate_vectors) = vectors.split_at(1);
    let mut scored: Vec<Scored> = candidate_vectors
        .iter()
        .enumerate()
        .map(|(index, vector)| Scored {
            index,
            score: cosine(&reference_vector[0], vector),
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Keeps the `limit` best entries of an already ranked list
pub fn top_n(mut ranked: Vec<Scored>, limit: usize) -> Vec<Scored> {
    ranked.truncate(limit);
    ranked
}
