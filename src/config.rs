use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Movie catalog CSV (needs `original_title`, `genres`, `overview`)
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Book catalog CSV (needs `Book`, `Author`, `Description`, `Genres`)
    #[serde(default = "default_books_path")]
    pub books_path: String,

    /// Volume search API base URL used for cover thumbnails
    #[serde(default = "default_cover_api_url")]
    pub cover_api_url: String,

    /// Optional API key for the volume search API
    #[serde(default)]
    pub cover_api_key: Option<String>,

    /// Per-request timeout for cover lookups, in milliseconds
    #[serde(default = "default_cover_timeout_ms")]
    pub cover_timeout_ms: u64,

    /// Set to false to skip cover lookups entirely
    #[serde(default = "default_covers_enabled")]
    pub covers_enabled: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_movies_path() -> String {
    "tmdb-movies.csv".to_string()
}

fn default_books_path() -> String {
    "books.csv".to_string()
}

fn default_cover_api_url() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}

fn default_cover_timeout_ms() -> u64 {
    5000
}

fn default_covers_enabled() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    /// Build configuration from explicit key/value pairs
    pub fn from_iter<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
