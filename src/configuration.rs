use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::sqlite::SqliteConnectOptions;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub search: SearchSettings,
    pub directory: DirectorySettings,
    pub reconciliation: ReconciliationSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub filename: String,
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.filename)
            .create_if_missing(self.create_if_missing)
    }
}

#[derive(Deserialize, Clone)]
pub struct SearchSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_search_url")]
    pub api_url: String,
    #[serde(default = "default_freshness")]
    pub freshness: String,
    #[serde(default = "default_true")]
    pub summary: bool,
    #[serde(
        default = "default_results_count",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub results_count: u32,
    #[serde(
        default = "default_timeout_secs",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct DirectorySettings {
    #[serde(default = "default_directory_url")]
    pub base_url: String,
    #[serde(
        default = "default_page_delay_ms",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub page_delay_ms: u64,
    #[serde(
        default = "default_timeout_secs",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ReconciliationSettings {
    #[serde(
        default = "default_call_limit",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub call_limit: u32,
    #[serde(
        default = "default_min_delay_ms",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub min_delay_ms: u64,
    #[serde(default)]
    pub max_companies: Option<usize>,
}

fn default_true() -> bool {
    true
}

fn default_search_url() -> String {
    "https://api.langsearch.com/v1/web-search".to_string()
}

fn default_freshness() -> String {
    "noLimit".to_string()
}

fn default_results_count() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_directory_url() -> String {
    "https://www.bolagsfakta.se".to_string()
}

fn default_page_delay_ms() -> u64 {
    1000
}

fn default_call_limit() -> u32 {
    20
}

fn default_min_delay_ms() -> u64 {
    300
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;

    let settings = config::Config::builder()
        .add_source(config::File::from(base_path.join("configuration.yaml")))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
