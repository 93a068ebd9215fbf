/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | LOCAL_CURRENCY | VND | Currency whose exchange rate is pinned to 1 |
/// | DOCUMENT_DELETE_RETRIES | 1 | Extra attempts per failed document deletion |
/// | LOG_LEVEL | info | Default tracing filter when `RUST_LOG` is unset |
/// | LOG_JSON | false | Emit JSON log lines |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
///
/// # Example
///
/// ```ignore
/// LOCAL_CURRENCY=VND DOCUMENT_DELETE_RETRIES=2 LOG_JSON=true cargo run
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// ISO currency code of the local currency
    pub local_currency: String,
    /// Retries after the first failed deletion of a document
    pub document_delete_retries: u32,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults
    pub fn from_env() -> Self {
        Self {
            local_currency: std::env::var("LOCAL_CURRENCY")
                .ok()
                .map(|c| c.trim().to_ascii_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "VND".into()),
            document_delete_retries: std::env::var("DOCUMENT_DELETE_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Override the settings that drive transitions
    ///
    /// Used by tests and embedders with fixed settings
    pub fn with_overrides(local_currency: impl Into<String>, document_delete_retries: u32) -> Self {
        let mut config = Self::from_env();
        config.local_currency = local_currency.into().trim().to_ascii_uppercase();
        config.document_delete_retries = document_delete_retries;
        config
    }

    pub fn is_local_currency(&self, currency_code: &str) -> bool {
        currency_code.trim().eq_ignore_ascii_case(&self.local_currency)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
