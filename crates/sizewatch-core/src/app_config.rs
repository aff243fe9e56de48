/// Runtime settings for a stock check, read from `SIZEWATCH_*` env vars.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub user_agent: String,
    pub fetch_timeout_secs: u64,
    pub fetch_max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub notify_timeout_secs: u64,
    /// Display name sent alongside webhook messages. Omitted from the
    /// payload when unset.
    pub notify_username: Option<String>,
}
