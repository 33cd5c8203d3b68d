use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub aws_region: String,
    /// Destination bucket for long-text synthesis output. Optional here; the
    /// job path fails fast if it is needed and absent.
    pub output_bucket: Option<String>,
    pub poll_interval_secs: u64,
    pub max_poll_attempts: Option<u32>,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            output_bucket: env::var("TTS_OUTPUT_BUCKET")
                .ok()
                .filter(|bucket| !bucket.is_empty()),
            poll_interval_secs: env::var("TTS_POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            max_poll_attempts: match env::var("TTS_MAX_POLL_ATTEMPTS") {
                Ok(value) => Some(value.parse()?),
                Err(_) => None,
            },
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
        };

        Ok(config)
    }
}
