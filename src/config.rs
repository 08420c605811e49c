use std::{env, time::Duration};

use secrecy::Secret;
use url::Url;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_CATCH_BYTES: u64 = 64 * 1024;
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_OPENROUTER_MODEL: &str = "moonshotai/kimi-vl-a3b-thinking:free";
const DEFAULT_SITE_URL: &str = "https://fishcast.app";
const DEFAULT_SITE_NAME: &str = "FishCast";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{name} is not a valid port: {value:?}")]
    InvalidPort {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("{name} is not a valid size in bytes: {value:?}")]
    InvalidSize {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("{name} is not a valid duration: {value:?}")]
    InvalidDuration {
        name: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("{name} is not a valid url: {value:?}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{name} is not a valid boolean: {value:?}, expected true or false")]
    InvalidBool { name: &'static str, value: String },
}

/// Runtime configuration, read from the environment once at startup.
///
/// Every variable is optional and defaulted; empty values count as unset.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub require_species: bool,
    pub max_catch_bytes: u64,
    pub max_image_bytes: u64,
    pub stub_delay: Duration,
    pub seed_demo: bool,
    pub openrouter: Option<OpenRouterConfig>,
}

/// Settings for the OpenRouter-backed analyzer, present only when
/// `OPENROUTER_API_KEY` is set.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub api_key: Secret<String>,
    pub base_url: Url,
    pub model: String,
    pub site_url: String,
    pub site_name: String,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        Ok(Self {
            port: var_or("PORT", DEFAULT_PORT, parse_port)?,
            require_species: var_or("REQUIRE_SPECIES", true, parse_bool)?,
            max_catch_bytes: var_or("MAX_CATCH_BYTES", DEFAULT_MAX_CATCH_BYTES, parse_size)?,
            max_image_bytes: var_or("MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES, parse_size)?,
            stub_delay: var_or("STUB_DELAY", Duration::ZERO, parse_delay)?,
            seed_demo: var_or("SEED_DEMO", true, parse_bool)?,
            openrouter: openrouter_from_env()?,
        })
    }
}

fn openrouter_from_env() -> Result<Option<OpenRouterConfig>, Error> {
    let Some(api_key) = var("OPENROUTER_API_KEY") else {
        return Ok(None);
    };

    let base_url = match var("OPENROUTER_BASE_URL") {
        Some(value) => parse_url("OPENROUTER_BASE_URL", &value)?,
        None => parse_url("OPENROUTER_BASE_URL", DEFAULT_OPENROUTER_BASE_URL)?,
    };

    Ok(Some(OpenRouterConfig {
        api_key: Secret::new(api_key),
        base_url,
        model: var("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string()),
        site_url: var("SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
        site_name: var("SITE_NAME").unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
    }))
}

// unset and empty are the same thing here
fn var(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn var_or<T>(
    name: &'static str,
    default: T,
    parse: impl FnOnce(&'static str, &str) -> Result<T, Error>,
) -> Result<T, Error> {
    match var(name) {
        Some(value) => parse(name, &value),
        None => Ok(default),
    }
}

fn parse_port(name: &'static str, value: &str) -> Result<u16, Error> {
    value.parse().map_err(|source| Error::InvalidPort {
        name,
        value: value.to_string(),
        source,
    })
}

fn parse_size(name: &'static str, value: &str) -> Result<u64, Error> {
    value.parse().map_err(|source| Error::InvalidSize {
        name,
        value: value.to_string(),
        source,
    })
}

fn parse_delay(name: &'static str, value: &str) -> Result<Duration, Error> {
    humantime::parse_duration(value).map_err(|source| Error::InvalidDuration {
        name,
        value: value.to_string(),
        source,
    })
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, Error> {
    Url::parse(value).map_err(|source| Error::InvalidUrl {
        name,
        value: value.to_string(),
        source,
    })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, Error> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(Error::InvalidBool {
            name,
            value: value.to_string(),
        }),
    }
}
