use std::{env, path::Path, time::Duration};

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::{CHECKOUT_SETTLE, CONFIRMATION_TIMEOUT, DEFAULT_EXPECT_TIMEOUT, POLL_INTERVAL, Timeouts};

const DEFAULT_CONFIG_PATH: &str = "config/e2e.toml";
const CONFIG_PATH_VAR: &str = "BOOKING_E2E_CONFIG";
const ENV_PREFIX: &str = "BOOKING_E2E";

/// Settings for a suite run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuiteConfig {
    /// Home page of the site under test. The scenario never navigates by
    /// URL itself; browser-backed `HomePage` implementations read it to
    /// serve `navigate_to_home_page`.
    pub base_url: String,
    pub default_timeout_ms: u64,
    pub confirmation_timeout_ms: u64,
    pub checkout_settle_ms: u64,
    pub poll_interval_ms: u64,
    /// Fallback filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_owned(),
            default_timeout_ms: millis(DEFAULT_EXPECT_TIMEOUT),
            confirmation_timeout_ms: millis(CONFIRMATION_TIMEOUT),
            checkout_settle_ms: millis(CHECKOUT_SETTLE),
            poll_interval_ms: millis(POLL_INTERVAL),
            log_level: "info".to_owned(),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl SuiteConfig {
    /// Layers defaults, an optional TOML file and `BOOKING_E2E__*` variables.
    ///
    /// The file is `config_path` if given, else `$BOOKING_E2E_CONFIG`, else
    /// `config/e2e.toml`. Only the fallback is optional: a file named by the
    /// caller or the environment must exist.
    ///
    /// # Errors
    /// Returns `ConfigError` if a named file is missing, a source can't be
    /// parsed or a value has the wrong type.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = ConfigBuilder::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("default_timeout_ms", defaults.default_timeout_ms)?
            .set_default("confirmation_timeout_ms", defaults.confirmation_timeout_ms)?
            .set_default("checkout_settle_ms", defaults.checkout_settle_ms)?
            .set_default("poll_interval_ms", defaults.poll_interval_ms)?
            .set_default("log_level", defaults.log_level)?;

        let named_path = config_path
            .map(str::to_owned)
            .or_else(|| env::var(CONFIG_PATH_VAR).ok());

        match named_path {
            Some(path) => {
                tracing::debug!(%path, "loading suite config file");
                builder = builder.add_source(File::with_name(&path).required(true));
            },
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                tracing::debug!(path = DEFAULT_CONFIG_PATH, "loading suite config file");
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_PATH));
            },
            None => {},
        }

        // BOOKING_E2E__BASE_URL, BOOKING_E2E__POLL_INTERVAL_MS, ...
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub const fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    pub const fn confirmation_timeout(&self) -> Duration {
        Duration::from_millis(self.confirmation_timeout_ms)
    }

    pub const fn checkout_settle(&self) -> Duration {
        Duration::from_millis(self.checkout_settle_ms)
    }

    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Timeout budgets for a scenario run
    pub const fn timeouts(&self) -> Timeouts {
        Timeouts {
            default_expect:  self.default_timeout(),
            confirmation:    self.confirmation_timeout(),
            checkout_settle: self.checkout_settle(),
            poll_interval:   self.poll_interval(),
        }
    }
}
