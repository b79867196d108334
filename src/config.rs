//! Runtime configuration: input limits for the lifecycle services and the
//! `PostgreSQL` connection settings used by the Diesel adapters.

use crate::todo::domain::TodoDomainError;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by the Diesel adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Environment variable holding the database URL.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable holding the maximum pool size.
pub const POOL_SIZE_ENV: &str = "TODOMATE_DB_POOL_SIZE";

const DEFAULT_POOL_SIZE: u32 = 10;

/// Length limits applied to todo titles and task contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoPolicy {
    /// Maximum title length in characters.
    pub max_title_chars: usize,
    /// Maximum task content length in characters.
    pub max_content_chars: usize,
}

impl Default for TodoPolicy {
    fn default() -> Self {
        Self {
            max_title_chars: 100,
            max_content_chars: 500,
        }
    }
}

impl TodoPolicy {
    /// Creates a strict policy with reduced limits.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_title_chars: 50,
            max_content_chars: 200,
        }
    }

    /// Checks a todo title against the length limit.
    ///
    /// Blank titles are left to the domain constructor.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::TitleTooLong`] when the trimmed title is
    /// longer than [`Self::max_title_chars`].
    pub fn check_title(&self, title: &str) -> Result<(), TodoDomainError> {
        let length = title.trim().chars().count();
        if length > self.max_title_chars {
            return Err(TodoDomainError::TitleTooLong {
                length,
                max: self.max_title_chars,
            });
        }
        Ok(())
    }

    /// Checks task content against the length limit.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::ContentTooLong`] when the trimmed content is
    /// longer than [`Self::max_content_chars`].
    pub fn check_content(&self, content: &str) -> Result<(), TodoDomainError> {
        let length = content.trim().chars().count();
        if length > self.max_content_chars {
            return Err(TodoDomainError::ContentTooLong {
                length,
                max: self.max_content_chars,
            });
        }
        Ok(())
    }
}

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {value}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
}

impl DatabaseConfig {
    /// Creates settings with the default pool size.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or the pool
    /// size is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] under the same conditions as
    /// [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(DATABASE_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_ENV))?;

        let pool_size = lookup(POOL_SIZE_ENV).map_or(Ok(DEFAULT_POOL_SIZE), parse_pool_size)?;

        Ok(Self {
            url: url.trim().to_owned(),
            pool_size,
        })
    }

    /// Builds an r2d2 connection pool for these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the initial connections cannot be
    /// established.
    pub fn build_pool(&self) -> Result<PgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(&self.url);
        let pool = Pool::builder().max_size(self.pool_size).build(manager)?;
        tracing::info!(pool_size = self.pool_size, "database pool ready");
        Ok(pool)
    }
}

fn parse_pool_size(raw: String) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::Invalid {
            name: POOL_SIZE_ENV,
            value: raw,
        }),
    }
}
