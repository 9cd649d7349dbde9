use std::str::FromStr;
use std::time::Duration;

use folio_core::config::{ConfigProvider, EnvConfig};
use folio_core::error::CoreError;
use folio_core::rate_limit::RateLimitPolicy;
use folio_core::session::DEFAULT_SESSION_TTL_DAYS;

use crate::auth::password::PasswordHashConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except `database_url` have defaults suitable for local
/// development. Secrets (`SESSION_SECRET`, `ADMIN_PASSWORD`) are not held here;
/// they are read through a [`ConfigProvider`] when a request needs them.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    pub database_url: String,
    /// Where the admin credential and sessions live.
    pub store_backend: StoreBackend,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// `APP_ENV=production`. Enables the `Secure` cookie attribute.
    pub production: bool,
    pub session_ttl_days: i64,
    pub password_hash: PasswordHashConfig,
    pub rate_limits: RateLimitConfig,
    pub rate_limit_sweep_interval: Duration,
    pub session_sweep_interval: Duration,
    pub mutation_auth: MutationAuthPolicy,
    /// `None` when the asset host credentials are not configured.
    pub cloudinary: Option<CloudinaryConfig>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                                 | Default                 |
    /// |-----------------------------------------|-------------------------|
    /// | `HOST`                                  | `0.0.0.0`               |
    /// | `PORT`                                  | `3000`                  |
    /// | `DATABASE_URL`                          | required                |
    /// | `STORE_BACKEND`                         | `postgres`              |
    /// | `CORS_ORIGINS`                          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`                  | `30`                    |
    /// | `APP_ENV`                               | `development`           |
    /// | `SESSION_TTL_DAYS`                      | `7`                     |
    /// | `PASSWORD_HASH_MEMORY_KIB`              | `19456`                 |
    /// | `PASSWORD_HASH_ITERATIONS`              | `2`                     |
    /// | `PASSWORD_HASH_PARALLELISM`             | `1`                     |
    /// | `RATE_LIMIT_{LOGIN,UPLOAD,MUTATION}_MAX`| `5` / `10` / `30`       |
    /// | `RATE_LIMIT_{..}_WINDOW_SECS`           | `900` / `60` / `60`     |
    /// | `RATE_LIMIT_SWEEP_INTERVAL_SECS`        | `600`                   |
    /// | `SESSION_SWEEP_INTERVAL_SECS`           | `3600`                  |
    /// | `ANONYMOUS_MUTATIONS`                   | empty                   |
    /// | `CLOUDINARY_CLOUD_NAME` / `_API_KEY` / `_API_SECRET` / `_FOLDER` | unset |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_provider(&EnvConfig)
    }

    /// Load configuration from any named-value source.
    pub fn from_provider(source: &dyn ConfigProvider) -> Result<Self, CoreError> {
        let host = source.get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(source, "PORT", 3000)?;
        let database_url = source.get_required("DATABASE_URL")?;
        let store_backend: StoreBackend = parse_or(source, "STORE_BACKEND", StoreBackend::Postgres)?;

        let cors_origins: Vec<String> = source
            .get("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_or(source, "REQUEST_TIMEOUT_SECS", 30)?;
        let production = source
            .get("APP_ENV")
            .is_some_and(|env| env.eq_ignore_ascii_case("production"));
        let session_ttl_days: i64 = parse_or(source, "SESSION_TTL_DAYS", DEFAULT_SESSION_TTL_DAYS)?;
        if session_ttl_days <= 0 {
            return Err(CoreError::Configuration(
                "SESSION_TTL_DAYS must be positive".into(),
            ));
        }

        let defaults = PasswordHashConfig::default();
        let password_hash = PasswordHashConfig {
            memory_kib: parse_or(source, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(source, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(source, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };
        password_hash.argon2()?;

        let rate_limits = RateLimitConfig {
            login: policy_from(source, "LOGIN", RateLimitPolicy::login())?,
            upload: policy_from(source, "UPLOAD", RateLimitPolicy::upload())?,
            mutation: policy_from(source, "MUTATION", RateLimitPolicy::mutation())?,
        };

        let rate_limit_sweep_interval =
            Duration::from_secs(parse_or(source, "RATE_LIMIT_SWEEP_INTERVAL_SECS", 600)?);
        let session_sweep_interval =
            Duration::from_secs(parse_or(source, "SESSION_SWEEP_INTERVAL_SECS", 3600)?);
        if rate_limit_sweep_interval.is_zero() || session_sweep_interval.is_zero() {
            return Err(CoreError::Configuration(
                "Sweep intervals must be at least one second".into(),
            ));
        }

        let mutation_auth =
            MutationAuthPolicy::with_anonymous(&source.get("ANONYMOUS_MUTATIONS").unwrap_or_default())?;

        Ok(Self {
            host,
            port,
            database_url,
            store_backend,
            cors_origins,
            request_timeout_secs,
            production,
            session_ttl_days,
            password_hash,
            rate_limits,
            rate_limit_sweep_interval,
            session_sweep_interval,
            mutation_auth,
            cloudinary: CloudinaryConfig::from_provider(source),
        })
    }
}

/// Parse `name` if set, otherwise return `default`.
fn parse_or<T: FromStr>(source: &dyn ConfigProvider, name: &str, default: T) -> Result<T, CoreError> {
    match source.get(name).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CoreError::Configuration(format!("{name} has an invalid value: {raw}"))),
        None => Ok(default),
    }
}

fn policy_from(
    source: &dyn ConfigProvider,
    class: &str,
    preset: RateLimitPolicy,
) -> Result<RateLimitPolicy, CoreError> {
    let max: u32 = parse_or(source, &format!("RATE_LIMIT_{class}_MAX"), preset.max_requests)?;
    let window_secs: u64 = parse_or(
        source,
        &format!("RATE_LIMIT_{class}_WINDOW_SECS"),
        preset.window.as_secs(),
    )?;
    if max == 0 || window_secs == 0 {
        return Err(CoreError::Configuration(format!(
            "RATE_LIMIT_{class}_MAX and RATE_LIMIT_{class}_WINDOW_SECS must be positive"
        )));
    }
    Ok(preset.with_limits(max, Duration::from_secs(window_secs)))
}

// ---------------------------------------------------------------------------
// Store backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local; every restart logs the admin out.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Rate limits
// ---------------------------------------------------------------------------

/// One policy per rate-limited route class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub login: RateLimitPolicy,
    pub upload: RateLimitPolicy,
    pub mutation: RateLimitPolicy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            login: RateLimitPolicy::login(),
            upload: RateLimitPolicy::upload(),
            mutation: RateLimitPolicy::mutation(),
        }
    }
}

// ---------------------------------------------------------------------------
// Mutation auth policy
// ---------------------------------------------------------------------------

/// Content collections with mutating routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentResource {
    Posts,
    Notes,
    Categories,
    Projects,
    Learning,
}

impl FromStr for ContentResource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posts" => Ok(Self::Posts),
            "notes" => Ok(Self::Notes),
            "categories" => Ok(Self::Categories),
            "projects" => Ok(Self::Projects),
            "learning" => Ok(Self::Learning),
            other => Err(CoreError::Configuration(format!(
                "ANONYMOUS_MUTATIONS contains unknown resource: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    /// Mutations need a valid admin session.
    Session,
    /// Mutations are only rate limited.
    Anonymous,
}

/// Which content collections require a session to mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationAuthPolicy {
    pub posts: AuthRequirement,
    pub notes: AuthRequirement,
    pub categories: AuthRequirement,
    pub projects: AuthRequirement,
    pub learning: AuthRequirement,
}

impl Default for MutationAuthPolicy {
    fn default() -> Self {
        Self {
            posts: AuthRequirement::Session,
            notes: AuthRequirement::Session,
            categories: AuthRequirement::Session,
            projects: AuthRequirement::Session,
            learning: AuthRequirement::Session,
        }
    }
}

impl MutationAuthPolicy {
    /// Start from all-`Session` and open up the comma-separated resources in `list`.
    pub fn with_anonymous(list: &str) -> Result<Self, CoreError> {
        let mut policy = Self::default();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let slot = match name.parse::<ContentResource>()? {
                ContentResource::Posts => &mut policy.posts,
                ContentResource::Notes => &mut policy.notes,
                ContentResource::Categories => &mut policy.categories,
                ContentResource::Projects => &mut policy.projects,
                ContentResource::Learning => &mut policy.learning,
            };
            *slot = AuthRequirement::Anonymous;
        }
        Ok(policy)
    }

    pub fn requirement(&self, resource: ContentResource) -> AuthRequirement {
        match resource {
            ContentResource::Posts => self.posts,
            ContentResource::Notes => self.notes,
            ContentResource::Categories => self.categories,
            ContentResource::Projects => self.projects,
            ContentResource::Learning => self.learning,
        }
    }
}

// ---------------------------------------------------------------------------
// Asset host
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Destination folder (default: `blog/projects`).
    pub folder: String,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("folder", &self.folder)
            .finish()
    }
}

impl CloudinaryConfig {
    /// `None` unless cloud name, key and secret are all set.
    pub fn from_provider(source: &dyn ConfigProvider) -> Option<Self> {
        let non_empty = |name: &str| source.get(name).filter(|v| !v.is_empty());
        Some(Self {
            cloud_name: non_empty("CLOUDINARY_CLOUD_NAME")?,
            api_key: non_empty("CLOUDINARY_API_KEY")?,
            api_secret: non_empty("CLOUDINARY_API_SECRET")?,
            folder: non_empty("CLOUDINARY_FOLDER").unwrap_or_else(|| "blog/projects".into()),
        })
    }
}
