use sqlx::postgres::PgConnectOptions;

/// Database connection settings.
///
/// Passed explicitly to [`crate::create_pool`]; nothing in this crate reads
/// the process environment after construction.
#[derive(Clone)]
pub struct DbConfig {
    /// Full connection URL. When set it takes precedence over the discrete
    /// fields below.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
    /// Pool size (default: `20`).
    pub max_connections: u32,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DbConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default      |
    /// |----------------------|--------------|
    /// | `DATABASE_URL`       | unset        |
    /// | `DB_HOST`            | `localhost`  |
    /// | `DB_PORT`            | `5432`       |
    /// | `DB_NAME`            | `drugs`      |
    /// | `DB_USER`            | `postgres`   |
    /// | `DB_PASSWORD`        | unset        |
    /// | `DB_MAX_CONNECTIONS` | `20`         |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port: u16 = var("DB_PORT", "5432")
            .parse()
            .expect("DB_PORT must be a valid u16");

        let max_connections: u32 = var("DB_MAX_CONNECTIONS", "20")
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            host: var("DB_HOST", "localhost"),
            port,
            database: var("DB_NAME", "drugs"),
            user: var("DB_USER", "postgres"),
            password: lookup("DB_PASSWORD"),
            max_connections,
        }
    }

    /// Translate into sqlx connect options.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        Ok(options)
    }
}
