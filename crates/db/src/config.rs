//! Database connection configuration.

use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Postgres connection parameters loaded from environment variables.
///
/// | Env Var       | Default    | Required |
/// |---------------|------------|----------|
/// | `DB_HOST`     | --         | yes      |
/// | `DB_PORT`     | `5432`     | no       |
/// | `DB_NAME`     | `postgres` | no       |
/// | `DB_USER`     | --         | yes      |
/// | `DB_PASSWORD` | --         | yes      |
/// | `DB_SSLMODE`  | `require`  | no       |
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub sslmode: String,
}

impl DbConfig {
    /// Load configuration from the environment. Missing required
    /// credentials are a fatal startup condition.
    pub fn from_env() -> Self {
        let host = std::env::var("DB_HOST").expect("DB_HOST must be set");
        let port: u16 = std::env::var("DB_PORT")
            .unwrap_or_else(|_| "5432".into())
            .parse()
            .expect("DB_PORT must be a valid u16");
        let dbname = std::env::var("DB_NAME").unwrap_or_else(|_| "postgres".into());
        let user = std::env::var("DB_USER").expect("DB_USER must be set");
        let password = std::env::var("DB_PASSWORD").expect("DB_PASSWORD must be set");
        let sslmode = std::env::var("DB_SSLMODE").unwrap_or_else(|_| "require".into());

        Self {
            host,
            port,
            dbname,
            user,
            password,
            sslmode,
        }
    }

    /// Build sqlx connect options. Fails on an unrecognized SSL mode.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let ssl_mode = self.sslmode.parse::<PgSslMode>()?;

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.dbname)
            .username(&self.user)
            .password(&self.password)
            .ssl_mode(ssl_mode))
    }
}
