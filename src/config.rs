use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Pool settings for a private in-memory SQLite database. Every pooled
    /// connection would see its own empty database, so the pool holds one.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "8000".to_string()).parse().context("PORT")?;

        let url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => match std::env::var("DB_HOST") {
                Ok(db_host) => postgres_url_from_env(&db_host)?,
                Err(_) => "sqlite://filmstore.db?mode=rwc".to_string(),
            },
        };

        let database = DatabaseConfig {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            min_connections: env_or("DB_MIN_CONNECTIONS", 1)?,
            connect_timeout: Duration::from_secs(env_or("DB_CONNECT_TIMEOUT_SECS", 8)?),
            acquire_timeout: Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 8)?),
        };

        Ok(Self { addr: format!("{host}:{port}").parse().context("HOST/PORT")?, database })
    }
}

fn env_or<T>(key: &'static str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().context(key),
        Err(_) => Ok(default),
    }
}

fn postgres_url_from_env(host: &str) -> anyhow::Result<String> {
    let port: u16 = env_or("DB_PORT", 5432)?;
    let name = std::env::var("DB_NAME").context("DB_NAME is required when DB_HOST is set")?;
    let user = std::env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
    let password = std::env::var("DB_PASSWORD").unwrap_or_default();
    Ok(postgres_url(host, port, &name, &user, &password))
}

fn postgres_url(host: &str, port: u16, name: &str, user: &str, password: &str) -> String {
    let user = urlencoding::encode(user);
    if password.is_empty() {
        format!("postgres://{user}@{host}:{port}/{name}")
    } else {
        let password = urlencoding::encode(password);
        format!("postgres://{user}:{password}@{host}:{port}/{name}")
    }
}
