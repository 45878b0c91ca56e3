use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, net::IpAddr, sync::RwLock};

static CONFIG_FILE: &str = "config/config.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
  pub database: DatabaseConfig,
  pub hostname: String,
  pub bind: IpAddr,
  pub port: u16,
  pub jwt_secret: String,
  /// Seconds the cached global feed page stays valid.
  pub feed_cache_ttl: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
  pub url: String,
  pub pool_size: u32,
}

lazy_static! {
  static ref SETTINGS: RwLock<Settings> = RwLock::new(match Settings::init() {
    Ok(c) => c,
    Err(e) => panic!("{}", e),
  });
}

impl Settings {
  /// Builds the config from code defaults, then the optional config file,
  /// then the environment (with prefix QUILL).
  ///
  /// Eg. `QUILL_PORT=8540 ./target/quill_server` overrides the `port` key.
  /// Nested keys use a double underscore: `QUILL_DATABASE__URL`.
  fn init() -> Result<Self, ConfigError> {
    let s = Config::builder()
      .set_default("database.url", "quill.sqlite3")?
      .set_default("database.pool_size", 5)?
      .set_default("hostname", "localhost")?
      .set_default("bind", "0.0.0.0")?
      .set_default("port", 8540)?
      .set_default("jwt_secret", "changeme")?
      .set_default("feed_cache_ttl", 20)?
      .add_source(File::with_name(&Self::get_config_location()).required(false))
      .add_source(Environment::with_prefix("QUILL").separator("__"))
      .build()?;

    s.try_deserialize()
  }

  /// Returns the config as a struct.
  pub fn get() -> Self {
    SETTINGS.read().unwrap().to_owned()
  }

  pub fn get_database_url(&self) -> String {
    self.database.url.to_owned()
  }

  pub fn get_config_location() -> String {
    env::var("QUILL_CONFIG_LOCATION").unwrap_or_else(|_| CONFIG_FILE.to_string())
  }
}
