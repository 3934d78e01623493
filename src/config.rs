use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db")]
    pub database_url: String,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_port() -> u16 { 5000 }
fn default_db() -> String { "reports.db".into() }
fn default_upload_dir() -> String { "uploads".into() }
fn default_static_dir() -> String { "static".into() }

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("RESCUE").separator("__"))
            .build()?;
        Ok(config.try_deserialize().unwrap_or_else(|_| Self::default()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            database_url: default_db(),
            upload_dir: default_upload_dir(),
            static_dir: default_static_dir(),
        }
    }
}
