//! Configuration loading and settings resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use clap::Parser;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "BANDSTAND_CONFIG";
/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "BANDSTAND_DATA_DIR";
/// Environment variable overriding the bind address
pub const BIND_ENV: &str = "BANDSTAND_BIND";
/// Environment variable holding the token signing secret
pub const TOKEN_SECRET_ENV: &str = "BANDSTAND_TOKEN_SECRET";
/// Environment variable overriding the seed admin email
pub const ADMIN_EMAIL_ENV: &str = "BANDSTAND_ADMIN_EMAIL";
/// Environment variable holding the seed admin password
pub const ADMIN_PASSWORD_ENV: &str = "BANDSTAND_ADMIN_PASSWORD";

/// Command-line arguments
#[derive(Debug, Default, Parser)]
#[command(name = "bandstand-api", about = "Band website backend service")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the JSON collection files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Address to bind the HTTP listener to (host:port)
    #[arg(long)]
    pub bind: Option<String>,
}

/// Mail delivery settings (`[mail]` section of the config file)
///
/// Absent section disables delivery; newsletter operations then report
/// the would-be recipient count without sending anything.
#[derive(Debug, Clone, Deserialize)]
pub struct MailSettings {
    /// Base URL of the mail provider HTTP API
    pub api_base_url: String,
    /// Bearer token for the mail provider
    pub api_token: String,
    /// Sender address for outgoing mail
    pub sender: String,
}

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// host:port the HTTP listener binds to
    pub bind_address: String,
    /// Directory holding the JSON collection files
    pub data_dir: PathBuf,
    /// Secret used to sign access tokens
    pub token_secret: String,
    /// Email of the admin account seeded on first run
    pub admin_email: String,
    /// Password of the seeded admin account; generated when unset
    pub admin_password: Option<String>,
    /// Optional mail delivery settings
    pub mail: Option<MailSettings>,
}

/// Config file contents; every field optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    bind_address: Option<String>,
    data_dir: Option<PathBuf>,
    token_secret: Option<String>,
    admin_email: Option<String>,
    admin_password: Option<String>,
    mail: Option<MailSettings>,
}

impl Settings {
    /// Resolve settings from CLI arguments, environment, config file and
    /// defaults, in that priority order.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = load_file_config(cli.config.clone())?;

        let bind_address = cli
            .bind
            .clone()
            .or_else(|| std::env::var(BIND_ENV).ok())
            .or(file.bind_address)
            .unwrap_or_else(|| "127.0.0.1:3000".to_string());

        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| std::env::var(DATA_DIR_ENV).ok().map(PathBuf::from))
            .or(file.data_dir)
            .unwrap_or_else(default_data_dir);

        let token_secret = std::env::var(TOKEN_SECRET_ENV)
            .ok()
            .or(file.token_secret)
            .unwrap_or_else(|| {
                warn!(
                    "No token secret configured ({}); generated one for this run - \
                     issued tokens will not survive a restart",
                    TOKEN_SECRET_ENV
                );
                random_secret(48)
            });

        let admin_email = std::env::var(ADMIN_EMAIL_ENV)
            .ok()
            .or(file.admin_email)
            .unwrap_or_else(|| "admin@example.com".to_string());

        let admin_password = std::env::var(ADMIN_PASSWORD_ENV).ok().or(file.admin_password);

        Ok(Self {
            bind_address,
            data_dir,
            token_secret,
            admin_email,
            admin_password,
            mail: file.mail,
        })
    }
}

/// Load the config file, if one can be found.
///
/// Lookup order: explicit CLI path, `BANDSTAND_CONFIG`, then the
/// platform config directory (`<config_dir>/bandstand/config.toml`).
/// A missing file yields defaults; an unreadable or invalid file is an
/// error (a path was named, so silently ignoring it would mislead).
fn load_file_config(cli_path: Option<PathBuf>) -> Result<FileConfig> {
    let explicit = cli_path.or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

    let path = match explicit {
        Some(path) => path,
        None => {
            let Some(path) = default_config_path() else {
                return Ok(FileConfig::default());
            };
            if !path.exists() {
                return Ok(FileConfig::default());
            }
            path
        }
    };

    let raw = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&raw)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

/// Platform config file location
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bandstand").join("config.toml"))
}

/// Platform default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("bandstand"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// Random alphanumeric secret of the given length
pub fn random_secret(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
