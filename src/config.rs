use anyhow::{Context, Result, bail};
use clap::Parser;
use std::{env, fmt};

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_path: String,
    pub jwt_secret: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Astronomy Picture of the Day API")]
pub struct Args {
    /// Host to bind to (overrides APOD_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides APOD_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// JSON document holding the record collection (overrides APOD_DATA_PATH)
    #[arg(long)]
    pub data_path: Option<String>,

    /// Secret used to sign tokens (overrides APOD_JWT_SECRET)
    #[arg(long)]
    pub jwt_secret: Option<String>,

    /// Create an empty collection if the data file is missing, then exit
    #[arg(long)]
    pub init: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and init flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();
        let init = args.init;
        let cfg = Self::merge(args, |key| env::var(key))?;
        Ok((cfg, init))
    }

    /// Merge CLI arguments over values read through `lookup`.
    fn merge<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        // --- Environment fallback ---
        let env_host = lookup("APOD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match lookup("APOD_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing APOD_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading APOD_PORT"),
        };
        let env_data =
            lookup("APOD_DATA_PATH").unwrap_or_else(|_| "./data/apod.json".into());

        // --- Merge ---
        let jwt_secret = match args.jwt_secret.or_else(|| lookup("APOD_JWT_SECRET").ok()) {
            Some(secret) if !secret.is_empty() => secret,
            _ => bail!("a token signing secret is required: set APOD_JWT_SECRET or pass --jwt-secret"),
        };

        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            data_path: args.data_path.unwrap_or(env_data),
            jwt_secret,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("data_path", &self.data_path)
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}
