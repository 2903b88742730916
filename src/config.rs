use anyhow::{Context, Result, bail};
use clap::Parser;
use std::{env, path::PathBuf};

/// Centralized application configuration.
/// Combines environment variables (optionally loaded from `.env`) and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Cloud project that owns the bucket.
    pub project_id: Option<String>,
    /// Service-account key file. Keep it out of version control.
    pub key_file: Option<PathBuf>,
    pub bucket: String,
    /// Directory holding `html/`, `js/` and `css/` for the browser client.
    pub public_dir: PathBuf,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Photo gallery backed by a cloud storage bucket")]
pub struct Args {
    /// Host to bind to (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Storage project id (overrides GCLOUD_STORAGE_PROJECT)
    #[arg(long)]
    pub project_id: Option<String>,

    /// Path to the service-account key file (overrides GCLOUD_KEY_FILE)
    #[arg(long)]
    pub key_file: Option<PathBuf>,

    /// Bucket photos are stored in (overrides GCLOUD_STORAGE_BUCKET)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Directory with static client files (overrides PUBLIC_DIR)
    #[arg(long)]
    pub public_dir: Option<PathBuf>,
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PUBLIC_DIR: &str = "./public";

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        let args = Args::parse();
        Self::resolve(args, |key| env::var(key).ok())
    }

    /// Merge `args` over values looked up with `env`.
    pub fn resolve(args: Args, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        // --- Environment fallback ---
        let env_host = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let env_port = match non_empty("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .with_context(|| format!("parsing PORT value `{}`", value))?,
            None => DEFAULT_PORT,
        };
        let env_project = non_empty("GCLOUD_STORAGE_PROJECT");
        let env_key_file = non_empty("GCLOUD_KEY_FILE").map(PathBuf::from);
        let env_bucket = non_empty("GCLOUD_STORAGE_BUCKET");
        let env_public_dir = non_empty("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR));

        // --- Merge ---
        let bucket = match args.bucket.or(env_bucket) {
            Some(bucket) if !bucket.trim().is_empty() => bucket.trim().to_string(),
            _ => bail!("no bucket configured: set GCLOUD_STORAGE_BUCKET or pass --bucket"),
        };

        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            project_id: args.project_id.or(env_project),
            key_file: args.key_file.or(env_key_file),
            bucket,
            public_dir: args.public_dir.unwrap_or(env_public_dir),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
