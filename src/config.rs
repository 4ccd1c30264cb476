use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub uploads_dir: String,
    pub metadata_path: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "KDD community photo gallery API")]
pub struct Args {
    /// Host to bind to (overrides KDD_GALLERY_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides KDD_GALLERY_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory where uploaded images are stored (overrides KDD_GALLERY_UPLOADS_DIR)
    #[arg(long)]
    pub uploads_dir: Option<String>,

    /// Path of the photo metadata document (overrides KDD_GALLERY_METADATA_PATH)
    #[arg(long)]
    pub metadata_path: Option<String>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("KDD_GALLERY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("KDD_GALLERY_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing KDD_GALLERY_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading KDD_GALLERY_PORT"),
        };
        let env_uploads =
            env::var("KDD_GALLERY_UPLOADS_DIR").unwrap_or_else(|_| "./public/uploads".into());
        let env_metadata = env::var("KDD_GALLERY_METADATA_PATH")
            .unwrap_or_else(|_| "./public/uploads/metadata.json".into());

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            uploads_dir: args.uploads_dir.unwrap_or(env_uploads),
            metadata_path: args.metadata_path.unwrap_or(env_metadata),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
