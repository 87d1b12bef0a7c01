use clap::{Args, Parser, Subcommand};
use magnetarr_common::BackendKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "magnetarr")]
#[command(author, version, about = "Send movie and TV pages to Radarr and Sonarr")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a page URL to its IMDB/TVDB ids
    Resolve {
        /// IMDB, TheTVDB or TMDB page
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a page and check whether the backend already has it
    Info {
        /// IMDB, TheTVDB or TMDB page
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the item in its backend, adding it first if needed
    Add {
        /// IMDB, TheTVDB or TMDB page
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the quality profiles of a backend
    Profiles {
        /// radarr or sonarr
        backend: BackendKind,
    },

    /// List the root folders of a backend
    Folders {
        /// radarr or sonarr
        backend: BackendKind,
    },

    /// Check that a backend is reachable with the configured credentials
    Test {
        /// radarr or sonarr
        backend: BackendKind,
    },

    /// Update and save the settings of a backend
    Configure(ConfigureArgs),

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// radarr or sonarr
    pub backend: BackendKind,

    /// Host, with or without http(s)://
    #[arg(long)]
    pub host: Option<String>,

    /// Port; pass an empty string to omit it from the URL
    #[arg(long)]
    pub port: Option<String>,

    /// API key from the backend's general settings
    #[arg(long)]
    pub api_key: Option<String>,

    /// HTTP basic auth user
    #[arg(long)]
    pub user: Option<String>,

    /// HTTP basic auth password
    #[arg(long)]
    pub pass: Option<String>,

    /// Quality profile id for new items
    #[arg(long)]
    pub quality_profile: Option<String>,

    /// Root folder for new items
    #[arg(long)]
    pub folder: Option<String>,

    /// Minimum availability (radarr) or series type (sonarr)
    #[arg(long)]
    pub aux_info: Option<String>,

    /// Monitor new items
    #[arg(long)]
    pub monitored: Option<bool>,

    /// Enable the backend
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,

    /// Disable the backend
    #[arg(long)]
    pub disable: bool,
}
