mod cli;

use magnetarr::backend::BackendAdapter;
use magnetarr::config::{self, TomlConfigStore};
use magnetarr::session::{Outcome, Session};
use magnetarr_common::{BackendKind, Item};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ConfigureArgs};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Where `configure` writes when no config file exists yet.
const DEFAULT_CONFIG_PATH: &str = "./magnetarr.toml";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "magnetarr=debug,magnetarr_common=debug".to_string()
        } else {
            "magnetarr=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Resolve { url, json } => block_on(resolve_url(config_path, &url, json)),
        Commands::Info { url, json } => block_on(inspect_url(config_path, &url, json)),
        Commands::Add { url, json } => block_on(sync_url(config_path, &url, json)),
        Commands::Profiles { backend } => block_on(list_profiles(config_path, backend)),
        Commands::Folders { backend } => block_on(list_folders(config_path, backend)),
        Commands::Test { backend } => block_on(test_backend(config_path, backend)),
        Commands::Configure(args) => configure_backend(config_path, args),
        Commands::Validate {
            config: validate_path,
        } => validate_config(validate_path.as_deref().or(config_path)),
        Commands::Version => {
            println!("magnetarr {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn block_on<F: Future<Output = Result<()>>>(future: F) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(future)
}

fn load_session(config_path: Option<&Path>) -> Result<Session> {
    let config = config::load_config_or_default(config_path)?;
    Ok(Session::from_config(&config))
}

fn backend(session: &Session, kind: BackendKind) -> Result<&BackendAdapter> {
    session
        .backends()
        .by_kind(kind)
        .with_context(|| format!("No {kind} backend configured"))
}

async fn resolve_url(config_path: Option<&Path>, url: &str, json: bool) -> Result<()> {
    let session = load_session(config_path)?;
    let item = session.resolve(url).await?;
    print_item(&item, json)
}

async fn inspect_url(config_path: Option<&Path>, url: &str, json: bool) -> Result<()> {
    let session = load_session(config_path)?;
    let item = session.inspect(url).await?;
    print_item(&item, json)
}

async fn sync_url(config_path: Option<&Path>, url: &str, json: bool) -> Result<()> {
    let session = load_session(config_path)?;
    let outcome = session.sync(url).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }
    match outcome {
        Outcome::Opened { url } => {
            if !json {
                println!("Already in library: {url}");
            }
            Ok(())
        }
        Outcome::Created { item } => {
            if !json {
                println!("Added {}", item.label());
            }
            Ok(())
        }
        Outcome::Failed { message } => anyhow::bail!(message),
    }
}

fn print_item(item: &Item, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
        return Ok(());
    }

    println!("Type: {}", item.item_type);
    println!("IMDB: {}", item.imdb_id.as_deref().unwrap_or("-"));
    println!("TVDB: {}", item.tvdb_id.as_deref().unwrap_or("-"));
    if let Some(provider) = item.provider {
        println!("Source: {provider}");
    }
    if let Some(server) = item.server {
        println!("\nBackend: {server}");
        println!(
            "In library: {}",
            match item.exists {
                Some(true) => "yes",
                Some(false) => "no",
                None => "unknown",
            }
        );
        if let Some(ref slug) = item.item_slug {
            println!("Slug: {slug}");
        }
        if let Some(title) = item.properties.title() {
            match item.properties.year() {
                Some(year) => println!("Title: {title} ({year})"),
                None => println!("Title: {title}"),
            }
        }
    }
    Ok(())
}

async fn list_profiles(config_path: Option<&Path>, kind: BackendKind) -> Result<()> {
    let session = load_session(config_path)?;
    let profiles = backend(&session, kind)?
        .list_profiles()
        .await
        .with_context(|| format!("Failed to list {kind} quality profiles"))?;

    for profile in &profiles {
        println!("{:>4}  {}", profile.id, profile.name);
    }
    Ok(())
}

async fn list_folders(config_path: Option<&Path>, kind: BackendKind) -> Result<()> {
    let session = load_session(config_path)?;
    let folders = backend(&session, kind)?
        .list_folders()
        .await
        .with_context(|| format!("Failed to list {kind} root folders"))?;

    for folder in &folders {
        match folder.free_space {
            Some(bytes) => println!(
                "{}  ({:.1} GB free)",
                folder.path,
                bytes as f64 / 1_073_741_824.0
            ),
            None => println!("{}", folder.path),
        }
    }
    Ok(())
}

async fn test_backend(config_path: Option<&Path>, kind: BackendKind) -> Result<()> {
    let session = load_session(config_path)?;
    let adapter = backend(&session, kind)?;
    let version = adapter
        .test_connection()
        .await
        .with_context(|| format!("Failed to connect to {kind} at {}", adapter.build_base_url()))?;

    println!("✓ {kind} {version} at {}", adapter.build_base_url());
    if !adapter.is_enabled() {
        println!("  (disabled, enable it with `magnetarr configure {kind} --enable`)");
    }
    Ok(())
}

fn configure_backend(config_path: Option<&Path>, args: ConfigureArgs) -> Result<()> {
    let path = config::locate_config(config_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let store = TomlConfigStore::new(&path);

    let mut adapter = BackendAdapter::load(args.backend, &store)?;
    let mut settings = adapter.settings().clone();
    let connection = &mut settings.configuration;
    let preferences = &mut settings.preferences;

    if let Some(host) = args.host {
        connection.host = host;
    }
    if let Some(port) = args.port {
        connection.port = Some(port.trim().to_string());
    }
    if let Some(api_key) = args.api_key {
        connection.api_key = api_key;
    }
    if let Some(user) = args.user {
        connection.auth.user = user;
    }
    if let Some(pass) = args.pass {
        connection.auth.pass = pass;
    }
    if let Some(id) = args.quality_profile {
        id.trim()
            .parse::<i64>()
            .with_context(|| format!("Quality profile must be an integer id, got '{id}'"))?;
        preferences.quality_profile_id = Some(id.trim().to_string());
    }
    if let Some(folder) = args.folder {
        preferences.folder = Some(folder);
    }
    if let Some(aux_info) = args.aux_info {
        preferences.aux_info = Some(aux_info);
    }
    if let Some(monitored) = args.monitored {
        preferences.monitored = monitored;
    }
    if args.enable {
        settings.enabled = true;
    } else if args.disable {
        settings.enabled = false;
    }

    adapter.set_settings(settings);
    adapter.save_config(&store)?;

    println!("Saved {} settings to {:?}", args.backend, path);
    println!("  URL: {}", adapter.build_base_url());
    println!("  Enabled: {}", adapter.is_enabled());
    if adapter.is_enabled() && adapter.settings().configuration.api_key.is_empty() {
        println!("  Warning: no API key set");
    }
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match config::locate_config(path) {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(&p)?;
            println!("✓ Configuration is valid");
            for kind in [BackendKind::Radarr, BackendKind::Sonarr] {
                let backend = config.backend(kind);
                let connection = &backend.configuration;
                println!(
                    "  {}: {} ({})",
                    kind,
                    if backend.enabled { "enabled" } else { "disabled" },
                    magnetarr::backend::build_base_url(
                        &connection.host,
                        &connection.port_for(kind)
                    )
                );
            }
            println!(
                "  TVDB key: {}",
                if config.metadata.tvdb_api_key.is_empty() { "missing" } else { "set" }
            );
            println!(
                "  TMDB token: {}",
                if config.metadata.tmdb_token.is_empty() { "missing" } else { "set" }
            );
        }
        None => {
            println!("No config file found, using defaults");
            let config = config::Config::default();
            config::validate_config(&config)?;
            println!("✓ Default configuration is valid");
        }
    }
    Ok(())
}
