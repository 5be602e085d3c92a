// src/main.rs - Desktop entry point

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use storefront_admin::api::{ApiClient, ProductApi};
use storefront_admin::config::{default_config_path, AppConfig, ConfigLoader};
use storefront_admin::error::Result;
use storefront_admin::logging::{self, LogLevel, LoggingGuard};
use storefront_admin::ui::{self, App};
use storefront_admin::ResultExt;

#[derive(Parser)]
#[command(
    name = "storefront-admin",
    version = storefront_admin::VERSION,
    about = "Admin panel for the storefront backend",
    long_about = None
)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the admin window
    Run,
    /// Load and validate the configuration, then print it
    ValidateConfig,
    /// Check that the configured backend answers
    CheckApi,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let _guard = setup_logging(&cli, &config)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_application(config),
        Commands::ValidateConfig => validate_config(&config),
        Commands::CheckApi => check_api(&config),
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| default_config_path().filter(|p| p.exists()));
    ConfigLoader::standard(path.as_deref())?.load()
}

fn setup_logging(cli: &Cli, config: &AppConfig) -> Result<LoggingGuard> {
    let configured = config.logging.level.parse().unwrap_or(LogLevel::Info);
    let level = LogLevel::from_flags(cli.verbose, cli.debug, configured);
    logging::init(&config.logging, level)
}

fn run_application(config: AppConfig) -> Result<()> {
    use dioxus::desktop::{Config, WindowBuilder};

    tracing::info!(
        version = storefront_admin::VERSION,
        backend = %config.api.base_url,
        "starting storefront admin"
    );

    let title = config.app.name.clone();
    if !ui::set_launch_config(config) {
        tracing::warn!("launch configuration was already set");
    }

    let window = Config::new().with_window(
        WindowBuilder::new()
            .with_title(title)
            .with_resizable(true)
            .with_inner_size(dioxus::desktop::tao::dpi::LogicalSize::new(1280.0, 860.0)),
    );

    dioxus::LaunchBuilder::desktop().with_cfg(window).launch(App);
    Ok(())
}

fn validate_config(config: &AppConfig) -> Result<()> {
    println!("Configuration is valid");
    println!("======================");
    println!("Backend: {}", config.api.base_url);
    println!("Timeout: {}s", config.api.timeout_secs);
    println!("Upload endpoint: {}", config.upload.endpoint());
    println!("Max image size: {} bytes", config.upload.max_file_size);
    println!("Sizes: {}", config.catalog.sizes.join(", "));
    println!("Products per page: {}", config.catalog.page_size);
    println!("Orders per page: {}", config.orders.default_limit);
    println!("Log level: {}", config.logging.level);
    Ok(())
}

fn check_api(config: &AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .with_context(|| "Failed to start async runtime".to_string())?;

    let api = ApiClient::new(&config.api)?;
    let token = CancellationToken::new();

    runtime.block_on(async {
        let products = api.find_all_products(&token).await?;
        println!("Backend at {} is reachable", api.base_url());
        println!("Products: {}", products.len());
        Ok(())
    })
}
