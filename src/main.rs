use anyhow::{Context, Result};
use clap::Parser;
use doi_cite::config::{find_config_file, load_config};
use doi_cite::ui::{self, FormView};
use doi_cite::CitationForm;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// doi-cite - Turn DOIs into APA or Vancouver citations
#[derive(Parser, Debug)]
#[command(name = "doi-cite")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive form that turns DOIs into APA or Vancouver citations", long_about = None)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress everything but errors in the log
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable colors and the lookup spinner
    #[arg(long)]
    no_color: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("doi_cite={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let form = CitationForm::from_config(&config).context("Failed to create the DOI resolver")?;
    let colored = !cli.no_color && ui::is_terminal();

    let stdin = std::io::stdin();
    let mut view = FormView::new(form, stdin.lock(), std::io::stdout())
        .colored(colored)
        .width(ui::terminal_width().min(100));
    view.run().await?;

    Ok(())
}
