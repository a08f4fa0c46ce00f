//! Funnelscope - Main entry point
//!
//! Loads the four funnel stage tables and either runs the interactive
//! dashboard or prints a one-off report.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use funnelscope::app::App;
use funnelscope::cli::{Cli, Commands};
use funnelscope::config_file::DashboardConfig;
use funnelscope::engine::Category;
use funnelscope::error::FunnelError;
use funnelscope::types::FunnelStage;
use funnelscope::{loader, report};

/// Initialize tracing with appropriate settings.
///
/// `RUST_LOG` always wins. Otherwise logs go to `log_file` at `info`, or to
/// stderr at `info` for one-shot commands and `warn` while the dashboard
/// owns the screen.
fn init_logger(log_file: Option<&Path>, interactive: bool) -> Result<(), FunnelError> {
    let default_level = if interactive && log_file.is_none() {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    // Initialize logging first
    init_logger(cli.log_file.as_deref(), cli.is_interactive())?;
    info!("Funnelscope starting up");
    debug!("CLI arguments parsed: {:?}", cli);

    match cli.command {
        Some(Commands::Validate { ref file }) => {
            info!("Validating configuration file: {:?}", file);
            match DashboardConfig::load_from_file(file) {
                Ok(config) => match config.validate() {
                    Ok(_) => {
                        info!("Configuration validation successful");
                        println!("✓ Configuration file is valid: {}", file.display());
                    }
                    Err(e) => {
                        error!("Configuration validation failed: {}", e);
                        eprintln!("✗ Configuration validation failed: {}", e);
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    error!("Failed to load configuration file: {:#}", e);
                    eprintln!("✗ Failed to load configuration file: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::InitConfig { ref path }) => {
            DashboardConfig::default().save_to_file(path)?;
            info!("Wrote default configuration to {:?}", path);
            println!("✓ Default configuration written to {}", path.display());
        }
        Some(Commands::Report { ref select }) => {
            let (config, categories) = load_dashboard(&cli)?;
            print_report(&config, &categories, select)?;
        }
        Some(Commands::Dashboard) | None => {
            info!("Launching dashboard");
            let (config, categories) = load_dashboard(&cli)?;
            run_dashboard(config, categories)?;
        }
    }

    Ok(())
}

/// Resolve the configuration and load every stage table, exiting on failure
fn load_dashboard(cli: &Cli) -> Result<(DashboardConfig, Vec<Category>), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {:?}", path);
            DashboardConfig::load_from_file(path)?
        }
        None => DashboardConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("✗ Invalid configuration: {}", e);
        std::process::exit(1);
    }

    match loader::load_categories(&config) {
        Ok(categories) => Ok((config, categories)),
        Err(e) => {
            error!("{}", e);
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the text report for the given stages
fn print_report(
    config: &DashboardConfig,
    categories: &[Category],
    stages: &[FunnelStage],
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = report::selected_categories(categories, stages);
    let view = report::render(&selection, &config.key_fields())?;
    println!("{}", config.title);
    println!();
    print!("{}", view.to_text());
    Ok(())
}

/// Run the interactive dashboard
fn run_dashboard(
    config: DashboardConfig,
    categories: Vec<Category>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(categories, config.key_fields(), config.title.clone())?;

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode()
        .map_err(|e| FunnelError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| FunnelError::terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let backend = CrosstermBackend::new(stdout());
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => app.run(&mut terminal).map_err(Into::into),
        Err(e) => Err(FunnelError::terminal(format!("Failed to create terminal: {}", e)).into()),
    };

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result
}
