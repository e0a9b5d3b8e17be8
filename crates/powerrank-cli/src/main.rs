// Power rankings entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, stdout is for prompts and team sheets)
// 2. Load config, seeding config/ from defaults/ on first run
// 3. Run the matchday against stdin/stdout

use anyhow::Context;
use tracing::{error, info};

use powerrank_cli::app;
use powerrank_core::config;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Power rankings starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: club={}, roster={}",
        config.club.name, config.data_paths.roster
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let today = chrono::Local::now().date_naive();

    if let Err(e) = app::run(&config, stdin.lock(), stdout.lock(), today) {
        error!("Run failed: {:#}", e);
        return Err(e);
    }

    info!("Power rankings finished");
    Ok(())
}

/// Initialize tracing to log to a file, keeping the terminal free for the
/// interactive prompts.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("powerrank.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("powerrank=info,powerrank_cli=info,powerrank_core=info,warn")
            }),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
