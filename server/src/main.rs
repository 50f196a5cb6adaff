use anyhow::Result;
use chrono::Local;
use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use finance_os::backend::io::report::summary_report;
use finance_os::backend::storage::CsvConnection;
use finance_os::backend::{create_router, initialize_backend, AppState};
use finance_os::config::{Cli, Command, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    cli.config.validate()?;
    info!("Configuration: {:?}", cli.config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cli.config).await,
        Command::Summary => print_summary(&cli.config).await,
    }
}

async fn serve(config: &Config) -> Result<()> {
    let app_state = initialize_backend(config).await?;
    let app = create_router(app_state);

    let listener = TcpListener::bind(config.bind).await?;
    info!("Finance OS listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn print_summary(config: &Config) -> Result<()> {
    let connection = CsvConnection::new(config.data_dir()?)?;
    // Reading the summary needs no login and no AI client
    let state = AppState::new(connection, "", config.default_budget, None);
    let dashboard = state
        .summary_service
        .dashboard(Local::now().date_naive())
        .await?;

    print!("{}", summary_report(&dashboard));
    Ok(())
}
