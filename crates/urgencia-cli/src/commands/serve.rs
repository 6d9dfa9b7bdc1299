//! Synchronization hub server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use urgencia_core::store::PatientStore;
use urgencia_web::state::AppState;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    // The store is constructed once here and owned by the hub from then on.
    let state = AppState::new(PatientStore::new());

    println!();
    println!("  {} {}", "Urgencia".cyan().bold(), "Sync Hub".bold());
    println!();
    println!("  {}      ws://0.0.0.0:{}/ws", "Sessions".green(), args.port);
    println!("  {}       ws://0.0.0.0:{}/ws/display", "Display".green(), args.port);
    println!("  {}           http://0.0.0.0:{}/api", "API".green(), args.port);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    urgencia_web::run_server(state, args.port).await?;

    Ok(())
}
