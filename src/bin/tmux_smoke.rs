// ABOUTME: Standalone smoke check for the tmux driver against the host's tmux
// Creates, probes, drives, captures and kills a throwaway session

use std::time::Duration;

use agents_tmux::config::DriverConfig;
use agents_tmux::logging;
use agents_tmux::tmux::{CaptureOptions, TmuxDriver};
use anyhow::{Context, Result};
use tracing::info;

const SMOKE_SESSION: &str = "agents_tmux_smoke";

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = logging::init_file_logging(None)?;
    println!("Logging to {}", log_file.display());

    let config = DriverConfig::load().context("Failed to load driver config")?;
    let tmux = TmuxDriver::with_config(config);

    let version = tmux.check_installed().await?;
    println!("✓ Tmux is installed ({version})");

    if tmux.is_session_alive(SMOKE_SESSION).await {
        println!("Session already exists, killing it first");
        tmux.kill_session(SMOKE_SESSION).await?;
    }

    let workdir = std::env::temp_dir();
    let pid = tmux
        .create_session(SMOKE_SESSION, &workdir, "/bin/sh")
        .await
        .context("Failed to create smoke session")?;
    println!("✓ Created tmux session {SMOKE_SESSION} (pid {pid})");
    info!("Smoke session running in {}", workdir.display());

    let sessions = tmux.list_sessions().await?;
    println!("✓ Current tmux sessions:");
    for session in &sessions {
        println!("  - {} (pid {})", session.name, session.pid);
    }

    anyhow::ensure!(
        tmux.is_session_alive(SMOKE_SESSION).await,
        "session {SMOKE_SESSION} not reported alive"
    );
    println!("✓ Session is alive");

    tmux.send_keys(SMOKE_SESSION, "echo 'Hello from tmux!'").await?;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let content = tmux
        .capture_pane(SMOKE_SESSION, &CaptureOptions::last_lines(50))
        .await?;
    println!("✓ Session output:");
    println!("---");
    print!("{content}");
    println!("---");

    tmux.kill_session(SMOKE_SESSION).await?;
    println!("✓ Killed tmux session");

    println!("\nAll checks passed!");
    Ok(())
}
