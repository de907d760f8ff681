// ABOUTME: Library crate for agents-tmux exposing the tmux session driver for agent orchestrators

//! Launch, probe, drive and tear down named detached tmux sessions.
//!
//! ```no_run
//! use agents_tmux::tmux::TmuxDriver;
//!
//! # async fn demo() -> Result<(), agents_tmux::tmux::TmuxError> {
//! let tmux = TmuxDriver::new();
//! let pid = tmux.create_session("builder", "/tmp", "bash").await?;
//! tmux.send_keys("builder", "echo hello").await?;
//! for session in tmux.list_sessions().await? {
//!     println!("{} -> {}", session.name, session.pid);
//! }
//! tmux.kill_session("builder").await?;
//! # let _ = pid;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod logging;
pub mod models;
pub mod tmux;

pub use config::DriverConfig;
pub use models::Session;
pub use tmux::{TmuxDriver, TmuxError};
