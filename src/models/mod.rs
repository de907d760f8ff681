// ABOUTME: Core data models for tmux-hosted agent sessions

pub mod session;

pub use session::{sanitize_session_name, Session};
