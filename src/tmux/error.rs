// ABOUTME: Error types for tmux session management
// Classifies tool failures so callers can tell which session failed without parsing messages

use std::fmt;
use thiserror::Error;

/// The tmux subcommand an invocation ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TmuxOperation {
    /// `tmux new-session`
    NewSession,
    /// `tmux list-sessions`
    ListSessions,
    /// `tmux kill-session`
    KillSession,
    /// `tmux has-session`
    HasSession,
    /// `tmux send-keys`
    SendKeys,
    /// `tmux capture-pane`
    CapturePane,
    /// `tmux display-message`
    DisplayMessage,
    /// `tmux -V`
    Version,
}

impl TmuxOperation {
    /// The argument that selects this operation on the tmux command line.
    pub const fn as_arg(self) -> &'static str {
        match self {
            Self::NewSession => "new-session",
            Self::ListSessions => "list-sessions",
            Self::KillSession => "kill-session",
            Self::HasSession => "has-session",
            Self::SendKeys => "send-keys",
            Self::CapturePane => "capture-pane",
            Self::DisplayMessage => "display-message",
            Self::Version => "-V",
        }
    }
}

impl fmt::Display for TmuxOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Failure of a driver operation, carrying the session it concerned where there is one.
#[derive(Debug, Error)]
pub enum TmuxError {
    /// tmux exited non-zero for an operation scoped to one session.
    #[error("tmux {operation} failed for session '{session}': {stderr}")]
    SessionCommandFailed {
        operation: TmuxOperation,
        session: String,
        stderr: String,
    },

    /// tmux exited non-zero for an operation that concerns no single session.
    #[error("tmux {operation} failed: {stderr}")]
    CommandFailed {
        operation: TmuxOperation,
        stderr: String,
    },

    /// new-session succeeded but the session never showed up in list-sessions.
    #[error("session '{session}' created but PID could not be determined")]
    PidNotResolved { session: String },

    /// tmux could not be started at all.
    #[error("failed to run tmux {operation}: {source}")]
    Spawn {
        operation: TmuxOperation,
        session: Option<String>,
        source: std::io::Error,
    },

    /// The availability check could not run tmux or tmux rejected `-V`.
    #[error("tmux not installed on host (tried '{binary}')")]
    TmuxNotInstalled { binary: String },
}

impl TmuxError {
    /// Name of the session the failed operation concerned, if it was session-scoped.
    pub fn session_name(&self) -> Option<&str> {
        match self {
            Self::SessionCommandFailed { session, .. } | Self::PidNotResolved { session } => {
                Some(session)
            }
            Self::Spawn { session, .. } => session.as_deref(),
            Self::CommandFailed { .. } | Self::TmuxNotInstalled { .. } => None,
        }
    }

    /// Raw diagnostic text tmux wrote to stderr.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::SessionCommandFailed { stderr, .. } | Self::CommandFailed { stderr, .. } => {
                Some(stderr)
            }
            _ => None,
        }
    }

    /// The tmux operation that failed, when one was attempted.
    pub const fn operation(&self) -> Option<TmuxOperation> {
        match self {
            Self::SessionCommandFailed { operation, .. }
            | Self::CommandFailed { operation, .. }
            | Self::Spawn { operation, .. } => Some(*operation),
            Self::PidNotResolved { .. } => Some(TmuxOperation::NewSession),
            Self::TmuxNotInstalled { .. } => None,
        }
    }

    /// True when tmux ran but reported failure through its exit status.
    pub const fn is_invocation_failure(&self) -> bool {
        matches!(
            self,
            Self::SessionCommandFailed { .. } | Self::CommandFailed { .. }
        )
    }

    pub(crate) fn failed(operation: TmuxOperation, session: Option<&str>, stderr: &str) -> Self {
        let stderr = stderr.trim().to_string();
        match session {
            Some(session) => Self::SessionCommandFailed {
                operation,
                session: session.to_string(),
                stderr,
            },
            None => Self::CommandFailed { operation, stderr },
        }
    }
}
