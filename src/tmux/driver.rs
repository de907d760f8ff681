// ABOUTME: TmuxDriver issues tmux commands for named detached sessions on the host
// Classifies exit codes and stderr into typed results; holds no state between calls

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::DriverConfig;
use crate::models::Session;
use crate::tmux::capture::CaptureOptions;
use crate::tmux::error::{TmuxError, TmuxOperation};
use crate::tmux::list::{parse_list_sessions_output, LIST_SESSIONS_FORMAT};
use crate::tmux::runner::{CommandOutput, CommandRunner, Invocation, TokioCommandRunner};

/// Keystroke appended by [`TmuxDriver::send_keys`] to submit the text.
pub const SUBMIT_KEY: &str = "Enter";

/// Stateless driver over the tmux command line.
///
/// Every method re-queries tmux; nothing about session existence is cached, so a
/// session seen alive by one call may be gone by the next. Calls may run
/// concurrently. There is no timeout: a hung tmux hangs the calling future, and
/// dropping that future does not kill the child.
#[derive(Debug, Clone)]
pub struct TmuxDriver<R = TokioCommandRunner> {
    runner: R,
    config: DriverConfig,
}

impl TmuxDriver<TokioCommandRunner> {
    /// Driver for `tmux` on `PATH` with default settings.
    pub fn new() -> Self {
        Self::with_config(DriverConfig::default())
    }

    /// Driver spawning real processes with the given settings.
    pub const fn with_config(config: DriverConfig) -> Self {
        Self {
            runner: TokioCommandRunner,
            config,
        }
    }
}

impl Default for TmuxDriver<TokioCommandRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> TmuxDriver<R> {
    /// Driver that sends every invocation through `runner`.
    pub const fn with_runner(runner: R, config: DriverConfig) -> Self {
        Self { runner, config }
    }

    /// Settings this driver was built with.
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// The underlying command runner.
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Create a detached session running `command` in `working_dir` and return the PID
    /// of its controlling process.
    ///
    /// This takes two tmux calls: `new-session`, then `list-sessions` to find the PID.
    /// If the second step fails the session may still exist; reconcile with
    /// [`list_sessions`](Self::list_sessions) or [`kill_session`](Self::kill_session).
    /// `name` must not contain a colon.
    pub async fn create_session(
        &self,
        name: &str,
        working_dir: impl AsRef<Path>,
        command: &str,
    ) -> Result<u32, TmuxError> {
        let working_dir = working_dir.as_ref().to_string_lossy().into_owned();
        let invocation = self.invocation(
            TmuxOperation::NewSession,
            vec![
                "-d".to_string(),
                "-s".to_string(),
                name.to_string(),
                "-c".to_string(),
                working_dir,
                command.to_string(),
            ],
        );

        let output = self.execute(invocation, Some(name)).await?;
        if !output.is_success() {
            warn!("Failed to create tmux session {}: {}", name, output.stderr.trim());
            return Err(TmuxError::failed(
                TmuxOperation::NewSession,
                Some(name),
                &output.stderr,
            ));
        }

        let sessions = self.fetch_sessions(Some(name)).await?;
        let Some(session) = sessions.into_iter().find(|s| s.name == name) else {
            warn!("Tmux session {} created but missing from list-sessions", name);
            return Err(TmuxError::PidNotResolved {
                session: name.to_string(),
            });
        };

        info!("Created tmux session {} (pid {})", name, session.pid);
        Ok(session.pid)
    }

    /// All sessions on the server, in the order tmux reports them.
    ///
    /// A server with no sessions, or no server at all, yields an empty list.
    pub async fn list_sessions(&self) -> Result<Vec<Session>, TmuxError> {
        self.fetch_sessions(None).await
    }

    /// Terminate session `name`. Fails with the session name if tmux reports an error.
    pub async fn kill_session(&self, name: &str) -> Result<(), TmuxError> {
        self.run_scoped(
            TmuxOperation::KillSession,
            name,
            vec!["-t".to_string(), name.to_string()],
        )
        .await?;
        info!("Killed tmux session {}", name);
        Ok(())
    }

    /// Whether tmux knows a session called `name`. Never fails: any non-zero exit,
    /// or a tmux that cannot be started, reads as `false`.
    pub async fn is_session_alive(&self, name: &str) -> bool {
        let invocation = self.invocation(
            TmuxOperation::HasSession,
            vec!["-t".to_string(), name.to_string()],
        );
        match self.runner.run(invocation).await {
            Ok(output) => output.is_success(),
            Err(e) => {
                debug!("has-session for {} could not run: {}", name, e);
                false
            }
        }
    }

    /// Type `text` into the session's active pane, followed by [`SUBMIT_KEY`].
    pub async fn send_keys(&self, name: &str, text: &str) -> Result<(), TmuxError> {
        self.run_scoped(
            TmuxOperation::SendKeys,
            name,
            vec![
                "-t".to_string(),
                name.to_string(),
                text.to_string(),
                SUBMIT_KEY.to_string(),
            ],
        )
        .await?;
        debug!("Sent {} bytes of keys to {}", text.len(), name);
        Ok(())
    }

    /// Contents of the session's active pane, selected by `options`.
    pub async fn capture_pane(
        &self,
        name: &str,
        options: &CaptureOptions,
    ) -> Result<String, TmuxError> {
        let output = self
            .run_scoped(TmuxOperation::CapturePane, name, options.to_args(name))
            .await?;
        Ok(output.stdout)
    }

    /// Verify tmux can be run and return its version line (e.g. `tmux 3.4`).
    pub async fn check_installed(&self) -> Result<String, TmuxError> {
        let not_installed = || TmuxError::TmuxNotInstalled {
            binary: self.config.tmux_binary.clone(),
        };

        let invocation = self.invocation(TmuxOperation::Version, Vec::new());
        let output = self.runner.run(invocation).await.map_err(|e| {
            debug!("Could not run {}: {}", self.config.tmux_binary, e);
            not_installed()
        })?;

        if !output.is_success() {
            debug!(
                "{} -V exited with {:?}: {}",
                self.config.tmux_binary,
                output.exit_code,
                output.stderr.trim()
            );
            return Err(not_installed());
        }
        Ok(output.stdout.trim().to_string())
    }

    /// Name of the session this process is running inside, if any.
    pub async fn current_session_name(&self) -> Option<String> {
        if std::env::var_os("TMUX").is_none() {
            return None;
        }
        self.query_current_session_name().await
    }

    async fn query_current_session_name(&self) -> Option<String> {
        let invocation = self.invocation(
            TmuxOperation::DisplayMessage,
            vec!["-p".to_string(), "#{session_name}".to_string()],
        );
        let output = self.runner.run(invocation).await.ok()?;
        if !output.is_success() {
            return None;
        }
        let name = output.stdout.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    /// `subject` is attached to any error so callers creating a session keep its name.
    async fn fetch_sessions(&self, subject: Option<&str>) -> Result<Vec<Session>, TmuxError> {
        let invocation = self.invocation(
            TmuxOperation::ListSessions,
            vec!["-F".to_string(), LIST_SESSIONS_FORMAT.to_string()],
        );
        let output = self.execute(invocation, subject).await?;

        if output.is_success() {
            return Ok(parse_list_sessions_output(&output.stdout));
        }
        if self.config.is_benign_empty(&output.stderr) {
            debug!("No tmux sessions: {}", output.stderr.trim());
            return Ok(Vec::new());
        }

        warn!("tmux list-sessions failed: {}", output.stderr.trim());
        Err(TmuxError::failed(
            TmuxOperation::ListSessions,
            subject,
            &output.stderr,
        ))
    }

    async fn run_scoped(
        &self,
        operation: TmuxOperation,
        name: &str,
        args: Vec<String>,
    ) -> Result<CommandOutput, TmuxError> {
        let output = self
            .execute(self.invocation(operation, args), Some(name))
            .await?;
        if !output.is_success() {
            warn!("tmux {} failed for {}: {}", operation, name, output.stderr.trim());
            return Err(TmuxError::failed(operation, Some(name), &output.stderr));
        }
        Ok(output)
    }

    async fn execute(
        &self,
        invocation: Invocation,
        session: Option<&str>,
    ) -> Result<CommandOutput, TmuxError> {
        let operation = invocation.operation;
        debug!("Running {:?}", invocation.argv());

        let output = self
            .runner
            .run(invocation)
            .await
            .map_err(|source| TmuxError::Spawn {
                operation,
                session: session.map(str::to_string),
                source,
            })?;

        debug!("tmux {} exited with {:?}", operation, output.exit_code);
        Ok(output)
    }

    fn invocation(&self, operation: TmuxOperation, args: Vec<String>) -> Invocation {
        let mut full_args = Vec::with_capacity(args.len() + 3);
        if let Some(socket) = &self.config.socket_name {
            full_args.push("-L".to_string());
            full_args.push(socket.clone());
        }
        full_args.push(operation.as_arg().to_string());
        full_args.extend(args);

        Invocation {
            operation,
            program: self.config.tmux_binary.clone(),
            args: full_args,
        }
    }
}
