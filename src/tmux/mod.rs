// ABOUTME: Host-based tmux session management
// Drives tmux sessions running directly on the host machine through its command line

pub mod capture;
pub mod driver;
pub mod error;
pub mod list;
pub mod runner;

pub use capture::CaptureOptions;
pub use driver::{TmuxDriver, SUBMIT_KEY};
pub use error::{TmuxError, TmuxOperation};
pub use list::{parse_list_sessions_output, LIST_SESSIONS_FORMAT};
pub use runner::{CommandOutput, CommandRunner, Invocation, TokioCommandRunner};
