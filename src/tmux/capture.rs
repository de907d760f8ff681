// ABOUTME: Tmux pane content capture options
//
// Describes which part of a session's pane to capture (visible area, full
// scrollback, or the last N lines) and whether ANSI escape sequences and
// wrapped lines are preserved.

/// Options for capturing tmux pane content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Start line (`-S`); "-" is the start of history, negative numbers count back
    /// from the top of the visible area. `None` captures from the visible top.
    pub start_line: Option<String>,
    /// End line (`-E`); "-" is the end of the visible area. `None` captures to the
    /// visible bottom.
    pub end_line: Option<String>,
    /// Whether to include ANSI escape sequences in the output
    pub include_escape_sequences: bool,
    /// Whether to join wrapped lines
    pub join_wrapped_lines: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            start_line: None,
            end_line: None,
            include_escape_sequences: true,
            join_wrapped_lines: true,
        }
    }
}

impl CaptureOptions {
    /// Create options for capturing visible pane content only
    pub fn visible() -> Self {
        Self::default()
    }

    /// Create options for capturing full scrollback history
    pub fn full_history() -> Self {
        Self {
            start_line: Some("-".to_string()),
            end_line: Some("-".to_string()),
            ..Self::default()
        }
    }

    /// Plain-text capture of the visible area plus `lines` lines of history.
    pub fn last_lines(lines: u32) -> Self {
        Self {
            start_line: Some(format!("-{lines}")),
            end_line: None,
            include_escape_sequences: false,
            join_wrapped_lines: true,
        }
    }

    /// `capture-pane` arguments (after the subcommand) for `session_name`.
    pub(crate) fn to_args(&self, session_name: &str) -> Vec<String> {
        let mut args = vec!["-p".to_string(), "-t".to_string(), session_name.to_string()];

        if self.include_escape_sequences {
            args.push("-e".to_string());
        }
        if self.join_wrapped_lines {
            args.push("-J".to_string());
        }
        if let Some(start) = &self.start_line {
            args.push("-S".to_string());
            args.push(start.clone());
        }
        if let Some(end) = &self.end_line {
            args.push("-E".to_string());
            args.push(end.clone());
        }

        args
    }
}
