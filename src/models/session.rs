// ABOUTME: Session data model representing one live tmux session and its controlling process

use serde::{Deserialize, Serialize};

/// Snapshot of an active tmux session as reported by `list-sessions`.
///
/// This is not a handle: the process may exit at any point after the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    /// PID of the session's controlling process, discovered from tmux.
    pub pid: u32,
}

impl Session {
    pub fn new(name: impl Into<String>, pid: u32) -> Self {
        Self {
            name: name.into(),
            pid,
        }
    }
}

/// Replace characters tmux rejects in session names, or that would break the
/// `name:pid` listing format, with underscores.
pub fn sanitize_session_name(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '.' | ':' | '/' | '\\' | ';' | '|' | '&' | '(' | ')' | '<' | '>' | '"' | '\'' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_problematic_characters() {
        let sanitized = sanitize_session_name("feat/branch:with<many>\"chars\"&(test)");
        assert_eq!(sanitized, "feat_branch_with_many__chars___test_");

        for ch in ['/', '\\', ':', ';', '|', '&', '(', ')', '<', '>', '"', '\''] {
            assert!(!sanitized.contains(ch), "Character '{ch}' should be replaced");
        }
    }

    #[test]
    fn test_sanitize_keeps_safe_names_untouched() {
        assert_eq!(sanitize_session_name("overstory-auth_2"), "overstory-auth_2");
        assert_eq!(sanitize_session_name("my agent.v2"), "my_agent_v2");
    }

    #[test]
    fn test_session_serializes_as_name_and_pid() {
        let json = serde_json::to_string(&Session::new("builder", 42)).unwrap();
        assert_eq!(json, r#"{"name":"builder","pid":42}"#);
    }
}
