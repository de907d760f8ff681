// ABOUTME: Parsing of tmux list-sessions output into Session records
// The name:pid line format is the only text contract the driver depends on

use tracing::debug;

use crate::models::Session;

/// Output template passed to `list-sessions -F`.
pub const LIST_SESSIONS_FORMAT: &str = "#{session_name}:#{pid}";

/// Parse `name:pid` lines in the order tmux reported them.
///
/// A line is skipped, without aborting the rest of the parse, when it has no colon,
/// an empty or whitespace-only name, or a pid field that is not plain ASCII digits
/// fitting in `u32` (no sign, no surrounding whitespace). Blank lines are ignored.
pub fn parse_list_sessions_output(output: &str) -> Vec<Session> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_line(line);
            if parsed.is_none() {
                debug!("Skipping malformed list-sessions line: {:?}", line);
            }
            parsed
        })
        .collect()
}

fn parse_line(line: &str) -> Option<Session> {
    let line = line.trim_end_matches('\r');
    let (name, pid) = line.split_once(':')?;
    if name.trim().is_empty() {
        return None;
    }
    if pid.is_empty() || !pid.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let pid = pid.parse::<u32>().ok()?;
    Some(Session::new(name, pid))
}
