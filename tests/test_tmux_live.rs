// ABOUTME: End-to-end tests against a real tmux server on a private socket
// Each test returns early when tmux is not installed on the host

use agents_tmux::config::DriverConfig;
use agents_tmux::tmux::{CaptureOptions, TmuxDriver, TmuxError};
use tempfile::TempDir;

/// A driver bound to its own tmux server so tests never touch the user's sessions.
async fn isolated_driver(tag: &str) -> Option<TmuxDriver> {
    let socket = format!("agents_tmux_test_{}_{}", tag, std::process::id());
    let driver = TmuxDriver::with_config(DriverConfig::default().with_socket_name(socket));
    match driver.check_installed().await {
        Ok(_) => Some(driver),
        Err(e) => {
            eprintln!("Skipping live tmux test: {e}");
            None
        }
    }
}

async fn shutdown(driver: &TmuxDriver) {
    for session in driver.list_sessions().await.unwrap_or_default() {
        let _ = driver.kill_session(&session.name).await;
    }
}

#[tokio::test]
async fn test_empty_server_lists_no_sessions() {
    let Some(driver) = isolated_driver("empty").await else {
        return;
    };

    let sessions = driver.list_sessions().await.unwrap();

    assert!(sessions.is_empty());
    assert!(!driver.is_session_alive("nothing-here").await);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let Some(driver) = isolated_driver("lifecycle").await else {
        return;
    };
    let workdir = TempDir::new().unwrap();

    let pid = driver
        .create_session("lifecycle", workdir.path(), "/bin/sh")
        .await
        .unwrap();
    assert!(pid > 0);

    let sessions = driver.list_sessions().await.unwrap();
    assert!(sessions.iter().any(|s| s.name == "lifecycle" && s.pid == pid));
    assert!(driver.is_session_alive("lifecycle").await);

    driver
        .send_keys("lifecycle", "echo agents-tmux-marker")
        .await
        .unwrap();

    let mut captured = String::new();
    for _ in 0..20 {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        captured = driver
            .capture_pane("lifecycle", &CaptureOptions::last_lines(100))
            .await
            .unwrap();
        if captured.matches("agents-tmux-marker").count() >= 2 {
            break;
        }
    }
    assert!(captured.contains("agents-tmux-marker"));

    driver.kill_session("lifecycle").await.unwrap();
    assert!(!driver.is_session_alive("lifecycle").await);

    shutdown(&driver).await;
}

#[tokio::test]
async fn test_operations_on_missing_session_fail_with_subject() {
    let Some(driver) = isolated_driver("missing").await else {
        return;
    };
    let workdir = TempDir::new().unwrap();
    // Keep a server running so failures come from the missing session, not the server.
    driver
        .create_session("anchor", workdir.path(), "/bin/sh")
        .await
        .unwrap();

    let kill = driver.kill_session("ghost").await.unwrap_err();
    assert!(kill.is_invocation_failure());
    assert_eq!(kill.session_name(), Some("ghost"));

    let send = driver.send_keys("ghost", "echo hi").await.unwrap_err();
    assert!(matches!(send, TmuxError::SessionCommandFailed { .. }));
    assert_eq!(send.session_name(), Some("ghost"));

    shutdown(&driver).await;
}

#[tokio::test]
async fn test_duplicate_create_is_invocation_failure() {
    let Some(driver) = isolated_driver("duplicate").await else {
        return;
    };
    let workdir = TempDir::new().unwrap();

    driver
        .create_session("dup", workdir.path(), "/bin/sh")
        .await
        .unwrap();
    let err = driver
        .create_session("dup", workdir.path(), "/bin/sh")
        .await
        .unwrap_err();

    assert!(err.is_invocation_failure());
    assert_eq!(err.session_name(), Some("dup"));
    assert!(err.stderr().unwrap_or_default().contains("duplicate session"));

    shutdown(&driver).await;
}
