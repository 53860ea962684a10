use std::process::Child;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

pub static CLIPBOARD_COPY_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    Write(String),
}

/// Put `text` on the system clipboard and clear it after `timeout`,
/// unless a newer copy has replaced it by then.
pub fn copy_with_timeout(text: &str, timeout: Duration) -> Result<(), ClipboardError> {
    let copy_id = CLIPBOARD_COPY_ID.fetch_add(1, Ordering::SeqCst) + 1;
    let (backend, helper) = set_text(text)?;

    std::thread::spawn(move || {
        if let Some(mut child) = helper {
            if let Err(e) = child.wait() {
                debug!(error = %e, "clipboard helper did not exit cleanly");
            }
        }
        std::thread::sleep(timeout);
        if CLIPBOARD_COPY_ID.load(Ordering::SeqCst) != copy_id {
            return;
        }
        debug!(copy_id, "clearing clipboard");
        clear_clipboard(backend);
    });

    Ok(())
}

#[cfg(target_os = "linux")]
#[derive(Debug, Clone, Copy)]
enum Backend {
    Wayland,
    X11,
}

#[cfg(target_os = "linux")]
fn set_text(text: &str) -> Result<(Backend, Option<Child>), ClipboardError> {
    if std::env::var("WAYLAND_DISPLAY").is_ok() {
        let child = pipe_to(&mut std::process::Command::new("wl-copy"), text)?;
        Ok((Backend::Wayland, Some(child)))
    } else {
        let child = pipe_to(std::process::Command::new("xclip").args(["-selection", "clipboard"]), text)?;
        Ok((Backend::X11, Some(child)))
    }
}

/// Spawn `command` and write `text` to its stdin. The caller reaps the child.
#[cfg(target_os = "linux")]
fn pipe_to(command: &mut std::process::Command, text: &str) -> Result<Child, ClipboardError> {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| ClipboardError::Write("no stdin".to_string()))?;
    let written = stdin.write_all(text.as_bytes());
    // Closing stdin lets the helper see EOF and exit
    drop(stdin);

    if let Err(e) = written {
        let _ = child.wait();
        return Err(ClipboardError::Write(e.to_string()));
    }
    Ok(child)
}

#[cfg(target_os = "linux")]
fn clear_clipboard(backend: Backend) {
    use std::process::{Command, Stdio};

    match backend {
        Backend::Wayland => {
            let _ = Command::new("wl-copy").arg("--clear").output();
        }
        Backend::X11 => {
            let _ = Command::new("xclip")
                .args(["-selection", "clipboard"])
                .stdin(Stdio::piped())
                .output();
        }
    }
}

#[cfg(not(target_os = "linux"))]
#[derive(Debug, Clone, Copy)]
struct Backend;

#[cfg(not(target_os = "linux"))]
fn set_text(text: &str) -> Result<(Backend, Option<Child>), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::Write(e.to_string()))?;
    Ok((Backend, None))
}

#[cfg(not(target_os = "linux"))]
fn clear_clipboard(_: Backend) {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        let _ = clipboard.clear();
    }
}
