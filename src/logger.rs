//! Structured logging with box-drawing output.
//!
//! The library never logs on the numeric hot path (position model, bisection).
//! Logging happens at the edges: settings loading, timezone fallbacks and the
//! human-readable solar report in [`crate::display`].
//!
//! Output goes to stderr by default so that callers embedding the crate keep
//! stdout for their own data. [`Log::start_file_logging`] redirects all output
//! to a file through a writer thread, with ANSI colors stripped, until the
//! returned [`LoggerGuard`] is dropped.
//!
//! ## Conventions
//!
//! - **`log_block_start!`**: opens a new block (`┃` spacer, then `┣ message`).
//! - **`log_decorated!`**: a line inside the current block (`┣ message`).
//! - **`log_indented!`**: nested detail (`┃   message`).
//! - **`log_pipe!`**: a single `┃` spacer, used before a semantic message
//!   that starts its own block.
//! - **`log_version!`** / **`log_end!`**: report header and terminator.
//! - **`log_info!`, `log_warning!`, `log_error!`, `log_debug!`**: `[LEVEL]`
//!   prefixed messages. `log_debug!` is silent unless [`Log::set_debug`] was
//!   switched on.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};
use std::sync::{Mutex, MutexGuard};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

// Set while a LoggerGuard is alive; None means stderr
static LOG_CHANNEL: Mutex<Option<Sender<LogMessage>>> = Mutex::new(None);

fn log_channel() -> MutexGuard<'static, Option<Sender<LogMessage>>> {
    LOG_CHANNEL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Process-wide logging switches.
pub struct Log;

impl Log {
    /// Enable or disable all output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable `log_debug!` output.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        Self::is_enabled() && DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Send all further output to `file_path` until the returned guard drops.
    ///
    /// Only one file sink can be active at a time. Once the guard is dropped,
    /// output returns to stderr and a new sink may be started.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let mut active = log_channel();
        if active.is_some() {
            anyhow::bail!("File logging is already active");
        }

        let (tx, rx) = channel();
        *active = Some(tx.clone());
        drop(active);

        let handle = std::thread::spawn(move || {
            let mut file = std::fs::File::create(&file_path)?;

            loop {
                match rx.recv() {
                    Ok(LogMessage::Formatted(text)) => {
                        file.write_all(text.as_bytes())?;
                    }
                    Ok(LogMessage::Shutdown) | Err(_) => {
                        file.flush()?;
                        break;
                    }
                }
            }

            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }
}

/// Flushes and joins the file writer thread on drop, then restores stderr.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        // Writes from here on go to stderr, not behind Shutdown
        log_channel().take();

        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(Err(error)) => crate::log_error!("Log file writer failed: {error:#}"),
                Err(_) => crate::log_error!("Log file writer panicked"),
                Ok(Ok(())) => {}
            }
        }
    }
}

/// Remove `ESC [ ... m` color sequences.
fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

// Public because the exported macros expand to it
pub fn write_output(text: &str) {
    if let Some(tx) = log_channel().as_ref()
        && tx
            .send(LogMessage::Formatted(strip_ansi_codes(text)))
            .is_ok()
    {
        return;
    }

    // No sink, or its writer thread has already stopped
    eprint!("{text}");
    let _ = std::io::stderr().flush();
}

// # Logging Macros

/// Log a line inside the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => {{
        if $crate::logger::Log::is_enabled() {
            let message = format!($($arg)+);
            $crate::logger::write_output(&format!("┣ {message}\n"));
        }
    }};
}

/// Log a nested detail line.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => {{
        if $crate::logger::Log::is_enabled() {
            let message = format!($($arg)+);
            $crate::logger::write_output(&format!("┃   {message}\n"));
        }
    }};
}

/// Log a vertical spacer.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output("┃\n");
        }
    }};
}

/// Open a new block.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => {{
        if $crate::logger::Log::is_enabled() {
            let message = format!($($arg)+);
            $crate::logger::write_output(&format!("┃\n┣ {message}\n"));
        }
    }};
}

/// Log the report header.
#[macro_export]
macro_rules! log_version {
    () => {{
        if $crate::logger::Log::is_enabled() {
            let version = env!("CARGO_PKG_VERSION");
            $crate::logger::write_output(&format!("┏ sunwise v{version} ━━╸\n"));
        }
    }};
}

/// Log the report terminator.
#[macro_export]
macro_rules! log_end {
    () => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output("╹\n");
        }
    }};
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {{
        if $crate::logger::Log::is_enabled() {
            let message = format!($($arg)+);
            $crate::logger::write_output(&format!("┣[\x1b[33mWARNING\x1b[0m] {message}\n"));
        }
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {{
        if $crate::logger::Log::is_enabled() {
            let message = format!($($arg)+);
            $crate::logger::write_output(&format!("┣[\x1b[31mERROR\x1b[0m] {message}\n"));
        }
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {{
        if $crate::logger::Log::is_enabled() {
            let message = format!($($arg)+);
            $crate::logger::write_output(&format!("┣[\x1b[32mINFO\x1b[0m] {message}\n"));
        }
    }};
}

/// Debug output, only emitted when [`Log::set_debug`] is on.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {{
        if $crate::logger::Log::is_debug() {
            let message = format!($($arg)+);
            $crate::logger::write_output(&format!("┣[\x1b[32mDEBUG\x1b[0m] {message}\n"));
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_strip_ansi_codes() {
        assert_eq!(
            strip_ansi_codes("┣[\x1b[33mWARNING\x1b[0m] polar night"),
            "┣[WARNING] polar night"
        );
        assert_eq!(strip_ansi_codes("plain"), "plain");
        // A lone escape without '[' is kept
        assert_eq!(strip_ansi_codes("a\x1bb"), "a\x1bb");
    }

    #[test]
    #[serial]
    fn test_file_logging_strips_colors_and_hands_back_to_stderr() {
        Log::set_enabled(true);
        let dir = tempdir().unwrap();
        let first_path = dir.path().join("first.log");

        let guard = Log::start_file_logging(first_path.display().to_string()).unwrap();
        let other = dir.path().join("other.log").display().to_string();
        assert!(Log::start_file_logging(other).is_err());
        log_info!("first");
        log_warning!("polar night");
        drop(guard);

        let first = fs::read_to_string(&first_path).unwrap();
        assert!(first.contains("┣[INFO] first\n"));
        assert!(first.contains("┣[WARNING] polar night\n"));
        assert!(!first.contains('\x1b'));

        // Back on stderr: nothing more reaches the closed file
        assert!(log_channel().is_none());
        log_decorated!("second");
        assert!(!fs::read_to_string(&first_path).unwrap().contains("second"));

        // A new sink can be started once the old one is gone
        let second_path = dir.path().join("second.log");
        let guard = Log::start_file_logging(second_path.display().to_string()).unwrap();
        log_decorated!("third");
        drop(guard);
        assert!(fs::read_to_string(&second_path).unwrap().contains("┣ third\n"));
    }

    #[test]
    #[serial]
    fn test_unwritable_log_file_falls_back_to_stderr() {
        Log::set_enabled(true);
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("sunwise.log");

        let guard = Log::start_file_logging(path.display().to_string()).unwrap();
        log_info!("still printed");
        drop(guard);

        assert!(!path.exists());
        assert!(log_channel().is_none());
    }

    #[test]
    #[serial]
    fn test_debug_requires_enabled_logging() {
        Log::set_debug(true);
        Log::set_enabled(false);
        assert!(!Log::is_debug());
        Log::set_enabled(true);
        assert!(Log::is_debug());
        Log::set_debug(false);
        assert!(!Log::is_debug());
    }
}
