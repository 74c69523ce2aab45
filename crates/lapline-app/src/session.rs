//! Terminal session lifecycle with guaranteed cleanup.
//!
//! The ticker runs inline (no raw mode, no alternate screen): it only hides
//! the cursor. [`TerminalSession`] restores it on drop, on panic, and on a
//! second interrupt. The first SIGINT/SIGTERM only requests a cooperative
//! stop through the shared [`CancelToken`].

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM, SIGWINCH};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Longest uninterrupted sleep slice while waiting on a cancellable timer.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Fallback width when the terminal size is unavailable.
pub const FALLBACK_WIDTH: usize = 120;

/// Shared stop and resize flags, set from signal handlers and read by the loop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    resized: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Record that the terminal was resized.
    pub fn notify_resize(&self) {
        self.resized.store(true, Ordering::SeqCst);
    }

    /// Consume a pending resize notification.
    #[must_use]
    pub fn take_resized(&self) -> bool {
        self.resized.swap(false, Ordering::SeqCst)
    }

    /// Sleep for `duration` unless cancelled first.
    ///
    /// Returns `false` if the sleep was cut short by cancellation.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep((deadline - now).min(SLEEP_SLICE));
        }
    }
}

/// Current terminal width in columns, or [`FALLBACK_WIDTH`].
#[must_use]
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _)) if columns > 0 => usize::from(columns),
        Ok(_) => FALLBACK_WIDTH,
        Err(err) => {
            tracing::warn!(error = %err, fallback = FALLBACK_WIDTH, "terminal size unavailable");
            FALLBACK_WIDTH
        }
    }
}

/// Terminal session configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Hide the cursor while the session is alive.
    pub hide_cursor: bool,
    /// Install SIGINT/SIGTERM/SIGWINCH handling.
    pub handle_signals: bool,
}

/// RAII guard for the terminal while the ticker runs.
#[derive(Debug)]
pub struct TerminalSession {
    cursor_hidden: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Set the terminal up and start signal handling.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor cannot be hidden or signal handlers
    /// cannot be installed.
    pub fn new(options: SessionOptions, cancel: CancelToken) -> io::Result<Self> {
        install_panic_hook();

        #[cfg(unix)]
        let signal_guard = if options.handle_signals {
            Some(SignalGuard::new(cancel)?)
        } else {
            None
        };
        #[cfg(not(unix))]
        let _ = cancel;

        let mut session = Self {
            cursor_hidden: false,
            #[cfg(unix)]
            signal_guard,
        };

        if options.hide_cursor {
            crossterm::execute!(io::stdout(), crossterm::cursor::Hide)?;
            session.cursor_hidden = true;
            tracing::debug!("cursor hidden");
        }

        Ok(session)
    }

    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        let mut stdout = io::stdout();
        if self.cursor_hidden {
            let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
            self.cursor_hidden = false;
            tracing::debug!("cursor restored");
        }
        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\x1b[0m");
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = stdout.flush();
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new(cancel: CancelToken) -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM, SIGWINCH]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            for signal in signals.forever() {
                match signal {
                    SIGWINCH => {
                        tracing::debug!("SIGWINCH received");
                        cancel.notify_resize();
                    }
                    SIGINT | SIGTERM if cancel.is_cancelled() => {
                        tracing::warn!("second termination signal, exiting now");
                        best_effort_cleanup();
                        std::process::exit(128 + signal);
                    }
                    SIGINT | SIGTERM => {
                        tracing::info!(signal, "termination signal received, stopping");
                        cancel.cancel();
                    }
                    _ => {}
                }
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn resize_is_consumed_once() {
        let token = CancelToken::new();
        assert!(!token.take_resized());
        token.notify_resize();
        assert!(token.take_resized());
        assert!(!token.take_resized());
    }

    #[test]
    fn sleep_completes_when_not_cancelled() {
        let token = CancelToken::new();
        let start = Instant::now();
        assert!(token.sleep(Duration::from_millis(5)));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn sleep_returns_early_when_cancelled() {
        let token = CancelToken::new();
        let remote = token.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });
        let start = Instant::now();
        assert!(!token.sleep(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }

    #[test]
    fn session_without_options_is_inert() {
        let session = TerminalSession::new(SessionOptions::default(), CancelToken::new()).unwrap();
        drop(session);
    }
}
