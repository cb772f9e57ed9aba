//! Log sinks for watch-mode status messages.

use console::Term;

/// Presentation hints passed with each message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Prefix the message with the current time.
    pub timestamp: bool,
    /// Clear the screen before printing.
    pub clear: bool,
}

impl LogOptions {
    pub fn timestamped() -> Self {
        Self {
            timestamp: true,
            clear: false,
        }
    }

    pub fn fresh_screen() -> Self {
        Self {
            timestamp: true,
            clear: true,
        }
    }
}

/// Receiver of user-facing watch status.
pub trait LogSink: Send + Sync {
    fn info(&self, message: &str, options: LogOptions);
    fn error(&self, message: &str, options: LogOptions);
}

/// Writes messages to the terminal.
pub struct ConsoleSink {
    out: Term,
    err: Term,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    fn emit(term: &Term, message: &str, options: LogOptions) {
        if options.clear && term.is_term() {
            if let Err(e) = term.clear_screen() {
                tracing::warn!("[typegen] failed to clear terminal: {e}");
            }
        }
        let line = if options.timestamp {
            format!("{} {message}", chrono::Local::now().format("%H:%M:%S"))
        } else {
            message.to_string()
        };
        if let Err(e) = term.write_line(&line) {
            tracing::warn!("[typegen] failed to write to terminal: {e}");
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ConsoleSink {
    fn info(&self, message: &str, options: LogOptions) {
        Self::emit(&self.out, message, options);
    }

    fn error(&self, message: &str, options: LogOptions) {
        Self::emit(&self.err, message, options);
    }
}
