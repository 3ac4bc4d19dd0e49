//! Logging types.

/// Callback type for mirroring log lines to an embedding application.
pub type LogCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Message prefixes for structured log lines.
#[derive(Debug, Clone, Copy)]
pub enum MessagePrefix {
    Phase,
    Command,
    Success,
    Warning,
    Error,
}

impl MessagePrefix {
    /// Format a message with this prefix.
    pub fn format(&self, message: &str) -> String {
        match self {
            Self::Phase => format!("--- {} ---", message),
            Self::Command => format!("$ {}", message),
            Self::Success => format!("[ok] {}", message),
            Self::Warning => format!("[warn] {}", message),
            Self::Error => format!("[error] {}", message),
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level to emit.
    pub level: LogLevel,
    /// Prefix lines with a HH:MM:SS timestamp.
    pub show_timestamps: bool,
    /// Number of external-tool output lines kept for error diagnosis.
    pub error_tail: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            show_timestamps: true,
            error_tail: 20,
        }
    }
}
