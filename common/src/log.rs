//! Log messages received from the robot and their on-screen formatting.
//!
//! Each message is a `[severity, source, body]` triple. The viewport renders it as
//!
//! ```text
//! [<source>@<HH:MM:SS>] <SEVERITY>: <body>
//! ```
//!
//! # Severities
//!
//! - `Info`: Black - normal operation
//! - `Warning`: Orange-red - attention needed
//! - `Error`: Red - something failed
//! - `Fatal`: Dark red - a program on the robot died
//! - `Other`: Black - any label the dashboard does not know

use core::fmt::{self, Write};

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::colors::{BLACK, DARK_RED, ORANGE_RED, RED};
use crate::config::LOG_LINE_LEN;

/// Maximum characters kept for a severity label.
pub const LABEL_LEN: usize = 12;

/// Maximum characters kept for a message source.
pub const SOURCE_LEN: usize = 32;

/// Maximum characters kept for a message body.
pub const BODY_LEN: usize = 96;

/// Log severity, derived from the label sent by the robot.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Severity {
    /// `INFO` (black)
    Info,
    /// `WARNING` (orange-red)
    Warning,
    /// `ERROR` (red)
    Error,
    /// `FATAL` (dark red)
    Fatal,
    /// Any other label (black)
    #[default]
    Other,
}

impl Severity {
    /// Classify a label. Matching is exact, as the robot sends upper-case names.
    pub fn from_label(label: &str) -> Self {
        match label {
            "INFO" => Self::Info,
            "WARNING" => Self::Warning,
            "ERROR" => Self::Error,
            "FATAL" => Self::Fatal,
            _ => Self::Other,
        }
    }

    /// Get the display color for this severity.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Warning => ORANGE_RED,
            Self::Error => RED,
            Self::Fatal => DARK_RED,
            Self::Info | Self::Other => BLACK,
        }
    }
}

/// Wall-clock time of day stamped into a formatted line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    pub const fn new(
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Self {
        Self { hour, minute, second }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// A single log message as delivered by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogMessage {
    /// Severity label exactly as sent (truncated to `LABEL_LEN`).
    pub label: String<LABEL_LEN>,
    /// Name of the program that emitted the message.
    pub source: String<SOURCE_LEN>,
    /// Message text.
    pub body: String<BODY_LEN>,
}

impl LogMessage {
    /// Create a new message, truncating each field to its capacity.
    pub fn new(
        label: &str,
        source: &str,
        body: &str,
    ) -> Self {
        Self {
            label: truncated(label),
            source: truncated(source),
            body: truncated(body),
        }
    }

    /// Severity classified from the label.
    #[inline]
    pub fn severity(&self) -> Severity { Severity::from_label(&self.label) }

    /// Display color for this message.
    #[inline]
    pub fn color(&self) -> Rgb565 { self.severity().color() }

    /// Format as `[<source>@<time>] <SEVERITY>: <body>`.
    ///
    /// Output beyond `LOG_LINE_LEN` characters is dropped.
    pub fn format_line(
        &self,
        time: TimeOfDay,
    ) -> String<LOG_LINE_LEN> {
        let mut line = Truncating::<LOG_LINE_LEN>::default();
        let _ = write!(line, "[{}@{}] {}: {}", self.source, time, self.label, self.body);
        line.0
    }
}

/// Copy `s` into a fixed-capacity string, dropping whatever does not fit.
pub fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out: String<N> = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// `fmt::Write` adapter that silently stops at capacity instead of failing the
/// whole `write!`.
#[derive(Default)]
struct Truncating<const N: usize>(String<N>);

impl<const N: usize> Write for Truncating<N> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}
