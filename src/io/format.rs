//! Nice QFerm output formatting.

use std::fmt;

use log;

const QFERM_BANNER_LENGTH: usize = 91;

/// Logs an error to the `qferm-output` logger.
macro_rules! qferm_error {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::error!($fmt, $($($arg)*)?);
        log::error!(target: "qferm-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a warning to the `qferm-output` logger.
macro_rules! qferm_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::warn!(target: "qferm-output", $fmt, $($($arg)*)?); }
}

/// Logs a main output line to the `qferm-output` logger.
macro_rules! qferm_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "qferm-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {qferm_error, qferm_output, qferm_warn};

/// Logs a nicely formatted section title to the `qferm-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(QFERM_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    qferm_output!("┌──{bar}──┐");
    qferm_output!("│§ {title:^length$} §│");
    qferm_output!("└──{bar}──┘");
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Logs a nicely formatted subtitle to the `qferm-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    qferm_output!("{}", subtitle);
    qferm_output!("{}", bar);
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging `QFerm` outputs nicely.
pub(crate) trait QFermOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            qferm_output!("{line}");
        })
    }

    /// Logs debug output nicely.
    fn log_output_debug(&self) {
        let lines = format!("{self:?}");
        lines.lines().for_each(|line| {
            qferm_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> QFermOutput for T where T: fmt::Debug + fmt::Display {}
