use std::fmt::{Display, Write as _};

use expressive_config::{ReportConfig, ReportLevel};

/// Sink for diagnostic output produced by `report`
pub trait Printer {
    /// Print the formatted error line followed by extra arguments
    fn print(&self, line: &str, args: &[&dyn Display]);
}

impl<F> Printer for F
where
    F: Fn(&str, &[&dyn Display]),
{
    fn print(&self, line: &str, args: &[&dyn Display]) {
        self(line, args);
    }
}

/// Emits a `tracing` event at a configurable level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPrinter {
    level: ReportLevel,
}

impl TracingPrinter {
    /// Printer emitting at `level`
    pub const fn new(level: ReportLevel) -> Self {
        Self { level }
    }

    /// Printer configured from the `[report]` section
    pub const fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.level)
    }

    /// Level this printer emits at
    pub const fn level(&self) -> ReportLevel {
        self.level
    }
}

impl Printer for TracingPrinter {
    fn print(&self, line: &str, args: &[&dyn Display]) {
        let extra = join_args(args);

        match self.level {
            ReportLevel::Trace => tracing::trace!(extra = %extra, "{line}"),
            ReportLevel::Debug => tracing::debug!(extra = %extra, "{line}"),
            ReportLevel::Info => tracing::info!(extra = %extra, "{line}"),
            ReportLevel::Warn => tracing::warn!(extra = %extra, "{line}"),
            ReportLevel::Error => tracing::error!(extra = %extra, "{line}"),
        }
    }
}

/// Writes to standard error, bypassing `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrPrinter;

impl Printer for StderrPrinter {
    fn print(&self, line: &str, args: &[&dyn Display]) {
        if args.is_empty() {
            eprintln!("{line}");
        } else {
            eprintln!("{line} {}", join_args(args));
        }
    }
}

fn join_args(args: &[&dyn Display]) -> String {
    let mut joined = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            joined.push(' ');
        }
        let _ = write!(joined, "{arg}");
    }
    joined
}
