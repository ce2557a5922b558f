//! Application context — unified state passed to every command handler.

use std::sync::Arc;

use anyhow::Result;

use crate::infra::config::{Defaults, YamlDefaultsStore};
use crate::infra::http::HttpTransport;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Line-oriented per-host report on the terminal (default).
    Console,
    /// Standalone HTML report page on stdout.
    Web,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Enable the HTML report.
    pub web: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Disable ANSI color output.
    pub no_color: bool,
}

/// Unified application context, constructed once in `Cli::run()` and passed
/// as `&AppContext` to all command handlers.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode.
    pub mode: OutputMode,
    /// Defaults loaded from the config file; flags always win.
    pub defaults: Defaults,
    /// Production appliance transport, shared across per-host tasks.
    pub transport: Arc<HttpTransport>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let mode = if flags.web {
            OutputMode::Web
        } else {
            OutputMode::Console
        };
        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            defaults: YamlDefaultsStore.load()?,
            transport: Arc::new(HttpTransport),
        })
    }

    /// Returns `true` when the HTML report mode is active.
    #[must_use]
    pub fn is_web(&self) -> bool {
        self.mode == OutputMode::Web
    }
}
