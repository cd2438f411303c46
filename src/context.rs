//! Run context passed explicitly into every stage
//!
//! Replaces process-wide logger/manager singletons: each run carries its own
//! configuration and tracing span, so runs are independently testable.

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use tracing::span::Entered;
use tracing::Span;
use tracing_subscriber::EnvFilter;

pub struct RunContext {
    pub config: PipelineConfig,
    span: Span,
}

impl RunContext {
    pub fn new(config: PipelineConfig) -> Self {
        let span = tracing::info_span!("variant_run", run = %config.run_label);
        Self { config, span }
    }

    /// Enter the run span for the duration of a stage
    pub fn enter(&self) -> Entered<'_> {
        self.span.enter()
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Install the stderr fmt subscriber. Binaries call this once at startup.
pub fn init_logging(filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|e| PipelineError::Config(format!("invalid log filter '{}': {}", filter, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| PipelineError::Config(format!("failed to install logger: {}", e)))
}
