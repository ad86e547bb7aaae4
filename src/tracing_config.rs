//! Tracing setup for hosts embedding onetyped.
//!
//! The importer, exporter and lowering emit `tracing` spans and events
//! (`from_type`, `to_declarations`, `lowering alias`, `back-reference`,
//! one `trace!` per applied rule). Nothing is printed unless a subscriber is
//! installed, which is what this module does.
//!
//! Three output formats, selected with `ONETYPED_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented output via `tracing-tree`, one level per nested
//!   `from_type` / `to_declarations` span
//! - `json`: one JSON object per event
//!
//! ```bash
//! # Every import rule, as a tree
//! ONETYPED_LOG=onetyped_typescript=trace ONETYPED_LOG_FORMAT=tree my-host
//!
//! # Back-references and hoisted aliases only
//! ONETYPED_LOG=debug my-host
//! ```

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::TestWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "ONETYPED_LOG";
const FORMAT_VAR: &str = "ONETYPED_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a format name; anything unrecognised is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Where formatted events go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogTarget {
    #[default]
    Stderr,
    /// libtest's captured output, shown only for failing tests.
    TestOutput,
}

impl LogTarget {
    fn make_writer(self) -> BoxMakeWriter {
        match self {
            Self::Stderr => BoxMakeWriter::new(std::io::stderr),
            Self::TestOutput => BoxMakeWriter::new(TestWriter::default()),
        }
    }
}

/// A subscriber to install: filter directives, format and target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    filter: String,
    format: LogFormat,
    target: LogTarget,
}

impl TracingConfig {
    /// `filter` uses `EnvFilter` directive syntax (`info`,
    /// `onetyped_typescript=trace`, ...).
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            format: LogFormat::default(),
            target: LogTarget::default(),
        }
    }

    /// Read `ONETYPED_LOG` (falling back to `RUST_LOG`) and
    /// `ONETYPED_LOG_FORMAT`. `None` when no filter variable is set.
    pub fn from_env() -> Option<Self> {
        let filter = std::env::var(LOG_VAR)
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()?;
        let format = LogFormat::parse(&std::env::var(FORMAT_VAR).unwrap_or_default());
        Some(Self::new(filter).format(format))
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Install as the global subscriber.
    ///
    /// Returns `false` when another global subscriber is already installed;
    /// the existing one is left in place.
    pub fn install(&self) -> bool {
        let filter = EnvFilter::builder().parse_lossy(&self.filter);
        let writer = self.target.make_writer();
        let installed = match self.format {
            LogFormat::Tree => {
                let layer = tracing_tree::HierarchicalLayer::default()
                    .with_writer(writer)
                    .with_indent_amount(2)
                    .with_indent_lines(true)
                    .with_deferred_spans(true)
                    .with_targets(true);
                Registry::default().with(filter).with(layer).try_init()
            }
            LogFormat::Json => {
                let layer = fmt::layer().json().with_writer(writer);
                Registry::default().with(filter).with(layer).try_init()
            }
            LogFormat::Text => {
                let layer = fmt::layer().with_writer(writer);
                Registry::default().with(filter).with(layer).try_init()
            }
        };
        if installed.is_ok() {
            tracing::debug!(filter = %self.filter, format = ?self.format, "tracing initialised");
        }
        installed.is_ok()
    }
}

/// Install the subscriber described by the environment, if any.
///
/// Zero cost when neither `ONETYPED_LOG` nor `RUST_LOG` is set. Safe to call
/// more than once; only the first successful call installs anything.
pub fn init_tracing() -> bool {
    TracingConfig::from_env().is_some_and(|config| config.install())
}
