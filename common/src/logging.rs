//! Common logging initializer
//!

use eyre::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_tree::HierarchicalLayer;

/// Set up the tracing subscriber for a binary.
///
/// `RUST_LOG` wins if set, otherwise the repeatable `-v` flag raises the
/// default level.  `use_tree` switches the compact output for a hierarchical
/// span view.
///
pub fn init_logging(verbose: u8, use_tree: bool) -> Result<()> {
    // Load filters from environment, fall back on the verbosity flag
    //
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    });

    // Do we want hierarchical output?
    //
    let tree = if use_tree {
        Some(
            HierarchicalLayer::new(2)
                .with_ansi(true)
                .with_span_retrace(true)
                .with_span_modes(true)
                .with_targets(true)
                .with_verbose_entry(true)
                .with_verbose_exit(true)
                .with_bracketed_fields(true),
        )
    } else {
        None
    };

    // Regular compact output otherwise
    //
    let layer = if use_tree {
        None
    } else {
        Some(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
    };

    // Combine filter & formats
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(layer)
        .init();

    Ok(())
}
