//! # Pagewire
//!
//! Support library for browser client widgets:
//! - A typed publish/subscribe event bus with one-time events
//! - Drag-to-resize for images embedded in rendered markdown
//!
//! ## Architecture
//!
//! Pagewire is organized as a workspace with multiple crates:
//!
//! 1. **pagewire-core** - Event bus, one-time events, event catalog, errors
//! 2. **pagewire-markdown** - Resize geometry, image links, image-url service contract
//! 3. **pagewire** - This facade: configuration and logging setup

pub mod config;

pub use pagewire_core::event_bus::{self, catalog};
pub use pagewire_core::{
    DispatchPolicy, DynamicHandler, Error, Event, EventBus, EventBusConfig, EventBusError,
    Handler, OneTimeEvent, OneTimeState, Result, Untyped,
};

pub use pagewire_markdown as markdown;
pub use pagewire_markdown::{
    DragSession, DragStart, HandleKind, ImageResizer, ImageUrlService, ResizeArgs, ResizeError,
    ResizerSettings, UpdateImageHook,
};

pub use config::{Config, LoggingSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the event bus described by `config`
pub fn event_bus_from(config: &Config) -> EventBus {
    EventBus::with_config(config.bus.clone())
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - `RUST_LOG` support, falling back to `settings.level`
/// - Pretty console output, or JSON lines when `settings.json` is set
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))?;

    if settings.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
