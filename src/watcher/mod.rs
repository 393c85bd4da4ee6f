//! Watch mode
//!
//! Regenerates the component data whenever something changes under the
//! examples or components roots:
//! - Debouncing (100ms default)
//! - Full pass per batch of changes, never incremental
//! - One pass at a time; changes during a pass trigger one follow-up pass
//! - Roots missing at startup are attached once they appear
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

mod event;
mod use_case;

#[cfg(test)]
mod tests;

pub use event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
pub use use_case::WatchUseCase;
