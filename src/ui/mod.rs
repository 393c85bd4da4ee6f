//! Console presentation: colors, icons and per-command views.

pub mod context;
pub mod icon;
pub mod terminal;
pub mod theme;
pub mod views;
