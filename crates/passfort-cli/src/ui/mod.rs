//! UI primitives for the PassFort CLI.
//!
//! - **Context**: environment detection (TTY, color)
//! - **Mode**: output mode resolution (json, plain, pretty)
//! - **Theme**: badges and styles
//! - **Render**: tables, key/value blocks, hints, errors

mod context;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use render::{badge, details, hint, print, print_error, table};
pub use theme::Badge;
