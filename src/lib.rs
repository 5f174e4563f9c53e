pub mod cli;
pub mod controller;
pub mod draft;
pub mod model;
pub mod projection;
pub mod roster;
pub mod store;
pub mod text_summary;
#[cfg(feature = "tui")]
pub mod tui;
