//! Terminal UI components.
//!
//! - [`layout`]: screen regions, menu geometry and column mapping
//! - [`dialog`]: modal dialogs (prompts, pickers, confirmations, notices)
//! - [`style`]: mapping from session formatting to terminal styles

pub mod dialog;
pub mod layout;
pub mod style;

mod menu;
mod render;
mod status;

pub use render::render;
