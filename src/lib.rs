// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # Quill
//!
//! A minimal terminal text editor.
//!
//! Quill edits plain UTF-8 text files with:
//! - A menu bar with File, Edit, Format and Help menus
//! - Whole-buffer font family, size, style and text color
//! - Per-range underline
//! - Dark mode
//! - Word and character counts
//!
//! ## Architecture
//!
//! Quill uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! Menu commands are dispatched to an editor [`session::Session`], which asks
//! for user input through the [`session::Collaborator`] trait. The terminal
//! app answers with modal dialogs; tests answer with scripted values.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`session`]: Editor session, commands and the collaborator contract
//! - [`editor`]: Text buffer, underline runs, word count and formatting types
//! - [`ui`]: Terminal UI components
//! - [`clipboard`]: Clipboard register with terminal export
//! - [`config`]: Startup flags and flag files
//! - [`fonts`]: Host font enumeration

pub mod app;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod fonts;
pub mod session;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::EditorBuffer;
    pub use crate::session::{Collaborator, Command, Session};
}
