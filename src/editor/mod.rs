//! Text buffer and formatting primitives.
//!
//! Provides a rope-backed text buffer with cursor, selection and underline
//! tracking, plus the buffer-wide font and color types.

mod buffer;
mod count;
mod format;
mod underline;

pub use buffer::{Cursor, Direction, EditorBuffer, LineEnding, normalize_newlines};
pub use count::{WordCount, word_count};
pub use format::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DisplayState, Font, FontStyle, ParseColorError, Rgb,
    color_names,
};
pub use underline::UnderlineRuns;
