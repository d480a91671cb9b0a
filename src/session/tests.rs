use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::tempdir;

use crate::editor::{DEFAULT_FONT_FAMILY, Font, FontStyle, LineEnding, Rgb};

use super::{Collaborator, Command, Confirm, Notice, NoticeLevel, Session};

/// Answers prompts from queues and records everything it was asked.
#[derive(Default)]
struct ScriptedCollaborator {
    open_paths: VecDeque<Option<PathBuf>>,
    save_paths: VecDeque<Option<PathBuf>>,
    fonts: VecDeque<Option<String>>,
    sizes: VecDeque<Option<String>>,
    colors: VecDeque<Option<Rgb>>,
    confirms: VecDeque<Confirm>,
    notices: Vec<Notice>,
    statuses: Vec<String>,
    confirm_prompts: usize,
    save_defaults: Vec<Option<PathBuf>>,
}

impl ScriptedCollaborator {
    fn new() -> Self {
        Self::default()
    }

    fn open(mut self, path: Option<PathBuf>) -> Self {
        self.open_paths.push_back(path);
        self
    }

    fn save(mut self, path: Option<PathBuf>) -> Self {
        self.save_paths.push_back(path);
        self
    }

    fn confirm(mut self, answer: Confirm) -> Self {
        self.confirms.push_back(answer);
        self
    }

    fn size(mut self, input: Option<&str>) -> Self {
        self.sizes.push_back(input.map(ToString::to_string));
        self
    }

    fn messages(&self) -> Vec<&str> {
        self.notices.iter().map(|n| n.message.as_str()).collect()
    }
}

impl Collaborator for ScriptedCollaborator {
    fn pick_open_path(&mut self, _default: Option<&Path>) -> Option<PathBuf> {
        self.open_paths.pop_front().flatten()
    }

    fn pick_save_path(&mut self, default: Option<&Path>) -> Option<PathBuf> {
        self.save_defaults.push(default.map(Path::to_path_buf));
        self.save_paths.pop_front().flatten()
    }

    fn choose_font(&mut self, _current: &str) -> Option<String> {
        self.fonts.pop_front().flatten()
    }

    fn prompt_font_size(&mut self, _current: i32) -> Option<String> {
        self.sizes.pop_front().flatten()
    }

    fn choose_color(&mut self, _current: Rgb) -> Option<Rgb> {
        self.colors.pop_front().flatten()
    }

    fn confirm_unsaved(&mut self) -> Confirm {
        self.confirm_prompts += 1;
        self.confirms.pop_front().unwrap_or(Confirm::Cancel)
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }
}

fn session_with(text: &str) -> Session {
    let mut session = Session::new();
    session.buffer_mut().insert_str(text);
    session.buffer_mut().mark_clean();
    session.buffer_mut().move_to_start();
    session
}

fn select(session: &mut Session, start: usize, end: usize) {
    let buffer = session.buffer_mut();
    buffer.clear_selection();
    buffer.move_to_char(start);
    buffer.set_anchor_if_none();
    buffer.move_to_char(end);
}

// --- Open / Save ---

#[test]
fn test_open_replaces_buffer_and_clears_flag() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello\nworld").unwrap();

    let mut session = session_with("old");
    session.buffer_mut().insert_char('x');
    let mut collab = ScriptedCollaborator::new().open(Some(path.clone()));
    session.open_file(&mut collab);

    assert_eq!(session.buffer().text(), "hello\nworld");
    assert!(!session.is_modified());
    assert_eq!(session.path(), Some(path.as_path()));
    assert_eq!(collab.statuses, vec!["Opened notes.txt".to_string()]);
    assert!(collab.notices.is_empty());
}

#[test]
fn test_open_missing_file_leaves_buffer_and_notifies() {
    let dir = tempdir().unwrap();
    let mut session = session_with("keep me");
    session.buffer_mut().insert_char('!');

    let mut collab = ScriptedCollaborator::new().open(Some(dir.path().join("missing.txt")));
    session.open_file(&mut collab);

    assert_eq!(session.buffer().text(), "!keep me");
    assert!(session.is_modified());
    assert_eq!(collab.messages(), vec!["Error opening file!"]);
    assert_eq!(collab.notices[0].level, NoticeLevel::Error);
}

#[test]
fn test_open_cancel_is_noop() {
    let mut session = session_with("same");
    let mut collab = ScriptedCollaborator::new().open(None);
    session.open_file(&mut collab);
    assert_eq!(session.buffer().text(), "same");
    assert!(collab.notices.is_empty());
    assert!(collab.statuses.is_empty());
}

#[test]
fn test_open_resets_underline_and_selection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    std::fs::write(&path, "fresh").unwrap();

    let mut session = session_with("underlined");
    select(&mut session, 0, 4);
    let mut collab = ScriptedCollaborator::new().open(Some(path));
    session.toggle_underline(&mut collab);
    session.open_file(&mut collab);

    assert!(session.buffer().underline_runs().is_empty());
    assert_eq!(session.buffer().selection(), None);
    assert_eq!(session.buffer().cursor_char_idx(), 0);
}

#[test]
fn test_open_decodes_invalid_utf8_lossily() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bytes.txt");
    std::fs::write(&path, [b'a', 0xff, b'b']).unwrap();

    let mut session = Session::new();
    session.open_path(&path).unwrap();
    assert_eq!(session.buffer().text(), "a\u{fffd}b");
}

#[test]
fn test_open_preserves_crlf_on_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dos.txt");
    std::fs::write(&path, "one\r\ntwo\r\n").unwrap();

    let mut session = Session::new();
    session.open_path(&path).unwrap();
    assert_eq!(session.buffer().text(), "one\ntwo\n");
    assert_eq!(session.line_ending(), LineEnding::CrLf);

    session.save_to(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\r\ntwo\r\n");
}

#[test]
fn test_save_writes_text_and_clears_flag() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let mut session = session_with("draft");
    session.buffer_mut().insert_char('>');
    let mut collab = ScriptedCollaborator::new().save(Some(path.clone()));
    session.save_file(&mut collab);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), ">draft");
    assert!(!session.is_modified());
    assert_eq!(session.path(), Some(path.as_path()));
    assert_eq!(collab.statuses, vec!["Saved out.txt".to_string()]);
}

#[test]
fn test_save_to_unwritable_path_keeps_flag_and_notifies() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.txt");

    let mut session = session_with("text");
    session.buffer_mut().insert_char('x');
    let mut collab = ScriptedCollaborator::new().save(Some(path));
    session.save_file(&mut collab);

    assert!(session.is_modified());
    assert_eq!(session.path(), None);
    assert_eq!(collab.messages(), vec!["Error saving file!"]);
}

#[test]
fn test_save_cancel_is_noop() {
    let mut session = session_with("text");
    session.buffer_mut().insert_char('x');
    let mut collab = ScriptedCollaborator::new().save(None);
    session.save_file(&mut collab);
    assert!(session.is_modified());
    assert!(collab.notices.is_empty());
}

#[test]
fn test_save_picker_defaults_to_current_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("current.txt");
    let mut session = Session::new().with_path(Some(path.clone()));
    let mut collab = ScriptedCollaborator::new().save(None);
    session.save_file(&mut collab);
    assert_eq!(collab.save_defaults, vec![Some(path)]);
}

// --- Unsaved-changes gate ---

#[test]
fn test_gate_skips_prompt_when_clean() {
    let mut session = session_with("clean");
    let mut collab = ScriptedCollaborator::new();
    assert!(session.confirm_unsaved_changes(&mut collab));
    assert_eq!(collab.confirm_prompts, 0);
}

#[test]
fn test_gate_discard_proceeds() {
    let mut session = session_with("text");
    session.buffer_mut().insert_char('x');
    let mut collab = ScriptedCollaborator::new().confirm(Confirm::Discard);
    assert!(session.confirm_unsaved_changes(&mut collab));
    assert!(session.is_modified());
}

#[test]
fn test_gate_cancel_stops() {
    let mut session = session_with("text");
    session.buffer_mut().insert_char('x');
    let mut collab = ScriptedCollaborator::new().confirm(Confirm::Cancel);
    assert!(!session.confirm_unsaved_changes(&mut collab));
}

#[test]
fn test_gate_save_proceeds_even_when_save_fails() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("missing").join("out.txt");
    let mut session = session_with("text");
    session.buffer_mut().insert_char('x');

    let mut collab = ScriptedCollaborator::new()
        .confirm(Confirm::Save)
        .save(Some(bad));
    assert!(session.confirm_unsaved_changes(&mut collab));
    assert!(session.is_modified());
    assert_eq!(collab.messages(), vec!["Error saving file!"]);
}

#[test]
fn test_gate_save_proceeds_even_when_save_cancelled() {
    let mut session = session_with("text");
    session.buffer_mut().insert_char('x');
    let mut collab = ScriptedCollaborator::new().confirm(Confirm::Save).save(None);
    assert!(session.confirm_unsaved_changes(&mut collab));
    assert!(session.is_modified());
}

#[test]
fn test_exit_when_clean_quits_without_prompt() {
    let mut session = session_with("clean");
    let mut collab = ScriptedCollaborator::new();
    session.exit(&mut collab);
    assert!(session.should_quit());
    assert_eq!(collab.confirm_prompts, 0);
}

#[test]
fn test_exit_when_dirty_and_cancelled_keeps_running() {
    let mut session = session_with("text");
    session.buffer_mut().insert_char('x');
    let before = session.buffer().text();
    let mut collab = ScriptedCollaborator::new().confirm(Confirm::Cancel);
    session.exit(&mut collab);
    assert!(!session.should_quit());
    assert_eq!(session.buffer().text(), before);
    assert!(session.is_modified());
}

#[test]
fn test_open_command_cancelled_at_gate_does_not_prompt_for_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("other.txt");
    std::fs::write(&path, "other").unwrap();

    let mut session = session_with("mine");
    session.buffer_mut().insert_char('x');
    let mut collab = ScriptedCollaborator::new()
        .confirm(Confirm::Cancel)
        .open(Some(path));
    session.dispatch(Command::Open, &mut collab);

    assert_eq!(session.buffer().text(), "xmine");
    assert_eq!(collab.open_paths.len(), 1);
}

#[test]
fn test_open_command_after_discard_loads_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("other.txt");
    std::fs::write(&path, "other").unwrap();

    let mut session = session_with("mine");
    session.buffer_mut().insert_char('x');
    let mut collab = ScriptedCollaborator::new()
        .confirm(Confirm::Discard)
        .open(Some(path));
    session.dispatch(Command::Open, &mut collab);

    assert_eq!(session.buffer().text(), "other");
    assert!(!session.is_modified());
}

// --- Clipboard ---

#[test]
fn test_cut_then_paste_moves_text() {
    let mut session = session_with("hello world");
    select(&mut session, 0, 6);
    session.cut();
    assert_eq!(session.buffer().text(), "world");
    assert!(session.is_modified());

    session.buffer_mut().move_to_end();
    session.paste();
    assert_eq!(session.buffer().text(), "worldhello ");
}

#[test]
fn test_copy_keeps_text_and_flag() {
    let mut session = session_with("abc");
    select(&mut session, 1, 3);
    session.copy();
    assert_eq!(session.buffer().text(), "abc");
    assert!(!session.is_modified());

    session.buffer_mut().clear_selection();
    session.buffer_mut().move_to_start();
    session.paste();
    assert_eq!(session.buffer().text(), "bcabc");
}

#[test]
fn test_cut_and_copy_with_empty_selection_do_nothing() {
    let mut session = session_with("abc");
    session.cut();
    session.copy();
    session.paste();
    assert_eq!(session.buffer().text(), "abc");
    assert!(!session.is_modified());
}

#[test]
fn test_paste_replaces_selection() {
    let mut session = session_with("one two");
    select(&mut session, 0, 3);
    session.copy();
    select(&mut session, 4, 7);
    session.paste();
    assert_eq!(session.buffer().text(), "one one");
}

// --- Word count ---

#[test]
fn test_word_count_notice() {
    let session = session_with("a b  c");
    let mut collab = ScriptedCollaborator::new();
    session.show_word_count(&mut collab);
    assert_eq!(collab.notices.len(), 1);
    assert_eq!(collab.notices[0].title, "Word Count");
    assert_eq!(collab.notices[0].message, "Words: 3\nCharacters: 6");
}

#[test]
fn test_word_count_of_empty_buffer() {
    let session = Session::new();
    let count = session.word_count();
    assert_eq!((count.words, count.chars), (0, 0));
}

// --- Font and color ---

#[test]
fn test_font_size_valid_keeps_family_and_style() {
    let mut session = Session::new().with_font(Font::new("Serif", FontStyle::Bold, 10));
    let mut collab = ScriptedCollaborator::new().size(Some("12"));
    session.change_font_size(&mut collab);
    assert_eq!(session.font(), &Font::new("Serif", FontStyle::Bold, 12));
    assert!(collab.notices.is_empty());
}

#[test]
fn test_font_size_invalid_leaves_font_and_notifies() {
    let mut session = Session::new();
    let before = session.font().clone();
    let mut collab = ScriptedCollaborator::new().size(Some("abc"));
    session.change_font_size(&mut collab);
    assert_eq!(session.font(), &before);
    assert_eq!(collab.messages(), vec!["Invalid size entered!"]);
}

#[test]
fn test_font_size_accepts_any_integer() {
    for (input, expected) in [("0", 0), ("-5", -5), ("70000", 70_000), ("+14", 14)] {
        let mut session = Session::new();
        let mut collab = ScriptedCollaborator::new().size(Some(input));
        session.change_font_size(&mut collab);
        assert_eq!(session.font().size, expected, "input {input:?}");
        assert!(collab.notices.is_empty(), "input {input:?}");
    }
}

#[test]
fn test_font_size_rejects_padding_and_overflow() {
    let mut session = Session::new();
    assert!(session.apply_font_size(" 12").is_err());
    assert!(session.apply_font_size("12.5").is_err());
    assert!(session.apply_font_size("2147483648").is_err());
    assert_eq!(session.font().size, 12);
}

#[test]
fn test_font_size_cancel_is_noop() {
    let mut session = Session::new();
    let mut collab = ScriptedCollaborator::new().size(None);
    session.change_font_size(&mut collab);
    assert_eq!(session.font(), &Font::default());
    assert!(collab.notices.is_empty());
}

#[test]
fn test_change_font_keeps_style_and_size() {
    let mut session = Session::new().with_font(Font::new("Serif", FontStyle::Italic, 18));
    let mut collab = ScriptedCollaborator::new();
    collab.fonts.push_back(Some("DejaVu Sans Mono".to_string()));
    session.change_font(&mut collab);
    assert_eq!(
        session.font(),
        &Font::new("DejaVu Sans Mono", FontStyle::Italic, 18)
    );

    collab.fonts.push_back(None);
    session.change_font(&mut collab);
    assert_eq!(session.font().family, "DejaVu Sans Mono");
}

#[test]
fn test_change_text_color() {
    let mut session = Session::new();
    let red = Rgb::new(255, 0, 0);
    let mut collab = ScriptedCollaborator::new();
    collab.colors.push_back(Some(red));
    collab.colors.push_back(None);

    session.change_text_color(&mut collab);
    assert_eq!(session.foreground(), red);
    session.change_text_color(&mut collab);
    assert_eq!(session.foreground(), red);
}

#[test]
fn test_font_style_commands_replace_style_only() {
    let mut session = Session::new();
    let mut collab = ScriptedCollaborator::new();
    session.dispatch(Command::Bold, &mut collab);
    assert_eq!(session.font().style, FontStyle::Bold);
    session.dispatch(Command::Italic, &mut collab);
    assert_eq!(session.font().style, FontStyle::Italic);
    session.dispatch(Command::Plain, &mut collab);
    assert_eq!(session.font(), &Font::default());
    assert!(!session.is_modified());
}

// --- Underline ---

#[test]
fn test_underline_without_selection_notifies() {
    let mut session = session_with("text");
    let mut collab = ScriptedCollaborator::new();
    session.toggle_underline(&mut collab);
    assert_eq!(collab.messages(), vec!["Please select text to underline."]);
    assert!(session.buffer().underline_runs().is_empty());
    assert!(!session.display().underline_intent);
    assert!(!session.is_modified());
}

#[test]
fn test_underline_toggles_whole_selection() {
    let mut session = session_with("hello world");
    select(&mut session, 0, 5);
    let mut collab = ScriptedCollaborator::new();

    session.toggle_underline(&mut collab);
    assert!((0..5).all(|i| session.buffer().is_underlined(i)));
    assert!(!session.buffer().is_underlined(5));
    assert!(session.is_modified());
    assert!(session.display().underline_intent);

    session.toggle_underline(&mut collab);
    assert!(session.buffer().underline_runs().is_empty());
    assert!(!session.display().underline_intent);
}

#[test]
fn test_underline_uses_first_character_state() {
    let mut session = session_with("abcdef");
    let mut collab = ScriptedCollaborator::new();
    select(&mut session, 2, 4);
    session.toggle_underline(&mut collab);

    // starts un-underlined, so the whole range gets underlined
    select(&mut session, 0, 6);
    session.toggle_underline(&mut collab);
    assert!((0..6).all(|i| session.buffer().is_underlined(i)));

    // starts underlined, so the whole range gets cleared
    select(&mut session, 3, 6);
    session.toggle_underline(&mut collab);
    assert!((0..3).all(|i| session.buffer().is_underlined(i)));
    assert!((3..6).all(|i| !session.buffer().is_underlined(i)));
}

// --- Display ---

#[test]
fn test_dark_mode_swaps_colors_and_overrides_text_color() {
    let mut session = Session::new();
    session.set_text_color(Rgb::new(1, 2, 3));
    session.toggle_dark_mode();
    assert!(session.display().dark_mode);
    assert_eq!(session.background(), Rgb::BLACK);
    assert_eq!(session.foreground(), Rgb::WHITE);

    session.toggle_dark_mode();
    assert_eq!(session.background(), Rgb::WHITE);
    assert_eq!(session.foreground(), Rgb::BLACK);
    assert!(!session.is_modified());
}

#[test]
fn test_with_dark_mode_starts_dark() {
    let session = Session::new().with_dark_mode(true);
    assert!(session.display().dark_mode);
    assert_eq!(session.background(), Rgb::BLACK);
}

#[test]
fn test_about_shows_version() {
    let mut session = Session::new();
    let mut collab = ScriptedCollaborator::new();
    session.dispatch(Command::About, &mut collab);
    assert_eq!(collab.notices[0].title, "About");
    assert!(collab.notices[0].message.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_new_session_defaults() {
    let session = Session::new();
    assert_eq!(session.font().family, DEFAULT_FONT_FAMILY);
    assert!(!session.is_modified());
    assert!(!session.should_quit());
    assert_eq!(session.path(), None);
}

// --- Modification flag property ---

#[derive(Debug, Clone)]
enum Op {
    Insert(char),
    Backspace,
    Left,
    Save,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::char::range('a', 'z').prop_map(Op::Insert),
        Just(Op::Backspace),
        Just(Op::Left),
        Just(Op::Save),
    ]
}

proptest! {
    #[test]
    fn prop_modified_iff_edit_since_save(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prop.txt");
        let mut session = Session::new();
        let mut edited = false;

        for op in ops {
            match op {
                Op::Insert(ch) => {
                    session.buffer_mut().insert_char(ch);
                    edited = true;
                }
                Op::Backspace => edited |= session.buffer_mut().delete_back(),
                Op::Left => session.buffer_mut().move_cursor(crate::editor::Direction::Left),
                Op::Save => {
                    session.save_to(&path).unwrap();
                    edited = false;
                }
            }
            prop_assert_eq!(session.is_modified(), edited);
        }
    }
}
