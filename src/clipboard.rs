//! Clipboard used by cut, copy and paste.
//!
//! The session always reads from an in-process register. The terminal
//! clipboard also mirrors copied text to the system clipboard (pbcopy on
//! macOS, OSC 52 elsewhere); pasting from the system goes through the
//! terminal's bracketed paste instead.

use std::io::{Write, stdout};

use base64::Engine;

/// Text storage for cut/copy/paste.
pub trait Clipboard {
    /// Current clipboard text, if any.
    fn get(&mut self) -> Option<String>;
    /// Replace the clipboard text.
    fn set(&mut self, text: &str);
}

/// In-memory clipboard.
#[derive(Debug, Default, Clone)]
pub struct Register {
    text: Option<String>,
}

impl Register {
    pub const fn new() -> Self {
        Self { text: None }
    }
}

impl Clipboard for Register {
    fn get(&mut self) -> Option<String> {
        self.text.clone().filter(|t| !t.is_empty())
    }

    fn set(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
}

/// Register that also pushes copies to the host clipboard.
#[derive(Debug, Default)]
pub struct TerminalClipboard {
    register: Register,
}

impl TerminalClipboard {
    pub const fn new() -> Self {
        Self {
            register: Register::new(),
        }
    }
}

impl Clipboard for TerminalClipboard {
    fn get(&mut self) -> Option<String> {
        self.register.get()
    }

    fn set(&mut self, text: &str) {
        self.register.set(text);
        if let Err(err) = copy_to_system(text) {
            tracing::warn!(%err, "system clipboard unavailable");
        }
    }
}

fn copy_to_system(text: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        if copy_to_pbcopy(text).is_ok() {
            return Ok(());
        }
    }
    copy_to_clipboard_osc52(text)
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
