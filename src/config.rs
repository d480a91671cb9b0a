use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Startup defaults shared by the CLI and the flag files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub dark: bool,
    pub light: bool,
    pub font: Option<String>,
    pub font_size: Option<u16>,
}

impl ConfigFlags {
    /// Layer `other` over `self`; `other` wins wherever it says anything.
    pub fn union(&self, other: &Self) -> Self {
        let (dark, light) = if other.dark || other.light {
            (other.dark, other.light)
        } else {
            (self.dark, self.light)
        };
        Self {
            dark,
            light,
            font: other.font.clone().or_else(|| self.font.clone()),
            font_size: other.font_size.or(self.font_size),
        }
    }

    /// Whether to start in dark mode. `--light` beats `--dark`.
    pub const fn dark_mode(&self) -> bool {
        self.dark && !self.light
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("quill").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("quill")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("quill").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("quill").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".quillrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(flag_line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split one config line; a font family may contain spaces.
fn flag_line_tokens(line: &str) -> Vec<String> {
    match line.split_once(char::is_whitespace) {
        Some((flag, value)) if flag == "--font" => vec![flag.to_string(), value.trim().to_string()],
        _ => line.split_whitespace().map(ToOwned::to_owned).collect(),
    }
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# quill defaults (saved with --save)".to_string());
    if flags.dark {
        lines.push("--dark".to_string());
    }
    if flags.light {
        lines.push("--light".to_string());
    }
    if let Some(font) = &flags.font {
        lines.push(format!("--font {font}"));
    }
    if let Some(size) = flags.font_size {
        lines.push(format!("--font-size {size}"));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of `tokens`, ignoring everything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--dark" {
            flags.dark = true;
        } else if token == "--light" {
            flags.light = true;
        } else if token == "--font" {
            if let Some(next) = tokens.get(i + 1) {
                flags.font = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--font=") {
            flags.font = Some(value.to_string());
        } else if token == "--font-size" {
            if let Some(next) = tokens.get(i + 1) {
                flags.font_size = parse_size(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--font-size=") {
            flags.font_size = parse_size(value);
        }
        i += 1;
    }
    flags
}

fn parse_size(s: &str) -> Option<u16> {
    s.parse().ok().filter(|size| *size > 0)
}
