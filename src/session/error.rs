use std::path::PathBuf;

/// Failures a session command can report to the user.
///
/// `Display` is the exact notice shown; the I/O cause is only logged.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Error opening file!")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error saving file!")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid size entered!")]
    InvalidFontSize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_notices() {
        let io = || std::io::Error::other("boom");
        let open = SessionError::Open {
            path: PathBuf::from("a"),
            source: io(),
        };
        let save = SessionError::Save {
            path: PathBuf::from("a"),
            source: io(),
        };
        assert_eq!(open.to_string(), "Error opening file!");
        assert_eq!(save.to_string(), "Error saving file!");
        assert_eq!(
            SessionError::InvalidFontSize("x".into()).to_string(),
            "Invalid size entered!"
        );
    }
}
