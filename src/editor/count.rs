/// Result of counting words and characters in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordCount {
    pub words: usize,
    pub chars: usize,
}

/// Count whitespace-delimited words and all characters of `text`.
///
/// Characters include whitespace. Words are maximal runs of
/// non-whitespace characters; a blank text has zero words. Whitespace is the
/// Unicode `White_Space` set, so a no-break space separates words while
/// control characters such as U+0001 count as word characters.
pub fn word_count(text: &str) -> WordCount {
    WordCount {
        words: text.split_whitespace().count(),
        chars: text.chars().count(),
    }
}
