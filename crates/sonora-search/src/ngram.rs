//! Word-bounded character n-grams.
//!
//! Each whitespace-separated token is padded with one space on either side
//! and cut into every contiguous window of [`MIN_N`]..=[`MAX_N`] characters.
//! Windows never span two tokens, but do include the padding, so
//! " th" (word start) and "he " (word end) are distinct terms from "the".

use std::iter;

pub const MIN_N: usize = 3;
pub const MAX_N: usize = 5;

/// Lowercase and trim, the way titles and queries are compared.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// All boundary-padded n-grams of `text`, in token order, with repeats.
///
/// `text` should already be [normalized](normalize).
pub fn char_ngrams(text: &str) -> Vec<String> {
    let mut grams = Vec::new();
    for token in text.split_whitespace() {
        let padded: Vec<char> = iter::once(' ')
            .chain(token.chars())
            .chain(iter::once(' '))
            .collect();
        for n in MIN_N..=MAX_N.min(padded.len()) {
            grams.extend(padded.windows(n).map(|w| w.iter().collect::<String>()));
        }
    }
    grams
}
