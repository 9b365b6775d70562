//! Reading time estimation

use crate::content::richtext::as_text;
use crate::content::ContentSection;

/// Default reading speed
pub const WORDS_PER_MINUTE: usize = 200;

/// Number of whitespace-separated words across every section body
pub fn count_words(sections: &[ContentSection]) -> usize {
    sections
        .iter()
        .map(|section| as_text(&section.body).split_whitespace().count())
        .sum()
}

/// Minutes needed to read `words` at `words_per_minute`, rounded up
///
/// Never less than one minute, empty content included.
pub fn minutes_for(words: usize, words_per_minute: usize) -> usize {
    words.div_ceil(words_per_minute.max(1)).max(1)
}

/// Estimated reading time of a post body in whole minutes
pub fn reading_time(sections: &[ContentSection], words_per_minute: usize) -> usize {
    minutes_for(count_words(sections), words_per_minute)
}
