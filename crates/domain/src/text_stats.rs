//! Text analyzer
//!
//! Turns a transcription into the "You said" report sent back to the user.

use std::fmt;

/// Counts reported for a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    /// Whitespace-delimited tokens, empty tokens excluded
    pub words: usize,
    /// Characters excluding ASCII spaces
    pub characters: usize,
    /// ASCII space characters
    pub spaces: usize,
    /// Characters in `[aeiouAEIOU]`
    pub vowels: usize,
}

impl TextStats {
    /// Compute the counts for `text`
    #[must_use]
    pub fn of(text: &str) -> Self {
        let spaces = text.chars().filter(|&c| c == ' ').count();
        Self {
            words: text.split_whitespace().count(),
            characters: text.chars().count() - spaces,
            spaces,
            vowels: text.chars().filter(|&c| is_vowel(c)).count(),
        }
    }
}

impl fmt::Display for TextStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Word Count: {}\n\nCharacter Count: {}\n\nSpace Count: {}\n\nVowel Count: {}",
            self.words, self.characters, self.spaces, self.vowels
        )
    }
}

const fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Build the report for a transcription
///
/// Absent input is treated as empty. Empty input yields only the
/// `You said: .` line.
#[must_use]
pub fn analyze(text: Option<&str>) -> String {
    let text = text.unwrap_or_default();
    let mut report = format!("You said: {text}.");

    if !text.is_empty() {
        report.push_str("\n\n");
        report.push_str(&TextStats::of(text).to_string());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hello_world_counts() {
        let stats = TextStats::of("hello world");
        assert_eq!(
            stats,
            TextStats {
                words: 2,
                characters: 10,
                spaces: 1,
                vowels: 3,
            }
        );
    }

    #[test]
    fn empty_input_has_only_leading_line() {
        assert_eq!(analyze(Some("")), "You said: .");
    }

    #[test]
    fn absent_input_has_only_leading_line() {
        assert_eq!(analyze(None), "You said: .");
    }

    #[test]
    fn single_word_report() {
        assert_eq!(
            analyze(Some("test")),
            "You said: test.\n\nWord Count: 1\n\nCharacter Count: 4\n\nSpace Count: 0\n\nVowel Count: 1"
        );
    }

    #[test]
    fn repeated_spaces_do_not_create_words() {
        let stats = TextStats::of("a  b ");
        assert_eq!(stats.words, 2);
        assert_eq!(stats.spaces, 3);
        assert_eq!(stats.characters, 2);
    }

    #[test]
    fn vowels_are_case_insensitive() {
        assert_eq!(TextStats::of("AEIOU aeiou").vowels, 10);
    }

    #[test]
    fn no_vowels_counts_zero() {
        assert_eq!(TextStats::of("rhythm").vowels, 0);
    }

    #[test]
    fn characters_count_unicode_scalars() {
        let stats = TextStats::of("héllo wörld");
        assert_eq!(stats.characters, 10);
        // accented letters are not in [aeiou]
        assert_eq!(stats.vowels, 1);
    }

    #[test]
    fn whitespace_only_input_has_zero_words() {
        let stats = TextStats::of("   ");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.spaces, 3);
        assert_eq!(stats.characters, 0);
    }

    proptest! {
        #[test]
        fn vowel_count_matches_ascii_vowels(text in ".*") {
            let expected = text.chars().filter(|c| "aeiouAEIOU".contains(*c)).count();
            prop_assert_eq!(TextStats::of(&text).vowels, expected);
        }

        #[test]
        fn characters_plus_spaces_is_char_count(text in ".*") {
            let stats = TextStats::of(&text);
            prop_assert_eq!(stats.characters + stats.spaces, text.chars().count());
        }

        #[test]
        fn report_always_starts_with_you_said(text in ".*") {
            let report = analyze(Some(&text));
            let expected_prefix = format!("You said: {text}.");
            prop_assert!(report.starts_with(&expected_prefix));
        }
    }
}
