//! Pure text matching utilities used by the scorer and post-processor.
//!
//! All functions are purely syntactic byte/substring checks. Case
//! normalization is the caller's responsibility.

/// Check whether `text` is exactly a `YYYY.MM.DD` date title.
///
/// True iff the text is exactly 10 bytes, positions 4 and 7 are `.`, and
/// the three digit groups (4, 2, 2) are all ASCII digits. No calendar or
/// locale awareness; `2024.99.99` is still a date title.
pub fn is_date_title(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    bytes[4] == b'.'
        && bytes[7] == b'.'
        && is_digits(&bytes[0..4])
        && is_digits(&bytes[5..7])
        && is_digits(&bytes[8..10])
}

fn is_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

/// Check whether `haystack` contains every word in the given order.
///
/// Words must appear left to right without overlapping, but need not be
/// contiguous: a cursor advances past each match before searching for the
/// next word.
pub fn contains_ordered_words<S: AsRef<str>>(haystack: &str, words: &[S]) -> bool {
    let mut cursor = 0;
    for word in words {
        let word = word.as_ref();
        match haystack[cursor..].find(word) {
            Some(pos) => cursor += pos + word.len(),
            None => return false,
        }
    }
    true
}

/// Check whether `haystack` contains every word as a substring, any order.
pub fn contains_all_words<S: AsRef<str>>(haystack: &str, words: &[S]) -> bool {
    words.iter().all(|word| haystack.contains(word.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_date_title_matches_exact_pattern() {
        assert!(is_date_title("2024.01.05"));
        assert!(is_date_title("1999.12.31"));
    }

    #[test]
    fn test_is_date_title_rejects_wrong_separator() {
        assert!(!is_date_title("2024-01-05"));
    }

    #[test]
    fn test_is_date_title_rejects_wrong_length() {
        assert!(!is_date_title("24.1.5"));
        assert!(!is_date_title("2024.01.055"));
        assert!(!is_date_title(""));
    }

    #[test]
    fn test_is_date_title_rejects_non_digits() {
        assert!(!is_date_title("20x4.01.05"));
        assert!(!is_date_title("2024.ab.05"));
    }

    #[test]
    fn test_is_date_title_rejects_embedded_date() {
        assert!(!is_date_title("2024.01.05 standup"));
    }

    #[test]
    fn test_is_date_title_multibyte_is_safe() {
        // 10 chars but more than 10 bytes; must not panic or match
        assert!(!is_date_title("２024.01.05"));
    }

    #[test]
    fn test_contains_ordered_words_in_order() {
        assert!(contains_ordered_words("my todo list", &["todo", "list"]));
    }

    #[test]
    fn test_contains_ordered_words_out_of_order() {
        assert!(!contains_ordered_words("list todo", &["todo", "list"]));
    }

    #[test]
    fn test_contains_ordered_words_does_not_overlap() {
        // Second "to" must be found after the first match ends
        assert!(contains_ordered_words("toto", &["to", "to"]));
        assert!(!contains_ordered_words("tot", &["to", "to"]));
    }

    #[test]
    fn test_contains_ordered_words_empty_list() {
        assert!(contains_ordered_words("anything", &[] as &[&str]));
    }

    #[test]
    fn test_contains_all_words_any_order() {
        assert!(contains_all_words("list todo", &["todo", "list"]));
    }

    #[test]
    fn test_contains_all_words_missing_word() {
        assert!(!contains_all_words("my todo", &["todo", "list"]));
    }
}
