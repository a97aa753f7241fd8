use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// `\x1c`-`\x1f` (file/group/record/unit separators) count as word breaks even
// though Unicode `White_Space` leaves them out.
static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s\x1c-\x1f]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s\x1c-\x1f]+").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Features {
    pub original_text: String,
    pub normalized_text: String,
    pub word_count: usize,
}

/// Normalize text: lowercase, drop everything but `[a-z0-9]` and whitespace, collapse spaces
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_ALNUM.replace_all(&lowered, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Count words in already-normalized text, which separates words by single spaces.
pub fn count_words(normalized: &str) -> usize {
    normalized.split(' ').filter(|word| !word.is_empty()).count()
}

pub fn extract_features(text: &str) -> Features {
    let normalized_text = normalize(text);
    let word_count = count_words(&normalized_text);

    Features {
        original_text: text.to_string(),
        normalized_text,
        word_count,
    }
}
