//! Text tokenizer for indexing and queries
//!
//! Pipeline: split on runs outside `[a-zA-Z0-9-]` → trim → lowercase
//!           → drop empties → remove stopwords → (optional) Porter2 stem
//!
//! Input that is already a list of terms skips the splitting step but still
//! goes through normalization, so every stored term is lowercase, never a
//! stopword, and stemmed exactly when the tokenizer stems.

use rust_stemmers::{Algorithm, Stemmer};
use std::fmt;

/// Closed list of common English words excluded from indexing and scoring.
pub const STOP_WORDS: &[&str] = &[
    "a", "able", "about", "across", "after", "all", "almost", "also", "am", "among", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "but", "by", "can", "cannot", "could",
    "dear", "did", "do", "does", "either", "else", "ever", "every", "for", "from", "get", "got",
    "had", "has", "have", "he", "her", "hers", "him", "his", "how", "however", "i", "if", "in",
    "into", "is", "it", "its", "just", "least", "let", "like", "likely", "may", "me", "might",
    "most", "must", "my", "neither", "no", "nor", "not", "of", "off", "often", "on", "only", "or",
    "other", "our", "own", "rather", "said", "say", "says", "she", "should", "since", "so",
    "some", "than", "that", "the", "their", "them", "then", "there", "these", "they", "this",
    "tis", "to", "too", "twas", "us", "wants", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "yet", "you", "your",
];

/// Check if a lowercased token is a stopword.
#[inline]
pub fn is_stop_word(token: &str) -> bool {
    // Sorted list, see test_stop_words_sorted
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Split raw text into lowercased words.
///
/// Separators are runs of characters outside `[a-zA-Z0-9-]`; hyphens stay
/// inside words ("food-truck"). Stopwords are NOT removed here.
///
/// # Example
///
/// ```
/// use nearby_search::tokenizer::split_words;
///
/// let words: Vec<String> = split_words("Hot-Dogs, Tacos & BBQ!").collect();
/// assert_eq!(words, vec!["hot-dogs", "tacos", "bbq"]);
/// ```
pub fn split_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

/// Input to the tokenizer: raw text or pre-split terms
#[derive(Debug, Clone, Copy)]
pub enum TextInput<'a> {
    /// Free text, split on non-word characters
    Text(&'a str),
    /// Already-split terms, passed through without re-splitting
    Terms(&'a [String]),
}

impl<'a> From<&'a str> for TextInput<'a> {
    fn from(text: &'a str) -> Self {
        TextInput::Text(text)
    }
}

impl<'a> From<&'a String> for TextInput<'a> {
    fn from(text: &'a String) -> Self {
        TextInput::Text(text.as_str())
    }
}

impl<'a> From<&'a [String]> for TextInput<'a> {
    fn from(terms: &'a [String]) -> Self {
        TextInput::Terms(terms)
    }
}

impl<'a> From<&'a Vec<String>> for TextInput<'a> {
    fn from(terms: &'a Vec<String>) -> Self {
        TextInput::Terms(terms.as_slice())
    }
}

/// Tokenizer with stopword removal and optional stemming
///
/// Stemming is a per-deployment switch: a corpus must be indexed and
/// queried with the same setting.
pub struct Tokenizer {
    stemmer: Option<Stemmer>,
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("stemming", &self.stems())
            .finish()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Tokenizer {
    /// Create a tokenizer; `stem` enables English (Porter2) stemming
    pub fn new(stem: bool) -> Self {
        Tokenizer {
            stemmer: stem.then(|| Stemmer::create(Algorithm::English)),
        }
    }

    /// Tokenizer that never stems
    pub fn unstemmed() -> Self {
        Self::new(false)
    }

    /// Whether terms are stemmed
    pub fn stems(&self) -> bool {
        self.stemmer.is_some()
    }

    /// Stem a lowercased word if stemming is enabled
    fn stem(&self, word: String) -> String {
        match &self.stemmer {
            Some(stemmer) => stemmer.stem(&word).into_owned(),
            None => word,
        }
    }

    /// Normalize a single lookup term the way stored terms were normalized.
    ///
    /// The term is not split and stopwords are not rejected, so a lookup
    /// for "the" simply misses.
    pub fn normalize(&self, term: &str) -> String {
        self.stem(term.trim().to_lowercase())
    }

    /// Tokenize text (or pre-split terms) into normalized terms, in order.
    ///
    /// Never fails: empty or non-word input yields an empty vector.
    ///
    /// # Example
    ///
    /// ```
    /// use nearby_search::Tokenizer;
    ///
    /// let tokens = Tokenizer::new(true).tokenize("The Cupcakes and Teas");
    /// assert_eq!(tokens, vec!["cupcak", "tea"]);
    /// ```
    pub fn tokenize<'a>(&self, input: impl Into<TextInput<'a>>) -> Vec<String> {
        match input.into() {
            TextInput::Text(text) => self.finish(split_words(text)),
            TextInput::Terms(terms) => self.finish(
                terms
                    .iter()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty()),
            ),
        }
    }

    fn finish(&self, words: impl Iterator<Item = String>) -> Vec<String> {
        words
            .filter(|w| !is_stop_word(w))
            .map(|w| self.stem(w))
            .collect()
    }
}
