use std::{collections::HashSet, fs, path::Path};

use crate::{Error, ErrorKind};

/// The English stop word corpus of NLTK, which the lab's citation keys were first generated with.
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// An immutable set of lower case stop words.
///
/// Built once at startup and passed by reference to [`super::generate_key`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopWords(HashSet<String>);

impl StopWords {
    /// The built-in English stop words.
    #[must_use]
    pub fn english() -> Self {
        ENGLISH.iter().map(|w| (*w).to_owned()).collect()
    }

    /// Parse a newline separated word list, blank lines and lines starting with `#` are ignored.
    #[must_use]
    pub fn from_list(list: &str) -> Self {
        list.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect()
    }

    /// Read a word list from a file, see [`StopWords::from_list`].
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::IO`] error when the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        fs::read_to_string(path)
            .map(|list| Self::from_list(&list))
            .map_err(|e| {
                Error::wrap_with(
                    ErrorKind::IO,
                    e,
                    format!("Cannot read stop words from '{}'", path.display()),
                )
            })
    }

    /// Checks whether `word` is a stop word, ignoring case.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(&word.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

impl FromIterator<String> for StopWords {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().map(|w| w.to_lowercase()).collect())
    }
}
