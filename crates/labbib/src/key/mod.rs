//! Citation key generation in the `authorYEARtitle` format, e.g. `rheault_influence_2022` becomes
//! `rheault2022influence`.

mod stop_words;

pub use stop_words::StopWords;

use crate::{ast::Entry, Error};

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Fields an entry needs for a citation key to be generated.
pub const REQUIRED_FIELDS: [&str; 3] = ["author", "title", "year"];

/// Generate the citation key of an [`Entry`].
///
/// # Errors
///
/// Returns an [`crate::ErrorKind::MissingField`] error when the entry lacks one of
/// [`REQUIRED_FIELDS`].
pub fn entry_key(entry: &Entry, stop_words: &StopWords) -> Result<String, Error> {
    entry.require(&REQUIRED_FIELDS)?;

    Ok(generate_key(
        entry.author().unwrap_or_default(),
        entry.year().unwrap_or_default(),
        entry.title().unwrap_or_default(),
        stop_words,
    ))
}

/// Generate a citation key from the first author's surname, the year, and the first title word
/// that is not a stop word.
///
/// Every part is lower case and cut at its first hyphen, `year` is used verbatim. Spaces in the
/// surname are dropped and diacritics are removed from the result.
#[must_use]
pub fn generate_key(author: &str, year: &str, title: &str, stop_words: &StopWords) -> String {
    let surname = author.split(", ").next().unwrap_or_default();
    let surname = strip_braces(surname)
        .to_lowercase()
        .split_whitespace()
        .collect::<String>();
    let surname = before_hyphen(&surname).to_owned();

    let title_word = title_word(title, stop_words);
    let title_word = before_hyphen(&strip_braces(title_word).to_lowercase()).to_owned();

    strip_diacritics(&format!("{surname}{year}{title_word}"))
}

/// The first title token which is not a stop word, falling back to the first token.
fn title_word<'t>(title: &'t str, stop_words: &StopWords) -> &'t str {
    title
        .split_whitespace()
        .find(|word| !stop_words.contains(word))
        .or_else(|| title.split_whitespace().next())
        .unwrap_or_default()
}

fn strip_braces(s: &str) -> String {
    s.replace(['{', '}'], "")
}

fn before_hyphen(s: &str) -> &str {
    s.split('-').next().unwrap_or_default()
}

fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
