use serde::Serialize;

use crate::{Error, ErrorKind};

/// A single author split into family and given name, serialized in the shape a CSL-JSON renderer
/// expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Author {
    /// Everything before the first `, `.
    pub family: String,
    /// Everything after the first `, `.
    pub given: String,
}

/// Placeholder BibTeX uses for a truncated author list.
const OTHERS: &str = "others";

/// Parse a BibTeX author list written as `Last, First and Last, First`.
///
/// The `others` token is dropped and whitespace runs (including the line breaks of wrapped
/// values) are collapsed before splitting.
///
/// # Errors
///
/// Returns an [`ErrorKind::Format`] error when an author is not written as `Last, First`.
pub fn parse_authors(authors: &str) -> Result<Vec<Author>, Error> {
    let authors = authors.split_whitespace().collect::<Vec<_>>().join(" ");

    authors
        .split(" and ")
        .filter(|author| *author != OTHERS)
        .map(|author| {
            author
                .split_once(", ")
                .map(|(family, given)| Author {
                    family: family.to_owned(),
                    given: given.to_owned(),
                })
                .ok_or_else(|| {
                    Error::new(
                        ErrorKind::Format,
                        format!("Author '{author}' is not written as 'Last, First'"),
                    )
                })
        })
        .collect()
}
