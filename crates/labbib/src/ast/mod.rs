//! Structs for representing a bibliographic record and the record set it belongs to.
mod author;
mod biblio;
mod entry;

pub use author::{parse_authors, Author};
pub use biblio::Biblio;
pub use entry::Entry;

/// An entry field which is essentially a key value pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    /// Name of the entry field, always lower case.
    pub name: String,
    /// Value of the entry field.
    ///
    /// BibTeX protective braces inside the value are kept as written, e.g. `{Quicksort}: A Fast
    /// Sorting Scheme`.
    pub value: String,
}

impl Field {
    /// Create a new [`Field`], normalizing the name to lower case.
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: AsRef<str>,
        V: Into<String>,
    {
        Self {
            name: name.as_ref().to_lowercase(),
            value: value.into(),
        }
    }
}
