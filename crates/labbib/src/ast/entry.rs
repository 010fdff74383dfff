use super::Field;
use crate::{Error, ErrorKind};

/// An intermediate representation of a bibliography entry which is not tied to a specific end
/// format.
///
/// Fields are not schema-enforced. The well known fields have named accessors which return
/// [`None`] when the field is absent and [`Entry::require`] performs an explicit presence check
/// for the fields an operation depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    cite: String,
    kind: String,
    fields: Vec<Field>,
}

impl Entry {
    /// Create a new [`Entry`] with no fields.
    ///
    /// The `kind` is the entry type without the `@`, e.g. `article`, and is stored in lower case.
    pub fn new<C: Into<String>>(cite: C, kind: &str) -> Self {
        Self {
            cite: cite.into(),
            kind: kind.to_lowercase(),
            fields: Vec::new(),
        }
    }

    /// Builder style helper to add a field.
    #[must_use]
    pub fn with_field<V: Into<String>>(mut self, name: &str, value: V) -> Self {
        self.set_field(name, value);
        self
    }

    /// The citation key (`ID`) of the entry.
    #[must_use]
    pub fn cite(&self) -> &str {
        &self.cite
    }

    /// Replace the citation key of the entry.
    pub fn set_cite<C: Into<String>>(&mut self, cite: C) {
        self.cite = cite.into();
    }

    /// The entry type, e.g. `article`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The fields of the entry in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Insert a field or replace the value of a field with the same name.
    pub fn set_field<V: Into<String>>(&mut self, name: &str, value: V) {
        let field = Field::new(name, value);
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => existing.value = field.value,
            None => self.fields.push(field),
        }
    }

    /// Find the value of a field by name, the name is matched case-insensitively.
    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Whether a field named `name` is present, matched case-insensitively.
    #[must_use]
    pub fn contains_field(&self, name: &str) -> bool {
        self.find_field(name).is_some()
    }

    /// The `author` field.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.find_field("author")
    }

    /// The `title` field.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.find_field("title")
    }

    /// The `year` field.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        self.find_field("year")
    }

    /// The `journal` field.
    #[must_use]
    pub fn journal(&self) -> Option<&str> {
        self.find_field("journal")
    }

    /// The `booktitle` field.
    #[must_use]
    pub fn book_title(&self) -> Option<&str> {
        self.find_field("booktitle")
    }

    /// The `doi` field.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.find_field("doi")
    }

    /// The `abstract` field.
    #[must_use]
    pub fn abstract_text(&self) -> Option<&str> {
        self.find_field("abstract")
    }

    /// Checks that every field in `names` is present.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::MissingField`] error naming the first missing field and the
    /// citation key of this entry.
    pub fn require(&self, names: &[&str]) -> Result<(), Error> {
        match names.iter().find(|name| !self.contains_field(name)) {
            Some(missing) => Err(Error::new(
                ErrorKind::MissingField,
                format!("'{}' not found for entry '{}'", missing, self.cite),
            )),
            None => Ok(()),
        }
    }
}
