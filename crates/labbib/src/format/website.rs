use crate::{
    ast::{parse_authors, Author, Biblio, Entry},
    Error, ErrorKind,
};

use super::{Compose, Format};

use serde::Serialize;

/// A type wrapper around [`String`] to represent the JSON publication list read by the lab
/// website.
#[derive(Debug)]
pub struct WebsiteJson(String);

/// Fields an entry needs before it can be exported, the container title is checked separately
/// as it can come from `journal` or `booktitle`.
pub const REQUIRED_FIELDS: [&str; 3] = ["author", "title", "year"];

/// The website renders every publication under the same month.
const ISSUED_MONTH: u8 = 2;

/// A single publication of the website JSON.
///
/// Fields are declared in sorted order so that the JSON object keys are written sorted.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct WebsiteEntry {
    /// Always empty, filled in by hand for the website.
    #[serde(rename = "DOI")]
    pub doi: String,
    /// Always empty, filled in by hand for the website.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Authors in entry order, `others` dropped.
    pub author: Vec<Author>,
    /// The journal, or the booktitle for proceedings.
    #[serde(rename = "container-title")]
    pub container_title: String,
    /// `<cite>.png`
    pub image: String,
    /// Year of the entry with a fixed month.
    pub issued: Issued,
    /// Title as written in the entry, protective braces included.
    pub title: String,
}

/// Publication date as `[[year, month]]`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Issued {
    /// The year is kept as written in the entry.
    #[serde(rename = "date-parts")]
    pub date_parts: Vec<(String, u8)>,
}

impl WebsiteEntry {
    /// Convert an [`Entry`] into a [`WebsiteEntry`].
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::MissingField`] error when a required field or the container title
    /// is absent, and an [`ErrorKind::Format`] error when the author list is malformed.
    pub fn from_entry(entry: &Entry) -> Result<Self, Error> {
        entry.require(&REQUIRED_FIELDS)?;
        let container_title = container_title(entry).ok_or_else(|| {
            Error::new(
                ErrorKind::MissingField,
                format!(
                    "'journal' or 'booktitle' not found for entry '{}'",
                    entry.cite()
                ),
            )
        })?;

        let author = parse_authors(entry.author().unwrap_or_default()).map_err(|e| {
            Error::wrap_with(
                ErrorKind::Format,
                e,
                format!("Malformed author field in entry '{}'", entry.cite()),
            )
        })?;

        Ok(Self {
            doi: String::new(),
            abstract_text: String::new(),
            author,
            container_title: container_title.to_owned(),
            image: format!("{}.png", entry.cite()),
            issued: Issued {
                date_parts: vec![(entry.year().unwrap_or_default().to_owned(), ISSUED_MONTH)],
            },
            title: entry.title().unwrap_or_default().to_owned(),
        })
    }
}

/// The title of the journal or proceedings the entry was published in.
#[must_use]
pub fn container_title(entry: &Entry) -> Option<&str> {
    entry.journal().or_else(|| entry.book_title())
}

impl Format for WebsiteJson {
    fn new(val: String) -> Self {
        Self(val)
    }

    fn raw(self) -> String {
        self.0
    }

    fn name() -> &'static str {
        "website JSON"
    }
}

impl Compose for WebsiteJson {
    /// Composes a JSON array with one object per entry, keys sorted and indented by one space.
    ///
    /// Fails without output on the first entry that cannot be converted.
    fn compose(biblio: &Biblio) -> Result<Self, Error> {
        let entries = biblio
            .entries()
            .iter()
            .map(WebsiteEntry::from_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        entries
            .serialize(&mut ser)
            .map_err(|e| Error::wrap(ErrorKind::Format, e))?;

        String::from_utf8(buf)
            .map(Self)
            .map_err(|e| Error::wrap(ErrorKind::Format, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Entry {
        Entry::new("rheault2022influence", "article")
            .with_field("author", "Rhéault, Anne-Marie and Descoteaux, Maxime and others")
            .with_field("title", "The Influence of Streamline Density")
            .with_field("journal", "NeuroImage")
            .with_field("year", "2022")
            .with_field("doi", "10.1016/j.neuroimage.2022.119000")
    }

    #[test]
    fn entry_is_converted_with_empty_abstract_and_doi() {
        let web = WebsiteEntry::from_entry(&article()).unwrap();

        assert_eq!("rheault2022influence.png", web.image);
        assert_eq!("NeuroImage", web.container_title);
        assert_eq!("", web.doi);
        assert_eq!("", web.abstract_text);
        assert_eq!(vec![("2022".to_owned(), 2)], web.issued.date_parts);
        assert_eq!(2, web.author.len());
    }

    #[test]
    fn booktitle_is_used_without_journal() {
        let entry = Entry::new("doe2021tracking", "inproceedings")
            .with_field("author", "Doe, Jane")
            .with_field("title", "Tracking")
            .with_field("booktitle", "MICCAI")
            .with_field("year", "2021");

        let web = WebsiteEntry::from_entry(&entry).unwrap();

        assert_eq!("MICCAI", web.container_title);
    }

    #[test]
    fn missing_container_title_is_a_missing_field_error() {
        let entry = Entry::new("doe2021tracking", "misc")
            .with_field("author", "Doe, Jane")
            .with_field("title", "Tracking")
            .with_field("year", "2021");

        let err = WebsiteEntry::from_entry(&entry).unwrap_err();

        assert_eq!(ErrorKind::MissingField, err.kind());
    }

    #[test]
    fn compose_writes_sorted_keys_with_single_space_indent() {
        let biblio = Biblio::new(vec![Entry::new("smith2020deep", "article")
            .with_field("author", "Smith, John")
            .with_field("title", "Deep")
            .with_field("journal", "J")
            .with_field("year", "2020")]);

        let json = WebsiteJson::compose(&biblio).unwrap().raw();

        let expected = r#"[
 {
  "DOI": "",
  "abstract": "",
  "author": [
   {
    "family": "Smith",
    "given": "John"
   }
  ],
  "container-title": "J",
  "image": "smith2020deep.png",
  "issued": {
   "date-parts": [
    [
     "2020",
     2
    ]
   ]
  },
  "title": "Deep"
 }
]"#;
        assert_eq!(expected, json);
    }

    #[test]
    fn malformed_author_fails_the_whole_compose() {
        let biblio = Biblio::new(vec![
            article(),
            Entry::new("bad", "article")
                .with_field("author", "Jane Doe")
                .with_field("title", "T")
                .with_field("journal", "J")
                .with_field("year", "2020"),
        ]);

        let err = WebsiteJson::compose(&biblio).unwrap_err();

        assert_eq!(ErrorKind::Format, err.kind());
        assert!(err.to_string().contains("'bad'"));
    }
}
