//! Selecting the entries that can be shown on the lab website.

use crate::{
    ast::Biblio,
    format::{container_title, REQUIRED_FIELDS},
    Error, ErrorKind,
};

use log::warn;

/// Entries left out of an export.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// One [`ErrorKind::MissingField`] error per skipped entry.
    pub skipped: Vec<Error>,
}

/// Split off the entries that lack a field the website needs.
///
/// Returns the exportable entries, in their original order, and the report of the skipped ones.
/// Author lists are not checked here, a malformed one still fails the export as a whole.
#[must_use]
pub fn exportable(biblio: Biblio) -> (Biblio, ExportReport) {
    let mut report = ExportReport::default();

    let kept = biblio
        .into_iter()
        .filter(|entry| {
            let checked = entry.require(&REQUIRED_FIELDS).and_then(|()| {
                container_title(entry).map(|_| ()).ok_or_else(|| {
                    Error::new(
                        ErrorKind::MissingField,
                        format!(
                            "'journal' or 'booktitle' not found for entry '{}'",
                            entry.cite()
                        ),
                    )
                })
            });

            match checked {
                Ok(()) => true,
                Err(err) => {
                    warn!("Not exported: {err}");
                    report.skipped.push(err);
                    false
                }
            }
        })
        .collect();

    (kept, report)
}
