//! Fetching BibTeX entries for a batch of DOIs.

use crate::{
    api::{self, Client, DoiSource},
    ast::Biblio,
    Error,
};

use log::{info, warn};

/// The outcome of every DOI of a batch, in input order.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// The DOI and the number of entries fetched for it, or why nothing was fetched.
    pub results: Vec<(String, Result<usize, Error>)>,
    /// Number of fetched entries dropped because an earlier DOI already gave the citation key.
    pub duplicates: usize,
}

impl FetchReport {
    /// Number of DOIs that resolved to at least one entry.
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_ok()).count()
    }

    /// The DOIs that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.results
            .iter()
            .filter_map(|(doi, r)| r.as_ref().err().map(|e| (doi.as_str(), e)))
    }
}

/// Fetch the entries of every DOI in `dois` from `source`.
///
/// A DOI that fails is reported and the batch carries on. Blank DOIs are ignored.
#[must_use]
pub fn fetch<C, I, S>(client: &C, dois: I, source: DoiSource) -> (Biblio, FetchReport)
where
    C: Client,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut fetched = Biblio::default();
    let mut report = FetchReport::default();

    for doi in dois {
        let doi = doi.as_ref().trim();
        if doi.is_empty() {
            continue;
        }

        match api::get_entries_by_doi(client, doi, source) {
            Ok(biblio) => {
                info!("{} entries fetched for '{doi}'", biblio.len());
                report.results.push((doi.to_owned(), Ok(biblio.len())));
                fetched.merge(biblio);
            }
            Err(err) => {
                warn!("Could not fetch '{doi}': {err}");
                report.results.push((doi.to_owned(), Err(err)));
            }
        }
    }

    report.duplicates = fetched.dedupe();
    (fetched, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::MockBibClient, ast::Entry};

    #[test]
    fn failing_doi_does_not_stop_the_batch() {
        let (biblio, report) = fetch(
            &MockBibClient,
            ["10.1000/one", "10.1000/fail", "10.1000/three"],
            DoiSource::CrossRef,
        );

        let cites = biblio.entries().iter().map(Entry::cite).collect::<Vec<_>>();
        assert_eq!(vec!["10_1000_one", "10_1000_three"], cites);
        assert_eq!(2, report.resolved());
        assert_eq!(
            vec!["10.1000/fail"],
            report.failures().map(|(doi, _)| doi).collect::<Vec<_>>()
        );
    }

    #[test]
    fn same_doi_twice_is_deduplicated() {
        let (biblio, report) = fetch(
            &MockBibClient,
            ["10.1000/one", " 10.1000/one ", ""],
            DoiSource::DoiOrg,
        );

        assert_eq!(1, biblio.len());
        assert_eq!(2, report.results.len());
        assert_eq!(1, report.duplicates);
    }
}
