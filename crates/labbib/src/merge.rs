//! Merging several bibliographies into one with duplicate citation keys removed.
//!
//! Duplicates are removed twice: inside every source and then across the concatenation of all
//! sources. The first entry seen for a citation key is kept, where sources are seen in the order
//! given and entries in the order of their source.

use crate::ast::Biblio;

use log::info;

/// The result of deduplicating a single source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceReport {
    /// Name of the source, usually the file path.
    pub source: String,
    /// Number of entries loaded from the source.
    pub loaded: usize,
    /// Number of entries removed as duplicates inside the source.
    pub duplicates: usize,
}

/// Counts of a merge, per source and across sources.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// One report per source, in merge order.
    pub sources: Vec<SourceReport>,
    /// Number of entries removed because another source already had the citation key.
    pub cross_source_duplicates: usize,
    /// Number of entries in the merged bibliography.
    pub merged: usize,
}

impl MergeReport {
    /// Total number of entries loaded from all sources.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.sources.iter().map(|s| s.loaded).sum()
    }

    /// Total number of entries removed as duplicates.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.sources.iter().map(|s| s.duplicates).sum::<usize>() + self.cross_source_duplicates
    }
}

/// Merge named bibliographies into one, removing duplicate citation keys.
///
/// The merged [`Biblio`] has exactly one entry per distinct citation key of the sources.
#[must_use]
pub fn merge<I, S>(sources: I) -> (Biblio, MergeReport)
where
    I: IntoIterator<Item = (S, Biblio)>,
    S: Into<String>,
{
    let mut merged = Biblio::default();
    let mut report = MergeReport::default();

    for (i, (source, mut biblio)) in sources.into_iter().enumerate() {
        let source = source.into();
        let loaded = biblio.len();
        info!("{loaded} entries in file #{i} ({source})");

        let duplicates = biblio.dedupe();
        info!("\t{duplicates} duplicates in this file.");

        report.sources.push(SourceReport {
            source,
            loaded,
            duplicates,
        });
        merged.merge(biblio);
    }

    report.cross_source_duplicates = merged.dedupe();
    report.merged = merged.len();
    info!(
        "{} duplicates across files",
        report.cross_source_duplicates
    );

    (merged, report)
}
