//! Rewriting citation keys to the `authorYEARtitle` format.

use std::collections::HashSet;

use crate::{
    ast::Biblio,
    key::{entry_key, StopWords},
    Error,
};

use log::{trace, warn};

/// The outcome of rekeying a [`Biblio`].
#[derive(Debug, Default)]
pub struct HarmonizeReport {
    /// Entries that were left out because a field needed for the key was missing.
    pub skipped: Vec<Error>,
    /// Number of generated keys that were already taken and got a suffix.
    pub collisions: usize,
}

/// Replace the citation key of every entry with its generated key.
///
/// Entries lacking `author`, `title` or `year` are excluded from the returned [`Biblio`] and
/// reported. When two different entries generate the same key the later one, in [`Biblio`] order,
/// gets a `b`, `c`, ... suffix so that citation keys stay unique.
#[must_use]
pub fn harmonize(biblio: Biblio, stop_words: &StopWords) -> (Biblio, HarmonizeReport) {
    let mut report = HarmonizeReport::default();
    let mut used = HashSet::new();
    let mut harmonized = Biblio::default();

    let keyed = biblio.into_iter().map(|entry| {
        let key = entry_key(&entry, stop_words);
        key.map(|key| (entry, key))
    });

    for result in keyed {
        match result {
            Ok((mut entry, key)) => {
                let unique = unique_key(&key, &used);
                if unique != key {
                    warn!(
                        "Key '{key}' of entry '{}' is already used, using '{unique}' instead",
                        entry.cite()
                    );
                    report.collisions += 1;
                }
                trace!("'{}' -> '{unique}'", entry.cite());
                used.insert(unique.clone());
                entry.set_cite(unique);
                harmonized.insert(entry);
            }
            Err(err) => {
                warn!("Skipping entry: {err}");
                report.skipped.push(err);
            }
        }
    }

    (harmonized, report)
}

fn unique_key(key: &str, used: &HashSet<String>) -> String {
    if !used.contains(key) {
        return key.to_owned();
    }

    let mut letters = 'b'..='z';
    let mut n = 1;
    loop {
        let candidate = match letters.next() {
            Some(c) => format!("{key}{c}"),
            None => {
                n += 1;
                format!("{key}{n}")
            }
        };
        if !used.contains(&candidate) {
            return candidate;
        }
    }
}
