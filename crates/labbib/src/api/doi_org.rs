use crate::Error;

use super::{doi_url, Client, BIBTEX_MEDIA_TYPE};

/// Ask the doi.org resolver for BibTeX through content negotiation.
pub(crate) fn get_bibtex_by_doi<C: Client>(client: &C, doi: &str) -> Result<String, Error> {
    let url = doi_url("https://doi.org/", doi, &[])?;
    client
        .get_text(url.as_str(), BIBTEX_MEDIA_TYPE)
        .map_err(|e| Error::wrap_with(e.kind(), e, format!("Could not resolve the DOI '{doi}'")))
}
