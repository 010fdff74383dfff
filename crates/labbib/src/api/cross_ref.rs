use reqwest::Url;
use serde::Deserialize;

use crate::{Error, ErrorKind};

use super::{doi_url, Client, BIBTEX_MEDIA_TYPE};

const WORKS_URL: &str = "https://api.crossref.org/works";

fn transform_url(doi: &str) -> Result<Url, Error> {
    doi_url(WORKS_URL, doi, &["transform", BIBTEX_MEDIA_TYPE])
}

fn search_url(query: &str) -> Result<Url, Error> {
    Url::parse_with_params(
        WORKS_URL,
        &[("query.bibliographic", query), ("rows", "1"), ("select", "DOI")],
    )
    .map_err(|e| Error::wrap(ErrorKind::Format, e))
}

pub(crate) fn get_bibtex_by_doi<C: Client>(client: &C, doi: &str) -> Result<String, Error> {
    client
        .get_text(transform_url(doi)?.as_str(), BIBTEX_MEDIA_TYPE)
        .map_err(|e| {
            Error::wrap_with(
                e.kind(),
                e,
                format!("CrossRef has no BibTeX for the DOI '{doi}'"),
            )
        })
}

#[derive(Deserialize)]
struct QueryResult {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    items: Vec<WorkStub>,
}

#[derive(Deserialize)]
struct WorkStub {
    #[serde(rename = "DOI")]
    doi: String,
}

/// Search CrossRef with `query` as free text and return the DOI of the best match.
pub(crate) fn search_doi<C: Client>(client: &C, query: &str) -> Result<String, Error> {
    let query_result: QueryResult = client.get_json(search_url(query)?.as_str())?;

    query_result
        .message
        .items
        .into_iter()
        .next()
        .map(|stub| stub.doi)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::NoValue,
                format!("No work found on CrossRef for '{query}'"),
            )
        })
}
