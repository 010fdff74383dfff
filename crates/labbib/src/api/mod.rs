//! Best-effort lookups of bibliographic entries from web APIs.
//!
//! Every lookup is a single blocking request, nothing is retried.

use reqwest::Url;
use serde::de::DeserializeOwned;

pub(crate) mod cross_ref;
pub(crate) mod doi_org;

use crate::{
    ast::Biblio,
    format::{BibTex, Format, Parse},
    Error, ErrorKind,
};

/// Media type used to ask for BibTeX from content negotiating endpoints.
pub(crate) const BIBTEX_MEDIA_TYPE: &str = "application/x-bibtex";

/// `base` followed by the `/`-separated parts of `doi` and then `suffix`, every path segment
/// percent-encoded.
pub(crate) fn doi_url(base: &str, doi: &str, suffix: &[&str]) -> Result<Url, Error> {
    let mut url = Url::parse(base).map_err(|e| Error::wrap(ErrorKind::Format, e))?;
    url.path_segments_mut()
        .map_err(|()| Error::new(ErrorKind::Format, format!("'{base}' cannot take a path")))?
        .pop_if_empty()
        .extend(doi.split('/'))
        .extend(suffix);
    Ok(url)
}

/// A minimal blocking HTTP client.
pub trait Client {
    /// GET the `url` as text, sending `accept` as the `Accept` header.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] on network failure, on a non-success status, or when the body is empty.
    fn get_text(&self, url: &str, accept: &str) -> Result<String, Error>;

    /// GET the `url` and deserialize the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] on network failure, on a non-success status, or when the body cannot be
    /// deserialized into `T`.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_text(&self, url: &str, accept: &str) -> Result<String, Error> {
        let resp = self
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;
        let text = resp
            .text()
            .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;

        if text.trim().is_empty() {
            Err(Error::new(ErrorKind::NoValue, "Response text is empty"))
        } else {
            Ok(text)
        }
    }

    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }
}

/// Where a DOI is resolved to BibTeX.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DoiSource {
    /// The CrossRef BibTeX transform of the work.
    #[default]
    CrossRef,
    /// Content negotiation on the doi.org resolver.
    DoiOrg,
    /// A CrossRef bibliographic search with the input as query text, the best hit is used.
    ///
    /// This accepts inputs which are not exact DOIs, e.g. a title.
    Search,
}

/// Resolve a single DOI to the entries of its BibTeX.
///
/// # Errors
///
/// Returns an [`Err`] when the request fails, when the response is not valid BibTeX, or when the
/// BibTeX has no entry.
pub(crate) fn get_entries_by_doi<C: Client>(
    client: &C,
    doi: &str,
    source: DoiSource,
) -> Result<Biblio, Error> {
    let bibtex = match source {
        DoiSource::CrossRef => cross_ref::get_bibtex_by_doi(client, doi)?,
        DoiSource::DoiOrg => doi_org::get_bibtex_by_doi(client, doi)?,
        DoiSource::Search => {
            let found = cross_ref::search_doi(client, doi)?;
            log::info!("'{doi}' matched the DOI '{found}'");
            cross_ref::get_bibtex_by_doi(client, &found)?
        }
    };

    let biblio = BibTex::new(bibtex).parse()?;
    if biblio.is_empty() {
        Err(Error::new(
            ErrorKind::NoValue,
            format!("No BibTeX entry returned for '{doi}'"),
        ))
    } else {
        Ok(biblio)
    }
}

#[cfg(test)]
pub(crate) use test::{MockBibClient, MockJsonClient, NetworkErrorProducer, Producer};

#[cfg(test)]
mod test {
    use super::*;

    /// Answers with a BibTeX entry built from the requested url, urls containing `fail` produce a
    /// network error.
    #[derive(Default)]
    pub(crate) struct MockBibClient;

    impl Client for MockBibClient {
        fn get_text(&self, url: &str, _: &str) -> Result<String, Error> {
            if url.contains("fail") {
                return Err(Error::new(ErrorKind::IO, format!("Network error for {url}")));
            }
            let doi = url
                .find("10.")
                .map(|start| &url[start..])
                .and_then(|doi| doi.split("/transform").next())
                .unwrap_or("unknown");
            let cite = doi.replace(['.', '/'], "_");
            Ok(format!(
                "@article{{{cite},\n  author = {{Smith, John}},\n  title = {{Work {cite}}},\n  year = {{2020}},\n  doi = {{{doi}}}\n}}"
            ))
        }

        fn get_json<T>(&self, _: &str) -> Result<T, Error>
        where
            T: DeserializeOwned,
        {
            unimplemented!("Not required")
        }
    }

    pub(crate) trait Producer<T>
    where
        Self: Default,
    {
        fn produce() -> Result<T, Error>;
    }

    #[derive(Default)]
    pub(crate) struct NetworkErrorProducer;

    impl Producer<String> for NetworkErrorProducer {
        fn produce() -> Result<String, Error> {
            Err(Error::new(ErrorKind::IO, "Network error"))
        }
    }

    #[derive(Default)]
    pub(crate) struct MockJsonClient<P: Producer<String>>(std::marker::PhantomData<P>);

    impl<P: Producer<String>> Client for MockJsonClient<P> {
        fn get_text(&self, url: &str, accept: &str) -> Result<String, Error> {
            MockBibClient.get_text(url, accept)
        }

        fn get_json<T>(&self, _: &str) -> Result<T, Error>
        where
            T: DeserializeOwned,
        {
            P::produce().and_then(|s| {
                serde_json::from_str(&s).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
            })
        }
    }

    #[test]
    fn entries_by_doi_from_each_source() {
        for source in [DoiSource::CrossRef, DoiSource::DoiOrg] {
            let biblio = get_entries_by_doi(&MockBibClient, "10.1000/xyz", source).unwrap();

            assert_eq!(1, biblio.len());
            assert_eq!(Some("10.1000/xyz"), biblio.entries()[0].doi());
        }
    }

    #[test]
    fn network_error_is_returned() {
        let err = get_entries_by_doi(&MockBibClient, "10.1000/fail", DoiSource::CrossRef)
            .unwrap_err();

        assert_eq!(ErrorKind::IO, err.kind());
    }

    #[derive(Default)]
    struct NotBibTexClient;

    impl Client for NotBibTexClient {
        fn get_text(&self, _: &str, _: &str) -> Result<String, Error> {
            Ok("<html>Resource not found.</html>".to_owned())
        }

        fn get_json<T>(&self, _: &str) -> Result<T, Error>
        where
            T: DeserializeOwned,
        {
            unimplemented!("Not required")
        }
    }

    #[test]
    fn response_without_entries_is_no_value() {
        let err = get_entries_by_doi(&NotBibTexClient, "10.1000/xyz", DoiSource::DoiOrg)
            .unwrap_err();

        assert_eq!(ErrorKind::NoValue, err.kind());
    }
}
