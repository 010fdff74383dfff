use std::path::{Path, PathBuf};

use crate::file::{self, open_input, open_output};

use labbib::{
    export::exportable,
    format::{BibTex, Writer, WebsiteJson},
    harmonize::harmonize,
    key::StopWords,
    merge::merge,
    DoiSource,
};

use clap::{ArgEnum, Subcommand};
use eyre::{eyre, Context};
use log::{info, trace, warn};

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Merge BibTeX files into one, keeping the first entry found for each citation key
    ///
    /// Files are read in the order given and entries in the order of their file.
    #[clap(arg_required_else_help = true)]
    Merge {
        /// The BibTeX files to merge
        #[clap(required = true, parse(from_os_str))]
        inputs: Vec<PathBuf>,
        /// The merged BibTeX file
        #[clap(parse(from_os_str))]
        output: PathBuf,
        /// Overwrite the output file when it exists
        #[clap(short, long = "force-overwrite")]
        force: bool,
    },

    /// Rewrite every citation key as `authorYEARtitle`
    ///
    /// The inputs are merged first. Entries without an author, title or year cannot be given a
    /// key and are left out of the output.
    #[clap(arg_required_else_help = true)]
    Harmonize {
        /// The BibTeX files to rekey
        #[clap(required = true, parse(from_os_str))]
        inputs: Vec<PathBuf>,
        /// The rekeyed BibTeX file
        #[clap(parse(from_os_str))]
        output: PathBuf,
        /// Overwrite the output file when it exists
        #[clap(short, long = "force-overwrite")]
        force: bool,
        /// A file with one stop word per line, replacing the built-in English list
        #[clap(long, parse(from_os_str))]
        stop_words: Option<PathBuf>,
    },

    /// Export a BibTeX file to the JSON publication list of the lab website
    ///
    /// Entries without an author, title, year, journal or booktitle are left out. Nothing is
    /// written if an author list is not written as `Last, First and Last, First`.
    #[clap(arg_required_else_help = true)]
    Export {
        /// The BibTeX file to export
        #[clap(parse(from_os_str))]
        input: PathBuf,
        /// The JSON file for the website
        #[clap(parse(from_os_str))]
        output: PathBuf,
        /// Overwrite the output file when it exists
        #[clap(short, long = "force-overwrite")]
        force: bool,
    },

    /// Fetch the BibTeX entries of DOIs into a new file
    ///
    /// A DOI that cannot be fetched is reported and skipped.
    #[clap(arg_required_else_help = true)]
    Fetch {
        /// The DOIs to fetch
        #[clap(required = true)]
        dois: Vec<String>,
        /// The BibTeX file for the fetched entries
        #[clap(parse(from_os_str))]
        output: PathBuf,
        /// Overwrite the output file when it exists
        #[clap(short, long = "force-overwrite")]
        force: bool,
        /// Where the DOIs are resolved
        #[clap(long, arg_enum, default_value = "crossref")]
        source: Source,
    },
}

#[derive(Clone, Copy, Debug, ArgEnum)]
pub enum Source {
    /// The CrossRef BibTeX transform
    Crossref,
    /// Content negotiation on doi.org
    Doi,
    /// CrossRef bibliographic search, for inputs which are not exact DOIs
    Search,
}

impl From<Source> for DoiSource {
    fn from(source: Source) -> Self {
        match source {
            Source::Crossref => Self::CrossRef,
            Source::Doi => Self::DoiOrg,
            Source::Search => Self::Search,
        }
    }
}

impl Commands {
    pub fn execute(self) -> eyre::Result<String> {
        match self {
            Commands::Merge {
                inputs,
                output,
                force,
            } => {
                let inputs = open_inputs(&inputs)?;
                let mut output = open_output::<BibTex>(&output, force)?;

                let (merged, report) = merge(file::read_all(inputs)?);
                info!("{} duplicates removed in total", report.duplicates());

                output.write_ast(&merged)?;
                Ok(format!("Final file has {} entries.", merged.len()))
            }
            Commands::Harmonize {
                inputs,
                output,
                force,
                stop_words,
            } => {
                let inputs = open_inputs(&inputs)?;
                let mut output = open_output::<BibTex>(&output, force)?;
                let stop_words = load_stop_words(stop_words.as_deref())?;

                let (merged, _) = merge(file::read_all(inputs)?);
                let (harmonized, report) = harmonize(merged, &stop_words);
                if !report.skipped.is_empty() {
                    warn!(
                        "{} entries left out because they cannot be given a key",
                        report.skipped.len()
                    );
                }

                output.write_ast(&harmonized)?;
                Ok(format!("{} entries in total.", harmonized.len()))
            }
            Commands::Export {
                input,
                output,
                force,
            } => {
                let input = open_input::<BibTex>(&input)?;
                let mut output = open_output::<WebsiteJson>(&output, force)?;

                let (_, biblio) = file::read_all(vec![input])?
                    .pop()
                    .ok_or_else(|| eyre!("No input was read"))?;
                let (exported, report) = exportable(biblio);
                if !report.skipped.is_empty() {
                    warn!(
                        "{} entries left out of the export",
                        report.skipped.len()
                    );
                }

                output
                    .write_ast(&exported)
                    .wrap_err_with(|| format!("Nothing written to '{}'", output.path().display()))?;
                Ok(format!("{} entries in total.", exported.len()))
            }
            Commands::Fetch {
                dois,
                output,
                force,
                source,
            } => {
                let mut output = open_output::<BibTex>(&output, force)?;

                trace!("Fetching {} DOIs from {source:?}", dois.len());
                let (fetched, report) = labbib::fetch_by_dois(&dois, source.into());
                if report.resolved() == 0 {
                    return Err(eyre!("None of the {} DOIs could be fetched", dois.len()));
                }
                for (doi, err) in report.failures() {
                    warn!("Skipped '{doi}': {err}");
                }

                output.write_ast(&fetched)?;
                Ok(format!(
                    "{} of {} DOIs fetched, final file has {} entries.",
                    report.resolved(),
                    report.results.len(),
                    fetched.len()
                ))
            }
        }
    }
}

fn open_inputs(paths: &[PathBuf]) -> eyre::Result<Vec<file::FormatFile<BibTex>>> {
    paths.iter().map(|path| open_input(path)).collect()
}

fn load_stop_words(path: Option<&Path>) -> eyre::Result<StopWords> {
    match path {
        Some(path) => {
            let stop_words = StopWords::from_file(path)?;
            info!("{} stop words read from '{}'", stop_words.len(), path.display());
            Ok(stop_words)
        }
        None => Ok(StopWords::english()),
    }
}
