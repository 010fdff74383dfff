use std::{
    fs::{File, OpenOptions},
    io::{Read, Write},
    marker::PhantomData,
    path::{Path, PathBuf},
};

use labbib::{
    format::{Compose, Format, Parse, Reader, Writer},
    Error, ErrorKind,
};

use eyre::{eyre, Context};
use log::trace;

/// A [`Format`] stored at a path.
///
/// The file is only opened when it is read or written so an output file is never created or
/// truncated before its content is ready.
#[allow(clippy::module_name_repetitions)]
pub struct FormatFile<F: Format> {
    path: PathBuf,
    _format: PhantomData<F>,
}

impl<F: Format> FormatFile<F> {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            _format: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<F: Parse> Reader for FormatFile<F> {
    type Format = F;

    fn read(&mut self) -> Result<Self::Format, Error> {
        File::open(&self.path)
            .and_then(|mut file| read_file_to_string(&mut file))
            .map(F::new)
            .map_err(|e| {
                Error::wrap_with(
                    ErrorKind::IO,
                    e,
                    format!("Cannot read the contents of '{}'", self.path.display()),
                )
            })
    }
}

impl<F: Compose> Writer for FormatFile<F> {
    type Format = F;

    fn write(&mut self, format: F) -> Result<(), Error> {
        let bytes = format.raw().into_bytes();
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(&bytes))
            .map_err(|e| {
                Error::wrap_with(
                    ErrorKind::IO,
                    e,
                    format!("Cannot write {} to '{}'", F::name(), self.path.display()),
                )
            })
    }
}

/// Open an existing file as an input of format `F`.
pub fn open_input<F: Parse>(path: &Path) -> eyre::Result<FormatFile<F>> {
    if !path.is_file() {
        return Err(eyre!("{} does not exist!", path.display()));
    }
    trace!("'{}' will be read as a {} file", path.display(), F::name());
    Ok(FormatFile::new(path.to_owned()))
}

/// Reserve `path` as the output of format `F`.
///
/// An existing file is only accepted when `force` is set, it is overwritten on write.
pub fn open_output<F: Compose>(path: &Path, force: bool) -> eyre::Result<FormatFile<F>> {
    if path.exists() {
        if !force {
            return Err(eyre!(
                "{} exists, delete it first or use -f to overwrite.",
                path.display()
            ));
        }
        trace!("'{}' exists and will be overwritten", path.display());
    }
    Ok(FormatFile::new(path.to_owned()))
}

/// Read and parse every input, keeping the path of each as its name.
pub fn read_all<F: Parse>(inputs: Vec<FormatFile<F>>) -> eyre::Result<Vec<(String, labbib::ast::Biblio)>> {
    inputs
        .into_iter()
        .map(|mut file| {
            let name = file.path().display().to_string();
            file.read_ast()
                .wrap_err_with(|| format!("Failed to load '{name}'"))
                .map(|biblio| (name, biblio))
        })
        .collect()
}

fn read_file_to_string(file: &mut File) -> std::io::Result<String> {
    let mut content = String::new();
    file.read_to_string(&mut content).map(move |_| content)
}
