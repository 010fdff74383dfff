//! Contains the [`Format`] traits, their [`BibTex`] and [`WebsiteJson`] implementations, and the
//! [`Reader`] and [`Writer`] traits for moving formats in and out of a source.

mod bibtex;
mod website;

use crate::{ast::Biblio, Error};
pub use bibtex::BibTex;
pub use website::{container_title, Issued, WebsiteEntry, WebsiteJson, REQUIRED_FIELDS};

/// A textual representation of a bibliography.
///
/// Formats are promises at the type level about what a [`String`] (or similar) represents.
pub trait Format {
    /// Construct a new type using a [`String`] input.
    ///
    /// This function should not panic or fail as creating a [`Format`] is a type promise about
    /// what the [`String`] represents.
    fn new(val: String) -> Self;

    /// The current [`Format`] in a raw [`String`].
    fn raw(self) -> String;

    /// The name of the [`Format`], used in log and error messages.
    fn name() -> &'static str;
}

/// A [`Format`] that can be parsed into a [`Biblio`].
pub trait Parse: Format {
    /// Parses this [`Format`] into a [`Biblio`].
    ///
    /// # Errors
    ///
    /// Will return [`Err`] if it's not possible to parse this [`Format`] to [`Biblio`].
    fn parse(self) -> Result<Biblio, Error>;
}

/// A [`Format`] that can be composed from a [`Biblio`].
pub trait Compose: Format + Sized {
    /// Composes a [`Biblio`] to this [`Format`].
    ///
    /// # Errors
    ///
    /// Will return [`Err`] when an entry lacks something this [`Format`] needs to represent it.
    fn compose(biblio: &Biblio) -> Result<Self, Error>;
}

/// A trait for objects which are [`Format`]-oriented sinks.
///
/// Writers have a default implemention of [`Writer::write_ast`] for [`Biblio`] using the
/// [`Writer::write`] method.
pub trait Writer {
    /// The format associated with the writer.
    type Format: Compose;

    /// Write a format into this writer.
    ///
    /// # Errors
    ///
    /// The call to write should only return an [`Err`] when writing to the writer cannot be
    /// completed.
    fn write(&mut self, format: Self::Format) -> Result<(), Error>;

    /// Write a [`Biblio`] into this writer using [`Compose::compose`] from the
    /// [`Writer::Format`] associated type.
    ///
    /// Nothing is written when composing fails.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] when composing fails or writing to the writer cannot be completed.
    fn write_ast(&mut self, ast: &Biblio) -> Result<(), Error> {
        let format = Self::Format::compose(ast)?;
        self.write(format)
    }
}

/// The [`Reader`] trait allows for reading a [`Format`] from a source.
///
/// Readers have a default implemention of [`Reader::read_ast`] for [`Biblio`] using the
/// [`Reader::read`] method.
pub trait Reader {
    /// The format associated with the reader.
    type Format: Parse;

    /// Pull some bytes from this reader in order to produce a [`Reader::Format`] instance.
    ///
    /// # Errors
    /// If this method encounters any form of error making it unable to read the bytes in order to
    /// create the format.
    fn read(&mut self) -> Result<Self::Format, Error>;

    /// Read bytes from this reader using [`Reader::read`] and then parse using [`Parse::parse`]
    /// with the associated [`Reader::Format`] type.
    ///
    /// # Errors
    /// This will return [`Err`] if there is an error from [`Reader::read`] or an error when parsing
    /// using [`Parse::parse`].
    fn read_ast(&mut self) -> Result<Biblio, Error> {
        let format = self.read()?;
        format.parse()
    }
}
