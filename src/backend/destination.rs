//! Where a stream backend writes, and who closes it.

use crate::error::Error;
use crate::internal;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// An output destination tagged with its ownership.
///
/// Owned destinations are closed when the backend holding them is dropped.
/// A borrowed writer is flushed but stays open; its owner closes it.
///
/// Files are written without a buffer: a line is on disk, or has failed,
/// by the time `record` returns. Any buffering inside an owned or borrowed
/// writer belongs to that writer, and its failures surface at flush.
pub enum Destination<'a> {
    /// A file opened by the backend.
    File { path: PathBuf, file: File },
    /// Any writer handed over to the backend, e.g. `io::stderr()`.
    Owned(Box<dyn Write + Send + 'a>),
    /// A writer that stays with the caller.
    Borrowed(&'a mut (dyn Write + Send)),
}

impl Destination<'_> {
    /// Opens `path` for writing, creating it if needed. Truncates unless `append`.
    ///
    /// # Errors
    /// [`Error::Open`] when the file cannot be opened for writing.
    pub fn file(path: impl AsRef<Path>, append: bool) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }

        let file = options.open(path).map_err(|source| {
            internal::error(
                "DEST",
                &format!("Failed to open {}: {source}", path.display()),
            );
            Error::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

        internal::debug(
            "DEST",
            &format!(
                "Opened {} ({})",
                path.display(),
                if append { "append" } else { "truncate" }
            ),
        );

        Ok(Self::File {
            path: path.to_path_buf(),
            file,
        })
    }
}

impl<'a> Destination<'a> {
    #[must_use]
    pub fn owned(writer: impl Write + Send + 'a) -> Self {
        Self::Owned(Box::new(writer))
    }

    #[must_use]
    pub fn borrowed<W: Write + Send>(writer: &'a mut W) -> Self {
        Self::Borrowed(writer)
    }

    /// True when dropping the backend closes the destination.
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        !matches!(self, Self::Borrowed(_))
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Owned(_) | Self::Borrowed(_) => None,
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::File { file, .. } => file,
            Self::Owned(writer) => writer.as_mut(),
            Self::Borrowed(writer) => &mut **writer,
        }
    }

    /// Writes `text` and a newline in one call so lines never interleave.
    pub(crate) fn write_line(&mut self, text: &str) -> Result<(), Error> {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        self.writer().write_all(line.as_bytes())?;
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> Result<(), Error> {
        self.writer().flush()?;
        Ok(())
    }
}

impl fmt::Debug for Destination<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path, .. } => f.debug_struct("File").field("path", path).finish(),
            Self::Owned(_) => f.write_str("Owned"),
            Self::Borrowed(_) => f.write_str("Borrowed"),
        }
    }
}
