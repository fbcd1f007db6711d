// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

pub mod error;
pub mod escape;
pub mod indentation;
pub mod lexer;
pub mod options;
pub mod reindent;
pub mod writer;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use git_version::git_version;

use crate::error::{Error, FmtResult};
pub use crate::indentation::{Indentation, MAX_INDENTATION_LEVEL};
pub use crate::options::{NewLine, WriterOptions};
pub use crate::writer::CodeBlockWriter;

/// This project's version,
/// as reported by `git describe`,
/// or the crates version if not built from a git repository.
pub const VERSION: &str = git_version!(cargo_prefix = "", fallback = "unknown");

/// Path standing for stdin (as source) and stdout (as target).
pub const STD_STREAM: &str = "-";

/// What [`run`] does with each source.
pub struct RunOptions {
    /// How to write the indented text.
    pub writer: WriterOptions,
    /// By how much to indent each source.
    pub indentation: Indentation,
    /// Print a diff instead of the indented text.
    pub diff: bool,
    /// Overwrite the source files with the indented text,
    /// instead of printing it to stdout.
    pub in_place: bool,
}

fn is_std_stream(path: &Path) -> bool {
    path.as_os_str() == STD_STREAM
}

fn read_source(source: &Path) -> FmtResult<String> {
    if is_std_stream(source) {
        return io::read_to_string(io::stdin())
            .map_err(|err| Error::FailedToReadTargetFile(source.to_path_buf(), err));
    }
    if !source.exists() {
        return Err(Error::TargetFileDoesNotExist(source.to_path_buf()));
    }
    fs::read_to_string(source).map_err(|err| Error::FailedToReadTargetFile(source.to_path_buf(), err))
}

fn write_stdout(content: &str) -> FmtResult<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(content.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|err| Error::FailedToWriteFormattedFile(PathBuf::from(STD_STREAM), err))
}

/// Indents each of the `sources` as configured in `options`.
///
/// # Errors
///
/// - If a source can not be read.
/// - If the output can not be written.
/// - If the options are invalid.
pub fn run(options: &RunOptions, sources: &[PathBuf]) -> FmtResult<()> {
    for source in sources {
        tracing::debug!("Indenting {} ...", source.display());
        let original = read_source(source)?;
        let indented =
            reindent::reindent(&original, &options.writer, options.indentation.clone())?;

        if options.diff {
            if original == indented {
                tracing::info!("No changes for {}", source.display());
            } else {
                write_stdout(&reindent::diff(&original, &indented))?;
            }
        } else if options.in_place && !is_std_stream(source) {
            fs::write(source, &indented)
                .map_err(|err| Error::FailedToWriteFormattedFile(source.clone(), err))?;
            tracing::info!("Indented {}", source.display());
        } else {
            write_stdout(&indented)?;
        }
    }
    Ok(())
}
