// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Only \\n and \\r\\n are allowed as new-line, but got {0:?}")]
    InvalidNewLine(String),

    #[error("The number of spaces per indentation level has to be at least 1")]
    InvalidIndentWidth,

    #[error("Passed in indentation level should be greater than or equal to 0, but was {0}")]
    NegativeIndentationLevel(i64),

    #[error(
        "Passed in indentation level should be at most {max}, but was {0}",
        max = crate::indentation::MAX_INDENTATION_LEVEL
    )]
    IndentationLevelTooLarge(i64),

    #[error("Provided indentation text must be empty or only contain spaces or tabs, but was {0:?}")]
    InvalidIndentationText(String),

    #[error("The target to indent {0} does not seem to exist")]
    TargetFileDoesNotExist(PathBuf),

    #[error("Error while reading {0}: {1}")]
    FailedToReadTargetFile(PathBuf, #[source] std::io::Error),

    #[error("Error while writing {0}: {1}")]
    FailedToWriteFormattedFile(PathBuf, #[source] std::io::Error),
}

pub type FmtResult<T> = std::result::Result<T, Error>;
