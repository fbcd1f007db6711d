// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use cli::InitError;
use thiserror::Error;

mod cli;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to initialize the CLI tool: {0}")]
    Init(#[from] InitError),

    #[error("Failed to indent: {0}")]
    Indent(#[from] code_block_writer::error::Error),
}

fn main() -> Result<(), CliError> {
    let (options, src) = cli::init()?;
    tracing::debug!("Indenting {} source(s)", src.len());
    code_block_writer::run(&options, &src)?;
    Ok(())
}
