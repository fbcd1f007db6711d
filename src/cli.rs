// SPDX-FileCopyrightText: 2021-2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::{path::PathBuf, sync::LazyLock};

use clap::{command, crate_name, value_parser, Arg, ArgAction, Command, ValueHint};
use cli_utils::logging;
use code_block_writer::{Indentation, NewLine, RunOptions, WriterOptions, STD_STREAM};
use const_format::formatcp;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

pub const A_L_CRLF: &str = "crlf";
// pub const A_S_CRLF: char = 'r';
pub const A_L_DIFF: &str = "diff";
pub const A_S_DIFF: char = 'd';
pub const A_L_IN_PLACE: &str = "in-place";
pub const A_S_IN_PLACE: char = 'p';
pub const A_L_INDENT_WIDTH: &str = "indent-width";
pub const A_S_INDENT_WIDTH: char = 'w';
pub const A_L_INDENTATION: &str = "indentation";
pub const A_S_INDENTATION: char = 'i';
pub const A_L_LEVEL: &str = "level";
pub const A_S_LEVEL: char = 'l';
pub const A_L_USE_TABS: &str = "use-tabs";
pub const A_S_USE_TABS: char = 't';
pub const A_L_QUIET: &str = "quiet";
pub const A_S_QUIET: char = 'q';
pub const A_L_VERBOSE: &str = "verbose";
pub const A_S_VERBOSE: char = 'v';
pub const A_L_VERSION: &str = "version";
pub const A_S_VERSION: char = 'V';
pub const A_L_SRC: &str = "src";

pub const DEFAULT_INDENT_WIDTH: u8 = 4;
static DEFAULT_INDENT_WIDTH_STR: LazyLock<String> =
    LazyLock::new(|| DEFAULT_INDENT_WIDTH.to_string());

fn arg_crlf() -> Arg {
    Arg::new(A_L_CRLF)
        .help(r"Write \r\n instead of \n as line terminator")
        .action(ArgAction::SetTrue)
        .long(A_L_CRLF)
}

fn arg_diff() -> Arg {
    Arg::new(A_L_DIFF)
        .help("Print a unified diff of the changes instead of the indented text")
        .action(ArgAction::SetTrue)
        .short(A_S_DIFF)
        .long(A_L_DIFF)
        .conflicts_with(A_L_IN_PLACE)
}

fn arg_in_place() -> Arg {
    Arg::new(A_L_IN_PLACE)
        .help("Overwrite the source files with the indented text")
        .action(ArgAction::SetTrue)
        .short(A_S_IN_PLACE)
        .long(A_L_IN_PLACE)
}

fn arg_indent_width() -> Arg {
    Arg::new(A_L_INDENT_WIDTH)
        .help("Number of spaces per level of indentation")
        .long_help(
            "Number of spaces per level of indentation. \
When indenting with tabs, \
this is still used to convert spaces given with --indentation into levels.",
        )
        .num_args(1)
        .short(A_S_INDENT_WIDTH)
        .long(A_L_INDENT_WIDTH)
        .action(ArgAction::Set)
        .value_name("NUM")
        .value_parser(value_parser!(u8).range(1..))
        .default_value(DEFAULT_INDENT_WIDTH_STR.as_str())
}

fn arg_indentation() -> Arg {
    Arg::new(A_L_INDENTATION)
        .help("Indent by this text, consisting of spaces and tabs only")
        .long_help(
            "Indent by this text, consisting of spaces and tabs only. \
Each tab counts as one level, \
spaces are converted into (partial) levels \
according to the indentation width.",
        )
        .num_args(1)
        .short(A_S_INDENTATION)
        .long(A_L_INDENTATION)
        .action(ArgAction::Set)
        .value_hint(ValueHint::Other)
        .value_name("TEXT")
        .conflicts_with(A_L_LEVEL)
}

fn arg_level() -> Arg {
    Arg::new(A_L_LEVEL)
        .help("Number of indentation levels to indent by")
        .num_args(1)
        .short(A_S_LEVEL)
        .long(A_L_LEVEL)
        .action(ArgAction::Set)
        .value_name("NUM")
        .value_parser(value_parser!(u32))
        .default_value("1")
}

fn arg_use_tabs() -> Arg {
    Arg::new(A_L_USE_TABS)
        .help("Indent with tabs instead of spaces")
        .action(ArgAction::SetTrue)
        .short(A_S_USE_TABS)
        .long(A_L_USE_TABS)
}

fn arg_quiet() -> Arg {
    Arg::new(A_L_QUIET)
        .help("Minimize or suppress output to stdout")
        .long_help("Minimize or suppress output to stdout, and only shows log output on stderr.")
        .action(ArgAction::SetTrue)
        .short(A_S_QUIET)
        .long(A_L_QUIET)
        .conflicts_with(A_L_VERBOSE)
}

fn arg_verbose() -> Arg {
    Arg::new(A_L_VERBOSE)
        .help("more verbose output (useful for debugging)")
        .short(A_S_VERBOSE)
        .long(A_L_VERBOSE)
        .action(ArgAction::SetTrue)
}

fn arg_version() -> Arg {
    Arg::new(A_L_VERSION)
        .help(formatcp!(
            "Print version information and exit. \
May be combined with -{A_S_QUIET},--{A_L_QUIET}, \
to really only output the version string."
        ))
        .short(A_S_VERSION)
        .long(A_L_VERSION)
        .action(ArgAction::SetTrue)
}

fn arg_src() -> Arg {
    Arg::new(A_L_SRC)
        .help(formatcp!(
            "Source file(s) to indent; '{STD_STREAM}' for stdin"
        ))
        .num_args(1..)
        .value_name("FILE")
        .value_hint(ValueHint::FilePath)
        .value_parser(value_parser!(PathBuf))
        .action(ArgAction::Set)
        .default_value(STD_STREAM)
}

fn args_matcher() -> Command {
    command!()
        .about("Indents source code, leaving multi-line string literals untouched")
        .long_about(
            "Takes source code (commonly a snippet about to be embedded \
into generated code) and indents each of its lines. \
Lines that start within a string literal \
(for example a template string spanning multiple lines) \
are left exactly as they are, \
and line endings are normalized.",
        )
        .bin_name(clap::crate_name!())
        .help_expected(true)
        .disable_version_flag(true)
        .arg(arg_crlf())
        .arg(arg_diff())
        .arg(arg_in_place())
        .arg(arg_indent_width())
        .arg(arg_indentation())
        .arg(arg_level())
        .arg(arg_use_tabs())
        .arg(arg_quiet())
        .arg(arg_verbose())
        .arg(arg_version())
        .arg(arg_src())
}

#[allow(clippy::print_stdout)]
fn print_version_and_exit(quiet: bool) {
    if !quiet {
        print!("{} ", clap::crate_name!());
    }
    println!("{}", code_block_writer::VERSION);
    std::process::exit(0);
}

#[derive(Error, Debug)]
pub enum InitError {
    #[error("Failed to init logging system: {0}")]
    LogInit(#[from] tracing_subscriber::util::TryInitError),

    #[error("Failed to change the logging level: {0}")]
    LogChangeLevel(#[from] tracing_subscriber::reload::Error),
}

pub fn init() -> Result<(RunOptions, Vec<PathBuf>), InitError> {
    let log_reload_handle = logging::setup(crate_name!())?;
    let args = args_matcher().get_matches();

    let quiet = args.get_flag(A_L_QUIET);
    let version = args.get_flag(A_L_VERSION);
    if version {
        print_version_and_exit(quiet);
    }

    let verbose = args.get_flag(A_L_VERBOSE);
    let log_level = if verbose {
        LevelFilter::TRACE
    } else if quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    logging::set_log_level_tracing(&log_reload_handle, log_level)?;

    let new_line = if args.get_flag(A_L_CRLF) {
        NewLine::CrLf
    } else {
        NewLine::Lf
    };
    let indent_number_of_spaces = args
        .get_one::<u8>(A_L_INDENT_WIDTH)
        .copied()
        .unwrap_or(DEFAULT_INDENT_WIDTH)
        .into();
    let use_tabs = args.get_flag(A_L_USE_TABS);
    let indentation = args.get_one::<String>(A_L_INDENTATION).map_or_else(
        || Indentation::from(args.get_one::<u32>(A_L_LEVEL).copied().unwrap_or(1)),
        Indentation::from,
    );
    let diff = args.get_flag(A_L_DIFF);
    let in_place = args.get_flag(A_L_IN_PLACE);

    let src: Vec<PathBuf> = args
        .get_many::<PathBuf>(A_L_SRC)
        .map(|sources| sources.cloned().collect())
        .unwrap_or_default();
    Ok((
        RunOptions {
            writer: WriterOptions {
                new_line,
                indent_number_of_spaces,
                use_tabs,
                use_single_quote: false,
            },
            indentation,
            diff,
            in_place,
        },
        src,
    ))
}
