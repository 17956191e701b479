use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::{ColorMode, parse_color_mode, parse_ignore_pattern, parse_max_depth};
use crate::core::CompiledPatterns;

#[derive(Parser, Debug)]
#[command(name = "lt", version)]
#[command(about = "List directory contents as a tree", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Directory to list (defaults to current directory)
    pub dir: Option<PathBuf>,

    /// Do not ignore entries starting with .
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Like -a, but do not list implied . and ..
    #[arg(short = 'A', long = "almost-all")]
    pub almost_all: bool,

    /// Do not list entries ending with ~
    #[arg(short = 'B', long = "ignore-backups")]
    pub ignore_backups: bool,

    /// Append an indicator (one of /*@) to entries
    #[arg(short = 'F', long = "classify")]
    pub classify: bool,

    /// With -l, print sizes like 1.5K, 23.0M
    #[arg(short = 'h', long = "human-readable")]
    pub human_readable: bool,

    /// Use a long listing format
    #[arg(short = 'l')]
    pub long: bool,

    /// List only the direct children of <DIR>
    #[arg(short = 'R', long = "no-recursive")]
    pub no_recursive: bool,

    /// Colorize the output: never, auto or always
    #[arg(
        long,
        value_name = "WHEN",
        default_value = "auto",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "always",
        value_parser = parse_color_mode
    )]
    pub color: ColorMode,

    /// Descend at most N directory levels below the listed children
    #[arg(
        long = "max-depth",
        value_name = "N",
        default_value = "3",
        allow_hyphen_values = true,
        value_parser = parse_max_depth
    )]
    pub max_depth: usize,

    /// Do not list entries matching PATTERN (pipe-separated, * and ? wildcards)
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN", value_parser = parse_ignore_pattern)]
    pub ignore: Option<CompiledPatterns>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}
