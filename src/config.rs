use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::Cli;
use crate::core::CompiledPatterns;
use crate::error::TreeError;

pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ColorMode {
    Never,
    #[default]
    Auto,
    Always,
}

impl ColorMode {
    /// Whether color is on for this run, given whether stdout can show it.
    pub fn resolve(self, terminal: bool) -> bool {
        match self {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => terminal,
        }
    }
}

impl FromStr for ColorMode {
    type Err = TreeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "never" => Ok(ColorMode::Never),
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            other => Err(TreeError::InvalidConfig(format!(
                "unrecognized color mode '{other}' (expected never, auto or always)"
            ))),
        }
    }
}

/// Terminal capability check behind `--color=auto`.
pub fn stdout_supports_color() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    std::io::stdout().is_terminal()
}

pub fn parse_color_mode(value: &str) -> Result<ColorMode, TreeError> {
    value.parse()
}

pub fn parse_max_depth(value: &str) -> Result<usize, TreeError> {
    let depth: i64 = value
        .trim()
        .parse()
        .map_err(|_| TreeError::InvalidConfig(format!("max depth '{value}' is not an integer")))?;
    usize::try_from(depth).map_err(|_| {
        TreeError::InvalidConfig(format!("max depth must be non-negative, got {depth}"))
    })
}

pub fn parse_ignore_pattern(value: &str) -> Result<CompiledPatterns, TreeError> {
    CompiledPatterns::new(value).map_err(|err| TreeError::InvalidConfig(format!("{err:#}")))
}

/// Everything one invocation needs, resolved once before traversal.
#[derive(Clone, Debug)]
pub struct TraversalConfig {
    pub root: PathBuf,
    /// The root was defaulted or given as `.`; the header prints `.`.
    pub root_is_current_dir: bool,
    /// Directory levels below the root's children; 0 lists only the children.
    pub max_depth: usize,
    /// `-a`
    pub show_hidden: bool,
    /// `-A`
    pub almost_all: bool,
    pub ignore_backups: bool,
    pub ignore: Option<CompiledPatterns>,
    pub recursive: bool,
    pub classify: bool,
    pub long_format: bool,
    pub human_readable: bool,
    pub color_mode: ColorMode,
    pub color_active: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            root_is_current_dir: true,
            max_depth: DEFAULT_MAX_DEPTH,
            show_hidden: false,
            almost_all: false,
            ignore_backups: false,
            ignore: None,
            recursive: true,
            classify: false,
            long_format: false,
            human_readable: false,
            color_mode: ColorMode::Never,
            color_active: false,
        }
    }
}

impl TraversalConfig {
    pub fn from_cli(cli: &Cli, terminal: bool) -> Self {
        let (root, root_is_current_dir) = match cli.dir.as_ref() {
            None => (PathBuf::from("."), true),
            Some(dir) => (dir.clone(), dir.as_path() == Path::new(".")),
        };

        Self {
            root,
            root_is_current_dir,
            max_depth: cli.max_depth,
            show_hidden: cli.all,
            almost_all: cli.almost_all,
            ignore_backups: cli.ignore_backups,
            ignore: cli.ignore.clone(),
            recursive: !cli.no_recursive,
            classify: cli.classify,
            long_format: cli.long,
            human_readable: cli.human_readable,
            color_mode: cli.color,
            color_active: cli.color.resolve(terminal),
        }
    }

    /// `--no-recursive` caps the walk at the root's children whatever
    /// `--max-depth` says.
    pub fn effective_max_depth(&self) -> usize {
        if self.recursive { self.max_depth } else { 0 }
    }

    pub fn needs_metadata(&self) -> bool {
        self.long_format || self.classify || self.color_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn color_mode_resolution_table() {
        assert!(!ColorMode::Never.resolve(true));
        assert!(!ColorMode::Never.resolve(false));
        assert!(ColorMode::Always.resolve(false));
        assert!(ColorMode::Auto.resolve(true));
        assert!(!ColorMode::Auto.resolve(false));
    }

    #[test]
    fn unknown_color_mode_is_invalid_config() {
        let err = "sometimes".parse::<ColorMode>().unwrap_err();
        assert!(matches!(err, TreeError::InvalidConfig(_)));
    }

    #[test]
    fn max_depth_rejects_negative_and_garbage() {
        assert_eq!(parse_max_depth("0").unwrap(), 0);
        assert_eq!(parse_max_depth("7").unwrap(), 7);
        assert!(matches!(
            parse_max_depth("-1"),
            Err(TreeError::InvalidConfig(_))
        ));
        assert!(matches!(
            parse_max_depth("deep"),
            Err(TreeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn from_cli_maps_flags() {
        let cli = Cli::parse_from([
            "lt",
            "-aBFhlR",
            "--color=always",
            "--max-depth=5",
            "-I",
            "*.o",
            "src",
        ]);
        let config = TraversalConfig::from_cli(&cli, false);
        assert_eq!(config.root, PathBuf::from("src"));
        assert!(!config.root_is_current_dir);
        assert!(config.show_hidden);
        assert!(!config.almost_all);
        assert!(config.ignore_backups);
        assert!(config.classify);
        assert!(config.human_readable);
        assert!(config.long_format);
        assert!(!config.recursive);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.effective_max_depth(), 0);
        assert!(config.color_active);
        assert!(config.ignore.as_ref().is_some_and(|p| p.matches("main.o")));
    }

    #[test]
    fn defaults_from_cli() {
        let cli = Cli::parse_from(["lt"]);
        let config = TraversalConfig::from_cli(&cli, false);
        assert!(config.root_is_current_dir);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.recursive);
        assert_eq!(config.color_mode, ColorMode::Auto);
        assert!(!config.color_active);
        assert!(!config.needs_metadata());
    }

    #[test]
    fn bare_color_flag_means_always() {
        let cli = Cli::parse_from(["lt", "--color"]);
        assert_eq!(cli.color, ColorMode::Always);
    }
}
