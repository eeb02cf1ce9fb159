use crate::config::{default_concurrency, parse_key_override, ConvertConfig, DEFAULT_FILE_EXTENSION};
use crate::core::{Direction, Format};
use crate::error::H2hError;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "h2h", version, about = "Convert Hexo and Hugo post front matter", long_about = None)]
pub struct Cli {
    /// Directory containing the source posts
    pub src: PathBuf,
    /// Directory the converted posts are written to
    pub dst: PathBuf,
    /// Front matter format of the source posts
    #[arg(long = "from", default_value = "yaml", value_parser = parse_format)]
    pub source_format: Format,
    /// Front matter format to write
    #[arg(long = "to", default_value = "yaml", value_parser = parse_format)]
    pub target_format: Format,
    /// Conversion direction: hexo2hugo or hugo2hexo
    #[arg(short, long, default_value = "hexo2hugo", value_parser = parse_direction)]
    pub direction: Direction,
    /// Only convert files whose name ends with this suffix
    #[arg(long = "ext", default_value = DEFAULT_FILE_EXTENSION)]
    pub file_extension: String,
    /// Maximum number of files converted at once (default: number of CPUs)
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
    /// Extra key rename, e.g. --map categories=series
    #[arg(long = "map", value_parser = parse_map)]
    pub key_overrides: Vec<(String, String)>,
    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn to_config(&self) -> ConvertConfig {
        ConvertConfig {
            source_format: self.source_format,
            target_format: self.target_format,
            direction: self.direction,
            file_extension: self.file_extension.clone(),
            max_concurrency: self.concurrency.unwrap_or_else(default_concurrency),
            key_overrides: self.key_overrides.clone(),
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "error",
            1 => "info",
            _ => "debug",
        }
    }
}

fn parse_format(s: &str) -> Result<Format, H2hError> {
    s.parse()
}

fn parse_direction(s: &str) -> Result<Direction, H2hError> {
    s.parse()
}

fn parse_map(s: &str) -> Result<(String, String), H2hError> {
    parse_key_override(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["h2h", "src", "dst"]).unwrap();
        let config = cli.to_config();

        assert_eq!(config.source_format, Format::Yaml);
        assert_eq!(config.target_format, Format::Yaml);
        assert_eq!(config.direction, Direction::HexoToHugo);
        assert_eq!(config.file_extension, ".md");
        assert!(config.max_concurrency >= 1);
        assert_eq!(cli.log_filter(), "error");
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "h2h",
            "content",
            "out",
            "--from",
            "toml",
            "--to",
            "yaml",
            "--direction",
            "hugo2hexo",
            "--ext",
            ".markdown",
            "-j",
            "4",
            "--map",
            "series=categories",
            "-vv",
        ])
        .unwrap();
        let config = cli.to_config();

        assert_eq!(config.source_format, Format::Toml);
        assert_eq!(config.direction, Direction::HugoToHexo);
        assert_eq!(config.file_extension, ".markdown");
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(
            config.key_overrides,
            vec![("series".to_string(), "categories".to_string())]
        );
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::try_parse_from(["h2h", "a", "b", "-v"]).unwrap();
        assert_eq!(cli.log_filter(), "info");
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["h2h", "a", "b", "--from", "json"]).is_err());
        assert!(Cli::try_parse_from(["h2h", "a", "b", "-d", "jekyll"]).is_err());
    }
}
