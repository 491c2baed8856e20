//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::data::loader::LoadOptions;

/// Energy-efficiency dashboard.
#[derive(Debug, Parser)]
#[command(name = "energy-dash", version, about)]
pub struct Cli {
    /// Dataset to load at startup (.csv, .tsv, .json, .parquet).
    /// Without it the dashboard starts empty; use File → Open….
    #[arg(env = "ENERGY_DASH_DATA")]
    pub data: Option<PathBuf>,

    /// Field delimiter for .csv files.
    #[arg(long, default_value_t = ',', value_parser = parse_delimiter)]
    pub delimiter: char,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        // `parse_delimiter` only accepts ASCII.
        LoadOptions {
            delimiter: self.delimiter as u8,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["energy-dash"]).unwrap();
        assert_eq!(cli.load_options(), LoadOptions::default());
    }

    #[test]
    fn test_path_and_delimiter() {
        let cli = Cli::try_parse_from(["energy-dash", "data.csv", "--delimiter", ";"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("data.csv")));
        assert_eq!(cli.load_options().delimiter, b';');
    }

    #[test]
    fn test_rejects_multi_char_delimiter() {
        assert!(Cli::try_parse_from(["energy-dash", "--delimiter", "::"]).is_err());
    }
}
