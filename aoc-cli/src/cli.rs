//! CLI argument parsing using clap

use crate::config::parse_key_val;
use clap::Parser;
use std::path::PathBuf;

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding puzzle inputs named `{year}_day{day:02}.txt`
    #[arg(long, default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Read this file instead of the input directory for every selected solver
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Solver option as key=value (repeatable)
    #[arg(short = 'o', long = "option", value_parser = parse_key_val)]
    pub options: Vec<(String, String)>,

    /// Check each solver against its worked examples before the real input
    #[arg(long)]
    pub check: bool,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let args = Args::try_parse_from([
            "aoc", "-y", "2018", "-d", "7", "-p", "2", "--tags", "graph,simulation", "-o",
            "workers=2", "--option", "base-duration=0", "--check", "-vv",
        ])
        .unwrap();

        assert_eq!(args.year, Some(2018));
        assert_eq!(args.day, Some(7));
        assert_eq!(args.part, Some(2));
        assert_eq!(args.tags, vec!["graph", "simulation"]);
        assert_eq!(
            args.options,
            vec![
                ("workers".to_string(), "2".to_string()),
                ("base-duration".to_string(), "0".to_string()),
            ]
        );
        assert!(args.check);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.input_dir, PathBuf::from("inputs"));
        assert_eq!(args.input, None);
    }

    #[test]
    fn test_rejects_out_of_range_day_and_bad_option() {
        assert!(Args::try_parse_from(["aoc", "-d", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-p", "3"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-o", "workers"]).is_err());
    }
}
