//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        if self.quiet {
            match &result.answer {
                Ok(answer) => println!("{}", answer),
                Err(e) => eprintln!("Error: {}", e),
            }
            return;
        }

        match format_result(result) {
            Ok(line) => println!("{}", line),
            Err(line) => eprintln!("{}", line),
        }
    }

    /// Print a summary after all results
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::from_results(results);
        println!();
        println!("--- Summary ---");
        println!(
            "Solvers: {} solved, {} failed",
            summary.successes, summary.failures
        );
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(self.start_time.elapsed())
        );
    }
}

/// Totals over successful results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Summary {
    successes: usize,
    failures: usize,
    parse_time: TimeDelta,
    solve_time: TimeDelta,
}

impl Summary {
    fn from_results(results: &[SolverResult]) -> Self {
        let successes = results.iter().filter(|r| r.answer.is_ok()).count();
        let parse_time = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .filter_map(|r| r.parse_duration)
            .sum();
        let solve_time = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .sum();
        Self {
            successes,
            failures: results.len() - successes,
            parse_time,
            solve_time,
        }
    }
}

/// Full output line with timing; `Err` holds the line for a failed part
fn format_result(result: &SolverResult) -> Result<String, String> {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            Ok(format!(
                "{}: {} ({}solve: {})",
                prefix,
                answer,
                parse_timing,
                format_duration(result.solve_duration)
            ))
        }
        Err(e) => Err(format!("{}: Error - {}", prefix, e)),
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InputError, RunError};
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn solved(part: u8, answer: &str, parse_ms: Option<i64>, solve_ms: i64) -> SolverResult {
        SolverResult {
            year: 2018,
            day: 7,
            part,
            answer: Ok(answer.to_string()),
            parse_duration: parse_ms.map(TimeDelta::milliseconds),
            solve_duration: TimeDelta::milliseconds(solve_ms),
        }
    }

    fn failed(part: u8) -> SolverResult {
        SolverResult {
            year: 2018,
            day: 7,
            part,
            answer: Err(RunError::from(InputError::NotFound {
                year: 2018,
                day: 7,
                path: PathBuf::from("inputs/2018_day07.txt"),
            })
            .into()),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-20)), "-20µs");
        assert_eq!(
            format_std_duration(std::time::Duration::from_micros(42)),
            "42µs"
        );
    }

    #[test]
    fn test_format_result_lines() {
        assert_eq!(
            format_result(&solved(1, "CABDFE", Some(2), 1)),
            Ok("2018/07 Part 1: CABDFE (parse: 2.00ms, solve: 1.00ms)".to_string())
        );
        assert_eq!(
            format_result(&solved(2, "15", None, 3)),
            Ok("2018/07 Part 2: 15 (solve: 3.00ms)".to_string())
        );
        let line = format_result(&failed(1)).unwrap_err();
        assert!(line.starts_with("2018/07 Part 1: Error - No input for 2018/07"));
    }

    #[test]
    fn test_summary_counts_only_successes() {
        let results = vec![
            solved(1, "CABDFE", Some(2), 1),
            solved(2, "15", None, 3),
            failed(1),
            failed(2),
        ];
        assert_eq!(
            Summary::from_results(&results),
            Summary {
                successes: 2,
                failures: 2,
                parse_time: TimeDelta::milliseconds(2),
                solve_time: TimeDelta::milliseconds(4),
            }
        );
    }

    proptest! {
        #[test]
        fn prop_format_duration_picks_unit_by_magnitude(micros in 0i64..10_000_000) {
            let text = format_duration(TimeDelta::microseconds(micros));
            if micros < 1000 {
                prop_assert_eq!(text, format!("{}µs", micros));
            } else if micros < 1_000_000 {
                prop_assert!(text.ends_with("ms"), "{}", text);
            } else {
                prop_assert!(text.ends_with('s') && !text.ends_with("ms"), "{}", text);
            }
        }
    }
}
