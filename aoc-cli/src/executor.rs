//! Parallel executor for running solvers

use crate::config::Config;
use crate::error::{ArcRunError, CliError, RunError};
use crate::input::InputSource;
use aoc_solver::{ConfigError, DynSolver, Example, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use tracing::{debug, info, warn};

/// Result from a single solver part
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcRunError>,
    /// Set on the first part run for a solver only
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Runs selected solvers across a thread pool, one work item per solver
pub struct Executor {
    registry: SolverRegistry,
    inputs: InputSource,
    options: Vec<(String, String)>,
    check: bool,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, CliError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| CliError::ThreadPool(e.to_string()))?;

        Ok(Self {
            registry,
            inputs: InputSource::new(config.input_dir.clone(), config.input_file.clone()),
            options: config.options.clone(),
            check: config.check,
            year_filter: config.year_filter,
            day_filter: config.day_filter,
            part_filter: config.part_filter,
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.registry
            .storage()
            .iter_info()
            .filter(|info| self.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| self.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(self.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Run every work item; results come back ordered by year, day, then part
    pub fn execute(&self, work_items: &[WorkItem]) -> Vec<SolverResult> {
        let per_solver: Vec<Vec<SolverResult>> = self.thread_pool.install(|| {
            work_items
                .par_iter()
                .map(|work| self.run_solver(work))
                .collect()
        });
        per_solver.into_iter().flatten().collect()
    }

    fn run_solver(&self, work: &WorkItem) -> Vec<SolverResult> {
        let (year, day) = (work.year, work.day);

        let input = match self.inputs.load(year, day) {
            Ok(input) => input,
            Err(e) => return fail_all(work, RunError::from(e).into()),
        };
        let mut solver = match self.registry.create_solver(year, day, &input) {
            Ok(solver) => solver,
            Err(e) => return fail_all(work, RunError::from(e).into()),
        };

        if self.check
            && let Err(e) = self.check_examples(work, solver.examples())
        {
            warn!(year, day, error = %e, "example check failed, skipping real input");
            return fail_all(work, e.into());
        }

        if let Err(e) = apply_options(&mut *solver, &self.options) {
            return fail_all(work, RunError::Solver(e.into()).into());
        }

        let parse_duration = solver.parse_duration();
        work.parts
            .clone()
            .map(|part| {
                let parse_duration = (part == *work.parts.start()).then_some(parse_duration);
                solve_part(year, day, part, &mut *solver, parse_duration)
            })
            .collect()
    }

    /// Solve every example of the selected parts on a fresh instance
    fn check_examples(&self, work: &WorkItem, examples: &[Example]) -> Result<(), RunError> {
        let (year, day) = (work.year, work.day);
        let selected = examples.iter().filter(|e| work.parts.contains(&e.part));

        for example in selected {
            let actual = self.solve_example(year, day, example).map_err(|source| {
                RunError::ExampleError {
                    part: example.part,
                    source,
                }
            })?;
            if actual != example.expected {
                return Err(RunError::ExampleMismatch {
                    part: example.part,
                    expected: example.expected.to_string(),
                    actual,
                });
            }
            let options = example
                .options
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .join(",");
            info!(year, day, part = example.part, %options, "example passed");
        }
        Ok(())
    }

    fn solve_example(&self, year: u16, day: u8, example: &Example) -> Result<String, SolverError> {
        let mut solver = self.registry.create_solver(year, day, example.input)?;
        for (key, value) in example.options {
            solver.configure(key, value)?;
        }
        Ok(solver.solve(example.part)?.answer)
    }
}

/// Filter parts based on the part filter and the solver's max parts
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0, // Empty range - intentional
        None => 1..=max_parts,
    }
}

/// Apply `key=value` options in order; unknown keys are skipped
fn apply_options(
    solver: &mut dyn DynSolver,
    options: &[(String, String)],
) -> Result<(), ConfigError> {
    let (year, day) = (solver.year(), solver.day());
    for (key, value) in options {
        match solver.configure(key, value) {
            Ok(()) => debug!(year, day, %key, %value, "option applied"),
            Err(ConfigError::UnknownOption(_)) => {
                warn!(year, day, %key, "unknown option, skipped")
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// One failed result per part, sharing the same error
fn fail_all(work: &WorkItem, error: ArcRunError) -> Vec<SolverResult> {
    work.parts
        .clone()
        .map(|part| SolverResult {
            year: work.year,
            day: work.day,
            part,
            answer: Err(error.clone()),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        })
        .collect()
}

fn solve_part(
    year: u16,
    day: u8,
    part: u8,
    solver: &mut dyn DynSolver,
    parse_duration: Option<TimeDelta>,
) -> SolverResult {
    match solver.solve(part) {
        Ok(result) => SolverResult {
            year,
            day,
            part,
            solve_duration: result.duration(),
            answer: Ok(result.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            year,
            day,
            part,
            answer: Err(RunError::Solver(e.into()).into()),
            parse_duration,
            solve_duration: TimeDelta::zero(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::SolverRegistryBuilder;
    use std::fs;
    use tempfile::TempDir;

    const INPUT: &str = "\
Step C must be finished before step A can begin.
Step C must be finished before step F can begin.
Step A must be finished before step B can begin.
Step A must be finished before step D can begin.
Step B must be finished before step E can begin.
Step D must be finished before step E can begin.
Step F must be finished before step E can begin.
";

    fn config(input_dir: &TempDir) -> Config {
        Config {
            year_filter: Some(2018),
            day_filter: Some(7),
            part_filter: None,
            tags: Vec::new(),
            input_dir: input_dir.path().to_path_buf(),
            input_file: None,
            options: Vec::new(),
            check: false,
            thread_count: 2,
            quiet: true,
        }
    }

    fn executor(config: &Config) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register_solver_plugins(|plugin| plugin.year == 2018 && plugin.day == 7)
            .unwrap()
            .build();
        Executor::new(registry, config).unwrap()
    }

    fn answers(results: &[SolverResult]) -> Vec<Result<String, String>> {
        results
            .iter()
            .map(|r| r.answer.clone().map_err(|e| e.to_string()))
            .collect()
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), 1..=2);
        assert_eq!(filter_parts(Some(2), 2), 2..=2);
        assert!(filter_parts(Some(2), 1).is_empty());
    }

    #[test]
    fn test_collect_work_items() {
        let temp = TempDir::new().unwrap();
        let mut config = config(&temp);
        config.part_filter = Some(2);
        let executor = executor(&config);

        assert_eq!(
            executor.collect_work_items(),
            vec![WorkItem {
                year: 2018,
                day: 7,
                parts: 2..=2,
            }]
        );

        config.year_filter = Some(2019);
        assert!(self::executor(&config).collect_work_items().is_empty());
    }

    #[test]
    fn test_options_configure_the_run() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2018_day07.txt"), INPUT).unwrap();
        let mut config = config(&temp);
        config.options = vec![
            ("workers".to_string(), "2".to_string()),
            ("elves".to_string(), "9".to_string()),
            ("base-duration".to_string(), "0".to_string()),
        ];
        let executor = executor(&config);

        let results = executor.execute(&executor.collect_work_items());
        assert_eq!(
            answers(&results),
            vec![Ok("CABDFE".to_string()), Ok("15".to_string())]
        );
        assert!(results[0].parse_duration.is_some());
        assert!(results[1].parse_duration.is_none());
    }

    #[test]
    fn test_invalid_option_fails_every_part() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2018_day07.txt"), INPUT).unwrap();
        let mut config = config(&temp);
        config.options = vec![("workers".to_string(), "0".to_string())];
        let executor = executor(&config);

        let results = executor.execute(&executor.collect_work_items());
        assert_eq!(results.len(), 2);
        for result in &results {
            let err = result.answer.as_ref().unwrap_err();
            assert!(matches!(
                err.inner(),
                RunError::Solver(SolverError::Config(ConfigError::InvalidValue { .. }))
            ));
        }
    }

    #[test]
    fn test_missing_input_reported_per_part() {
        let temp = TempDir::new().unwrap();
        let executor = executor(&config(&temp));

        let results = executor.execute(&executor.collect_work_items());
        assert_eq!(results.len(), 2);
        assert!(
            results
                .iter()
                .all(|r| matches!(r.answer.as_ref().map_err(|e| e.inner()), Err(RunError::Input(_))))
        );
    }

    #[test]
    fn test_check_runs_examples_before_real_input() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2018_day07.txt"), INPUT).unwrap();
        let mut config = config(&temp);
        config.check = true;
        let executor = executor(&config);

        // the real input runs with the full-scale defaults
        let results = executor.execute(&executor.collect_work_items());
        assert_eq!(
            answers(&results),
            vec![Ok("CABDFE".to_string()), Ok("253".to_string())]
        );
    }

    #[test]
    fn test_examples_use_their_own_options() {
        let temp = TempDir::new().unwrap();
        let executor = executor(&config(&temp));
        let work = &executor.collect_work_items()[0];
        let mut solver = executor.registry.create_solver(2018, 7, INPUT).unwrap();
        // user options never leak into example checks
        solver.configure("workers", "1").unwrap();

        assert!(executor.check_examples(work, solver.examples()).is_ok());

        let wrong = [Example {
            part: 2,
            input: INPUT,
            expected: "15",
            options: &[],
        }];
        match executor.check_examples(work, &wrong) {
            Err(RunError::ExampleMismatch {
                part,
                expected,
                actual,
            }) => {
                assert_eq!(part, 2);
                assert_eq!(expected, "15");
                assert_eq!(actual, "253");
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }
}
