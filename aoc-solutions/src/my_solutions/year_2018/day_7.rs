//! The Sum of Its Parts: order steps by their prerequisites, then time a
//! worker pool building them.

use anyhow::anyhow;
use aoc_solver::{
    AocParser, ConfigError, Example, ParseError, PartSolver, SolveError, SolverExamples,
    SolverOptions,
};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::task_schedule::{
    DependencyGraph, ScheduleConfig, ScheduleError, serial_order, timed_completion,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2, configurable, examples)]
#[aoc(year = 2018, day = 7, tags = ["graph", "simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    graph: DependencyGraph,
    config: ScheduleConfig,
}

const EXAMPLE_INPUT: &str = "\
Step C must be finished before step A can begin.
Step C must be finished before step F can begin.
Step A must be finished before step B can begin.
Step A must be finished before step D can begin.
Step B must be finished before step E can begin.
Step D must be finished before step E can begin.
Step F must be finished before step E can begin.
";

fn parse_edge(line: &str) -> Result<(&str, &str), anyhow::Error> {
    let rest = line
        .strip_prefix("Step ")
        .ok_or_else(|| anyhow!("expected line to start with 'Step '"))?;
    let (prerequisite, rest) = rest
        .split_once(" must be finished before step ")
        .ok_or_else(|| anyhow!("expected 'must be finished before step'"))?;
    let dependent = rest
        .strip_suffix(" can begin.")
        .ok_or_else(|| anyhow!("expected line to end with 'can begin.'"))?;
    Ok((prerequisite, dependent))
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::MissingData("no dependency lines".to_string()));
        }

        input
            .lines()
            .enumerate()
            .try_fold(DependencyGraph::builder(), |mut builder, (line_idx, line)| {
                // ids are validated and self-loops rejected by the builder
                parse_edge(line.trim())
                    .and_then(|(prerequisite, dependent)| {
                        builder.edge(prerequisite, dependent)?;
                        Ok(())
                    })
                    .map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))?;
                Ok::<_, anyhow::Error>(builder)
            })
            .map(|builder| SharedData {
                graph: builder.build(),
                config: ScheduleConfig::default(),
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn solve_failed(e: ScheduleError) -> SolveError {
    SolveError::SolveFailed(Box::new(e))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let order = serial_order(&shared.graph).map_err(solve_failed)?;
        Ok(shared.graph.concat_ids(&order))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let outcome = timed_completion(&shared.graph, shared.config).map_err(solve_failed)?;
        debug!(
            order = %shared.graph.concat_ids(&outcome.order),
            workers = shared.config.worker_pool_size,
            base_duration = shared.config.base_duration,
            "timed completion order"
        );
        Ok(outcome.elapsed.to_string())
    }
}

fn invalid_value(key: &str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

impl SolverOptions for Solver {
    /// `workers=<n>`, `base-duration=<n>` or `preset=example|full`
    fn configure(
        shared: &mut Self::SharedData<'_>,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        match key {
            "workers" => {
                let workers: usize = value
                    .parse()
                    .map_err(|e| invalid_value(key, value, format!("{}", e)))?;
                if workers == 0 {
                    return Err(invalid_value(key, value, "at least one worker is required"));
                }
                shared.config.worker_pool_size = workers;
            }
            "base-duration" => {
                shared.config.base_duration = value
                    .parse()
                    .map_err(|e| invalid_value(key, value, format!("{}", e)))?;
            }
            "preset" => {
                shared.config = match value {
                    "example" => ScheduleConfig::EXAMPLE,
                    "full" => ScheduleConfig::FULL_SCALE,
                    _ => return Err(invalid_value(key, value, "expected 'example' or 'full'")),
                };
            }
            _ => return Err(ConfigError::UnknownOption(key.to_string())),
        }
        Ok(())
    }
}

impl SolverExamples for Solver {
    const EXAMPLES: &'static [Example] = &[
        Example {
            part: 1,
            input: EXAMPLE_INPUT,
            expected: "CABDFE",
            options: &[],
        },
        Example {
            part: 2,
            input: EXAMPLE_INPUT,
            expected: "15",
            options: &[("preset", "example")],
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{DynSolver, SolverInstance};

    fn solve(input: &str, part: u8, options: &[(&str, &str)]) -> Result<String, SolveError> {
        let mut shared = <Solver as AocParser>::parse(input).unwrap();
        for (key, value) in options {
            <Solver as aoc_solver::Solver>::configure(&mut shared, key, value).unwrap();
        }
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part)
    }

    #[test]
    fn test_examples_pass() {
        for example in <Solver as aoc_solver::Solver>::examples() {
            assert_eq!(
                solve(example.input, example.part, example.options).unwrap(),
                example.expected,
                "part {}",
                example.part
            );
        }
        assert_eq!(<Solver as aoc_solver::Solver>::examples().len(), 2);
    }

    #[test]
    fn test_default_config_is_full_scale() {
        let shared = <Solver as AocParser>::parse(EXAMPLE_INPUT).unwrap();
        assert_eq!(shared.config, ScheduleConfig::FULL_SCALE);
        // C=63, A=61, F=66 in parallel, then B=62 and D=64, then E=65
        assert_eq!(solve(EXAMPLE_INPUT, 2, &[]).unwrap(), "253");
    }

    #[test]
    fn test_individual_options() {
        assert_eq!(
            solve(EXAMPLE_INPUT, 2, &[("workers", "2"), ("base-duration", "0")]).unwrap(),
            "15"
        );
        // a single worker takes the sum of all durations: 3+1+2+4+6+5
        assert_eq!(
            solve(EXAMPLE_INPUT, 2, &[("workers", "1"), ("base-duration", "0")]).unwrap(),
            "21"
        );
        // the preset overrides earlier options
        assert_eq!(
            solve(EXAMPLE_INPUT, 2, &[("workers", "1"), ("preset", "example")]).unwrap(),
            "15"
        );
    }

    #[test]
    fn test_invalid_options() {
        let mut shared = <Solver as AocParser>::parse(EXAMPLE_INPUT).unwrap();
        let mut configure =
            |key: &str, value: &str| <Solver as aoc_solver::Solver>::configure(&mut shared, key, value);

        assert!(matches!(
            configure("workers", "0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            configure("workers", "many"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            configure("base-duration", "-1"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            configure("preset", "huge"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(
            configure("elves", "5"),
            Err(ConfigError::UnknownOption("elves".to_string()))
        );
    }

    #[test]
    fn test_oversized_base_duration_fails_part_2() {
        let options = [("base-duration", "4294967295")];
        assert_eq!(solve(EXAMPLE_INPUT, 1, &options).unwrap(), "CABDFE");
        let err = solve(EXAMPLE_INPUT, 2, &options).unwrap_err();
        assert!(matches!(err, SolveError::SolveFailed(_)));
        assert!(err.to_string().contains("overflows"), "{}", err);
    }

    #[test]
    fn test_multi_character_ids_in_serial_order() {
        let input = "Step build must be finished before step test can begin.\n\
                     Step build must be finished before step deploy can begin.\n\
                     Step test must be finished before step deploy can begin.";
        assert_eq!(solve(input, 1, &[]).unwrap(), "buildtestdeploy");

        // no duration exists for words in the timed mode
        assert!(matches!(
            solve(input, 2, &[]),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_cycle_fails_both_parts() {
        let input = "Step A must be finished before step B can begin.\n\
                     Step B must be finished before step A can begin.";
        for part in 1..=2 {
            let err = solve(input, part, &[]).unwrap_err();
            assert!(err.to_string().contains("deadlock"), "{}", err);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            <Solver as AocParser>::parse("  \n"),
            Err(ParseError::MissingData(_))
        ));

        let malformed = "Step C must be finished before step A can begin.\nStep C before A";
        match <Solver as AocParser>::parse(malformed) {
            Err(ParseError::InvalidFormat(msg)) => assert!(msg.contains("line 2"), "{}", msg),
            other => panic!("expected invalid format, got {:?}", other),
        }

        let self_loop = "Step A must be finished before step A can begin.";
        match <Solver as AocParser>::parse(self_loop) {
            Err(ParseError::InvalidFormat(msg)) => {
                assert!(msg.contains("line 1"), "{}", msg);
                assert!(msg.contains("own prerequisite"), "{}", msg);
            }
            other => panic!("expected invalid format, got {:?}", other),
        }
    }

    #[test]
    fn test_through_dyn_solver() {
        let mut solver = SolverInstance::<Solver>::new(2018, 7, EXAMPLE_INPUT).unwrap();
        solver.configure("preset", "example").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "CABDFE");
        assert_eq!(solver.solve(2).unwrap().answer, "15");
        assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
        assert_eq!(solver.examples().len(), 2);
    }
}
