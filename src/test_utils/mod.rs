//! Shared test utilities for dinescope.
//!
//! Compiled into the library rather than behind `cfg(test)` so the
//! integration suites and benches share the same fixtures and log
//! capture as in-module unit tests.

pub mod fixtures;
pub mod logging;

/// One row of a table-driven test.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

/// Run table-driven cases against a pure function, reporting the first
/// mismatching row by name.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug + Clone,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E,
{
    for case in cases {
        let actual = test_fn(case.input.clone());
        if actual != case.expected {
            return Err(format!(
                "case '{}': input {:?} expected {:?}, got {:?}",
                case.name, case.input, case.expected, actual
            ));
        }
    }
    Ok(())
}
