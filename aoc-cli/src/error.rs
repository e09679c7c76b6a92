//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    #[error("{0}")]
    Executor(#[from] ArcExecutorError),

    /// Raised after reporting, so every result is still printed
    #[error("{0} answer(s) did not match the expected value")]
    WrongAnswers(usize),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    #[error("Channel send error")]
    ChannelSend,

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// A worker thread panicked while solving
    #[error("Solver for {year}/{day:02} panicked")]
    Panicked { year: u16, day: u8 },

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merges two errors into one `Multiple`, flattening either side that is
    /// already a `Multiple` and keeping first-then-second order.
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Errors reading inputs and expected answers from the input directory
#[derive(Error, Debug)]
pub enum InputStoreError {
    #[error("no input file at {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(err: &ArcExecutorError) -> usize {
        match err.inner() {
            ExecutorError::Multiple(v) => v.len(),
            _ => 1,
        }
    }

    #[test]
    fn combine_flattens_multiples() {
        let a: ArcExecutorError = ExecutorError::ChannelSend.into();
        let b: ArcExecutorError = ExecutorError::Panicked { year: 2024, day: 16 }.into();
        let c: ArcExecutorError = ExecutorError::ThreadPool("no threads".into()).into();

        let ab = ArcExecutorError::combine(a.clone(), b.clone());
        assert_eq!(count(&ab), 2);

        let abc = ArcExecutorError::combine(ab.clone(), c.clone());
        assert_eq!(count(&abc), 3);

        let cab = ArcExecutorError::combine(c, ab.clone());
        assert_eq!(count(&cab), 3);

        let abab = ArcExecutorError::combine(ab.clone(), ab);
        assert_eq!(count(&abab), 4);
        assert_eq!(abab.to_string(), "Multiple errors occurred (4 total)");
    }

    #[test]
    fn combine_opt_without_existing_is_identity() {
        let a: ArcExecutorError = ExecutorError::Panicked { year: 2024, day: 21 }.into();
        let combined = ArcExecutorError::combine_opt(None, a);
        assert_eq!(combined.to_string(), "Solver for 2024/21 panicked");
    }
}
