use std::fmt::{self, Display, Formatter};

/// Errors reported while assembling a tree, before the first tick.
///
/// A node that could not behave sensibly on any tick (a composite with
/// nothing to tick, a loop that can never complete a repetition) is rejected
/// at construction instead of producing undefined per-tick results.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeBuildError {
    NoChildren,
    ZeroRepetitions,
}

impl Display for TreeBuildError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::NoChildren => write!(fmt, "A composite node requires at least one child"),
            Self::ZeroRepetitions => write!(fmt, "A loop node requires at least one repetition"),
        }
    }
}

impl std::error::Error for TreeBuildError {}

pub type BuildResult<T> = Result<T, TreeBuildError>;
