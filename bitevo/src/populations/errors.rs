use std::error::Error;
use std::fmt;

/// An error type indicating an invalid population configuration,
/// rejected when the population is constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopulationConfigError {
    /// The configured size cannot hold one mating's offspring.
    SizeTooSmall(usize),
    /// Generations are built two children at a time, so the
    /// configured size must be even.
    SizeNotEven(usize),
    /// The configured size exceeds the number of distinct
    /// chromosomes the segments can encode, so a full generation
    /// of distinct members could never be assembled.
    SizeExceedsSearchSpace { size: usize, capacity: usize },
}

impl fmt::Display for PopulationConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeTooSmall(size) => {
                write!(f, "population size {} is below the minimum of 2", size)
            }
            Self::SizeNotEven(size) => write!(f, "population size {} is not even", size),
            Self::SizeExceedsSearchSpace { size, capacity } => write!(
                f,
                "population size {} exceeds the {} distinct chromosomes the segments encode",
                size, capacity
            ),
        }
    }
}

impl Error for PopulationConfigError {}

/// An error type indicating a failed generation transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvolutionError {
    /// A mating produced two identical children while the
    /// population's policy is
    /// [`IdenticalOffspringPolicy::Abort`].
    ///
    /// [`IdenticalOffspringPolicy::Abort`]: super::IdenticalOffspringPolicy::Abort
    IdenticalOffspring { generation: usize },
}

impl fmt::Display for EvolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdenticalOffspring { generation } => write!(
                f,
                "mating produced two identical children in generation {}",
                generation
            ),
        }
    }
}

impl Error for EvolutionError {}
