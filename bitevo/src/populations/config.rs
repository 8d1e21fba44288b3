use std::num::NonZeroUsize;

/// Configuration data for population initialization and
/// generation transitions.
#[derive(Clone, Debug)]
pub struct PopulationConfig {
    /// Number of distinct chromosomes in every generation.
    /// Must be even and at least 2, and may not exceed the number
    /// of distinct chromosomes the configured segments can encode.
    pub size: NonZeroUsize,
    /// Policy applied when a mating produces two identical children.
    pub identical_offspring: IdenticalOffspringPolicy,
}

/// What to do when both children of a mating come out identical.
///
/// Crossover of two distinct parents always yields two distinct
/// children, so this can only happen when mutation flips the
/// children's differing symbols into agreement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdenticalOffspringPolicy {
    /// Stop the run and surface
    /// [`EvolutionError::IdenticalOffspring`].
    ///
    /// [`EvolutionError::IdenticalOffspring`]: super::EvolutionError::IdenticalOffspring
    Abort,
    /// Discard both children and re-attempt the mating with a
    /// fresh crossover and mutation.
    Retry,
}
