use std::error::Error;
use std::fmt;

/// An error type indicating an invalid genetic configuration.
///
/// All variants are construction-time failures: a [`GeneticConfig`]
/// or [`SegmentTable`] that would misbehave mid-run is rejected
/// before any population can be built from it.
///
/// [`GeneticConfig`]: crate::GeneticConfig
/// [`SegmentTable`]: crate::SegmentTable
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The configuration defines no gene segments.
    NoSegments,
    /// A segment table was declared with zero symbols.
    ZeroLengthSegment,
    /// A segment table was declared with more symbols than
    /// segment values are addressable.
    SegmentTooLong(usize),
    /// A segment table does not cover every value of its
    /// segment domain.
    IncompleteSegmentTable {
        symbol_count: usize,
        expected: usize,
        found: usize,
    },
    /// A trait magnitude was negative or non-finite.
    InvalidTrait { segment_value: usize, value: f32 },
    /// The mutation rate was outside [0, 1] or non-finite.
    MutationRateOutOfRange(f32),
    /// The configured segments add up to fewer than two symbols,
    /// leaving no interior crossover cut point.
    ChromosomeTooShort(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSegments => write!(f, "genetic configuration declares no gene segments"),
            Self::ZeroLengthSegment => write!(f, "segment table declared with zero symbols"),
            Self::SegmentTooLong(symbol_count) => write!(
                f,
                "segment table declared with {} symbols, which exceeds the addressable domain",
                symbol_count
            ),
            Self::IncompleteSegmentTable {
                symbol_count,
                expected,
                found,
            } => write!(
                f,
                "segment table for {}-symbol segments has {} entries, expected {}",
                symbol_count, found, expected
            ),
            Self::InvalidTrait {
                segment_value,
                value,
            } => write!(
                f,
                "trait magnitude {} for segment value {} is negative or non-finite",
                value, segment_value
            ),
            Self::MutationRateOutOfRange(rate) => {
                write!(f, "mutation rate {} is outside the range [0, 1]", rate)
            }
            Self::ChromosomeTooShort(length) => write!(
                f,
                "configured chromosome length {} leaves no interior crossover point",
                length
            ),
        }
    }
}

impl Error for ConfigError {}

/// An error type indicating a malformed chromosome literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseChromosomeError {
    /// Index of the offending character.
    pub position: usize,
    /// The offending character itself.
    pub symbol: char,
}

impl fmt::Display for ParseChromosomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid symbol {:?} at position {} in chromosome literal",
            self.symbol, self.position
        )
    }
}

impl Error for ParseChromosomeError {}
