use super::errors::ConfigError;
use super::Chromosome;

use serde::{Deserialize, Serialize};

/// The two trait magnitudes associated with one segment value:
/// a beneficial magnitude that raises fitness, and a costly
/// magnitude that lowers it.
///
/// In the powertrain domain these are power/weight for
/// motor segments and range/weight for battery segments. Both
/// magnitudes must be non-negative and finite; this is enforced
/// when the pair is installed in a [`SegmentTable`].
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct TraitPair {
    pub benefit: f32,
    pub cost: f32,
}

impl TraitPair {
    pub const fn new(benefit: f32, cost: f32) -> TraitPair {
        TraitPair { benefit, cost }
    }
}

/// The encoding table for one gene segment: a total mapping from
/// every value a segment of `symbol_count` binary symbols can take
/// to its [`TraitPair`].
///
/// Totality is checked at construction, so lookups never fail for
/// well-formed chromosomes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentTable {
    symbol_count: usize,
    traits: Vec<TraitPair>,
}

impl SegmentTable {
    /// Creates a segment table over `symbol_count`-symbol segments.
    /// `traits` is indexed by segment value (first symbol most
    /// significant) and must hold exactly `2^symbol_count` entries,
    /// all of them non-negative and finite.
    ///
    /// # Examples
    /// ```
    /// use bitevo::{ConfigError, SegmentTable, TraitPair};
    ///
    /// let table = SegmentTable::new(
    ///     2,
    ///     vec![
    ///         TraitPair::new(0.0, 0.0),
    ///         TraitPair::new(1.0, 0.5),
    ///         TraitPair::new(2.0, 1.0),
    ///         TraitPair::new(3.0, 1.5),
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(table.symbol_count(), 2);
    ///
    /// // A table that does not cover its whole segment domain is rejected.
    /// let err = SegmentTable::new(2, vec![TraitPair::new(1.0, 1.0)]).unwrap_err();
    /// assert!(matches!(
    ///     err,
    ///     ConfigError::IncompleteSegmentTable { expected: 4, found: 1, .. }
    /// ));
    /// ```
    pub fn new(symbol_count: usize, traits: Vec<TraitPair>) -> Result<SegmentTable, ConfigError> {
        if symbol_count == 0 {
            return Err(ConfigError::ZeroLengthSegment);
        }
        if symbol_count as u32 >= usize::BITS {
            return Err(ConfigError::SegmentTooLong(symbol_count));
        }
        let expected = 1usize << symbol_count;
        if traits.len() != expected {
            return Err(ConfigError::IncompleteSegmentTable {
                symbol_count,
                expected,
                found: traits.len(),
            });
        }
        for (segment_value, pair) in traits.iter().enumerate() {
            for value in [pair.benefit, pair.cost] {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidTrait {
                        segment_value,
                        value,
                    });
                }
            }
        }
        Ok(SegmentTable {
            symbol_count,
            traits,
        })
    }

    /// Number of binary symbols in segments covered by this table.
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Looks up the trait pair for a segment value.
    ///
    /// # Panics
    /// Panics if `segment_value` is outside the segment domain.
    /// Passing such a value is a caller contract violation: values
    /// read out of a well-formed chromosome are always in range.
    pub fn pair_for(&self, segment_value: usize) -> TraitPair {
        self.traits[segment_value]
    }
}

/// Configuration data for the genetic make-up of a run: the
/// encoding tables of each gene segment, in chromosome order,
/// and the per-symbol mutation rate.
///
/// Replaces process-wide constants so that several independent,
/// reproducible runs can coexist in one process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    segments: Vec<SegmentTable>,
    mutation_rate: f32,
}

impl GeneticConfig {
    /// Creates a validated genetic configuration.
    ///
    /// There must be at least one segment, the segments must add up
    /// to a chromosome of at least two symbols, and `mutation_rate`
    /// must be finite and within `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use bitevo::{GeneticConfig, SegmentTable, TraitPair};
    ///
    /// let table = SegmentTable::new(
    ///     2,
    ///     (0..4).map(|v| TraitPair::new(v as f32, 0.5 * v as f32)).collect(),
    /// )
    /// .unwrap();
    ///
    /// let config = GeneticConfig::new(vec![table.clone(), table], 0.02).unwrap();
    /// assert_eq!(config.chromosome_length(), 4);
    ///
    /// assert!(GeneticConfig::new(vec![], 0.02).is_err());
    /// ```
    pub fn new(segments: Vec<SegmentTable>, mutation_rate: f32) -> Result<GeneticConfig, ConfigError> {
        if segments.is_empty() {
            return Err(ConfigError::NoSegments);
        }
        if !mutation_rate.is_finite() || !(0.0..=1.0).contains(&mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange(mutation_rate));
        }
        let length = segments.iter().map(SegmentTable::symbol_count).sum();
        if length < 2 {
            return Err(ConfigError::ChromosomeTooShort(length));
        }
        Ok(GeneticConfig {
            segments,
            mutation_rate,
        })
    }

    /// The segment tables, in chromosome order.
    pub fn segments(&self) -> &[SegmentTable] {
        &self.segments
    }

    /// Chance of each symbol of an offspring chromosome being
    /// flipped during mutation.
    pub fn mutation_rate(&self) -> f32 {
        self.mutation_rate
    }

    /// Total chromosome length, in symbols.
    pub fn chromosome_length(&self) -> usize {
        self.segments.iter().map(SegmentTable::symbol_count).sum()
    }

    /// Computes the fitness of a chromosome: the sum of the
    /// beneficial trait magnitudes of each of its segments, minus
    /// the sum of the costly ones, clamped at zero.
    ///
    /// Pure and deterministic: equal chromosomes always score
    /// equally under the same configuration.
    ///
    /// # Panics
    /// Panics if the chromosome's length does not match the
    /// configured segments, which is a caller contract violation.
    ///
    /// # Examples
    /// ```
    /// use bitevo::{Chromosome, GeneticConfig, SegmentTable, TraitPair};
    ///
    /// let table = SegmentTable::new(
    ///     2,
    ///     (0..4).map(|v| TraitPair::new(v as f32, 0.5 * v as f32)).collect(),
    /// )
    /// .unwrap();
    /// let config = GeneticConfig::new(vec![table.clone(), table], 0.02).unwrap();
    ///
    /// let best: Chromosome = "1111".parse().unwrap();
    /// assert_eq!(config.evaluate(&best), (3.0 + 3.0) - (1.5 + 1.5));
    ///
    /// // Fitness is clamped at zero, never negative.
    /// let costly = SegmentTable::new(
    ///     2,
    ///     (0..4).map(|v| TraitPair::new(0.0, v as f32)).collect(),
    /// )
    /// .unwrap();
    /// let config = GeneticConfig::new(vec![costly.clone(), costly], 0.02).unwrap();
    /// assert_eq!(config.evaluate(&best), 0.0);
    /// ```
    pub fn evaluate(&self, chromosome: &Chromosome) -> f32 {
        assert_eq!(
            chromosome.len(),
            self.chromosome_length(),
            "chromosome length does not match the configured segments"
        );
        let mut benefit = 0.0;
        let mut cost = 0.0;
        let mut start = 0;
        for table in &self.segments {
            let pair = table.pair_for(chromosome.segment_value(start, table.symbol_count()));
            benefit += pair.benefit;
            cost += pair.cost;
            start += table.symbol_count();
        }
        (benefit - cost).max(0.0)
    }
}
