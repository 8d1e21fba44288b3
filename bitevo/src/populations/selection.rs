use crate::genomics::Chromosome;

use rand::prelude::Rng;

/// Spins the roulette wheel once: draws a pivot uniformly from
/// `[0, total_fitness)` and walks the members in enumeration order,
/// accumulating fitness, returning the index of the first member
/// with positive fitness whose cumulative fitness meets the pivot.
/// The probability of drawing member `i` is
/// `fitness_i / total_fitness`; zero-fitness members are never
/// drawn while any fitness is positive.
///
/// When total fitness is zero the wheel has no weight anywhere and
/// the draw degenerates; the first member in enumeration order is
/// returned so the caller never divides by zero or walks off the
/// end of the member list.
pub(super) fn roulette_spin<R: Rng>(members: &[(Chromosome, f32)], rng: &mut R) -> usize {
    let total: f32 = members.iter().map(|(_, fitness)| fitness).sum();
    if total <= 0.0 {
        return 0;
    }
    let pivot = rng.gen::<f32>() * total;
    let mut accumulated = 0.0;
    for (i, (_, fitness)) in members.iter().enumerate() {
        accumulated += fitness;
        if *fitness > 0.0 && accumulated >= pivot {
            return i;
        }
    }
    // The last positive member accumulates the full total, which
    // meets any pivot, so the walk cannot fall through.
    unreachable!("roulette walk passed the full wheel")
}
