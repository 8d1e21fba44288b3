use bitevo::logging::GenerationLog;
use bitevo::{
    GeneticConfig, IdenticalOffspringPolicy, Population, PopulationConfig, SegmentTable,
    TraitPair,
};

use std::num::NonZeroUsize;

const POPULATION_SIZE: usize = 16;
const MUTATION_RATE: f32 = 0.02;
const GENERATIONS: usize = 10;

// Terminal columns per fitness point in the bar charts.
const BAR_SCALE: f32 = 3.0;

/// Motors are characterised by power and weight.
fn motor_table() -> SegmentTable {
    SegmentTable::new(
        3,
        vec![
            TraitPair::new(2.0, 3.0),
            TraitPair::new(4.0, 3.5),
            TraitPair::new(6.0, 4.0),
            TraitPair::new(7.0, 5.0),
            TraitPair::new(8.0, 4.5),
            TraitPair::new(10.0, 5.0),
            TraitPair::new(12.0, 6.0),
            TraitPair::new(14.0, 7.5),
        ],
    )
    .expect("motor table covers every 3-symbol segment value")
}

/// Batteries are characterised by range and weight.
fn battery_table() -> SegmentTable {
    SegmentTable::new(
        3,
        vec![
            TraitPair::new(3.0, 5.0),
            TraitPair::new(6.0, 6.5),
            TraitPair::new(9.0, 7.0),
            TraitPair::new(10.0, 7.0),
            TraitPair::new(12.0, 7.5),
            TraitPair::new(15.0, 8.0),
            TraitPair::new(18.0, 10.0),
            TraitPair::new(21.0, 12.5),
        ],
    )
    .expect("battery table covers every 3-symbol segment value")
}

fn main() {
    let genetic_config = GeneticConfig::new(vec![motor_table(), battery_table()], MUTATION_RATE)
        .expect("powertrain configuration is valid");
    let population_config = PopulationConfig {
        size: NonZeroUsize::new(POPULATION_SIZE).unwrap(),
        identical_offspring: IdenticalOffspringPolicy::Abort,
    };

    let mut population = match Population::new(population_config, genetic_config) {
        Ok(population) => population,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let history = match population.run(GENERATIONS) {
        Ok(history) => history,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    for log in history.iter() {
        show_generation(log);
    }

    let (champion, fitness) = population.champion();
    println!(
        "best design after {} generations: {} (fitness {}), motor variant {}, battery variant {}",
        GENERATIONS,
        champion,
        fitness,
        champion.segment_value(0, 3),
        champion.segment_value(3, 3),
    );
}

/// Prints one generation as a horizontal bar chart, lowest fitness
/// first.
fn show_generation(log: &GenerationLog) {
    println!("Generation {}", log.generation_number + 1);
    let mut members = log.members.clone();
    members.sort_by(|(_, a), (_, b)| a.partial_cmp(b).expect("fitness is never NaN"));
    for (chromosome, fitness) in &members {
        println!(
            "  {} {:>5.1} {}",
            chromosome,
            fitness,
            "#".repeat((fitness * BAR_SCALE).round() as usize)
        );
    }
    println!(
        "  fitness: max {:.1}, min {:.1}, mean {:.2}, median {:.2}",
        log.fitness.maximum, log.fitness.minimum, log.fitness.mean, log.fitness.median
    );
    println!();
}
