//! Sampling benchmark for the maze generators.
//!
//! Each sample generates one maze from its own seeded RNG and records how long the
//! generation took together with a few structural measurements. Samples are
//! independent and run on the rayon thread pool.

pub mod formatter;

use std::time::{Duration, Instant};

use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use tabled::Tabled;

use crate::{
    connectivity::Reachability,
    error::MazeError,
    generation::MazeGenerator,
    grid::{Dimensions, Pos, validate},
};
use formatter::{Formattable, format_duration, format_duration_csv, format_ratio};

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub samples: usize,
    /// Sample `i` is generated from `seed + i`.
    pub seed: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            seed: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Tabled)]
pub struct Outcome {
    #[tabled(rename = "Sample")]
    pub sample: usize,
    #[tabled(rename = "Time", display_with = "format_duration")]
    pub time: Duration,
    #[tabled(rename = "Open walls")]
    pub open_walls: usize,
    #[tabled(rename = "Components")]
    pub components: usize,
    #[tabled(rename = "Valid")]
    pub valid: bool,
    #[tabled(rename = "Corners connected")]
    pub corners_connected: bool,
}

impl Formattable for Outcome {
    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.sample.to_string(),
            format_duration_csv(&self.time),
            self.open_walls.to_string(),
            self.components.to_string(),
            self.valid.to_string(),
            self.corners_connected.to_string(),
        ]
    }

    fn csv_headers() -> Vec<&'static str> {
        vec![
            "sample",
            "time_ns",
            "open_walls",
            "components",
            "valid",
            "corners_connected",
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Tabled)]
pub struct Summary {
    #[tabled(rename = "Generator")]
    pub generator: &'static str,
    #[tabled(rename = "Size")]
    pub dimensions: Dimensions,
    #[tabled(rename = "Samples")]
    pub samples: usize,
    #[tabled(rename = "Mean time", display_with = "format_duration")]
    pub mean_time: Duration,
    #[tabled(rename = "Mean open walls", display_with = "format_ratio")]
    pub mean_open_walls: f64,
    #[tabled(rename = "Mean components", display_with = "format_ratio")]
    pub mean_components: f64,
    #[tabled(rename = "Valid", display_with = "format_ratio")]
    pub valid_ratio: f64,
    #[tabled(rename = "Corners connected", display_with = "format_ratio")]
    pub connected_ratio: f64,
}

impl Formattable for Summary {
    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.generator.to_string(),
            self.dimensions.rows.to_string(),
            self.dimensions.cols.to_string(),
            self.samples.to_string(),
            format_duration_csv(&self.mean_time),
            self.mean_open_walls.to_string(),
            self.mean_components.to_string(),
            self.valid_ratio.to_string(),
            self.connected_ratio.to_string(),
        ]
    }

    fn csv_headers() -> Vec<&'static str> {
        vec![
            "generator",
            "rows",
            "cols",
            "samples",
            "mean_time_ns",
            "mean_open_walls",
            "mean_components",
            "valid_ratio",
            "connected_ratio",
        ]
    }
}

fn run_sample(
    generator: &dyn MazeGenerator,
    dimensions: Dimensions,
    sample: usize,
    seed: u64,
) -> Result<Outcome, MazeError> {
    let mut rng = StdRng::seed_from_u64(seed);

    let start_time = Instant::now();
    let grid = generator.generate(dimensions, &mut rng)?;
    let time = start_time.elapsed();

    let reachability = Reachability::build(&grid);
    let far_corner = Pos::new(grid.cols().saturating_sub(1), grid.rows().saturating_sub(1));

    Ok(Outcome {
        sample,
        time,
        open_walls: grid.open_interior_walls(),
        components: reachability.as_ref().map_or(0, Reachability::component_count),
        valid: validate(&grid).is_ok(),
        corners_connected: reachability
            .is_some_and(|reachability| reachability.is_connected(Pos::new(0, 0), far_corner)),
    })
}

/// Generates `config.samples` mazes of the given size. Outcomes are in sample order.
pub fn run(
    generator: &dyn MazeGenerator,
    dimensions: Dimensions,
    config: &BenchmarkConfig,
) -> Result<Vec<Outcome>, MazeError> {
    (0..config.samples)
        .into_par_iter()
        .map(|sample| {
            run_sample(
                generator,
                dimensions,
                sample,
                config.seed.wrapping_add(sample as u64),
            )
        })
        .collect()
}

pub fn summarize(
    generator: &dyn MazeGenerator,
    dimensions: Dimensions,
    outcomes: &[Outcome],
) -> Summary {
    let samples = outcomes.len();
    let mean = |value: fn(&Outcome) -> f64| {
        if samples == 0 {
            0.0
        } else {
            outcomes.iter().map(value).sum::<f64>() / samples as f64
        }
    };

    let total_time: Duration = outcomes.iter().map(|outcome| outcome.time).sum();

    Summary {
        generator: generator.name(),
        dimensions,
        samples,
        mean_time: total_time / samples.max(1) as u32,
        mean_open_walls: mean(|outcome| outcome.open_walls as f64),
        mean_components: mean(|outcome| outcome.components as f64),
        valid_ratio: mean(|outcome| f64::from(u8::from(outcome.valid))),
        connected_ratio: mean(|outcome| f64::from(u8::from(outcome.corners_connected))),
    }
}
