//! Command line front end: generate mazes, inspect them and query their connectivity.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rand::{SeedableRng, rngs::StdRng};

use mazeworks::benchmark::{
    self, BenchmarkConfig,
    formatter::{CsvFormatter, PrettyFormatter},
};
use mazeworks::connectivity::{BoolMaze, Reachability, is_connected, is_connected2};
use mazeworks::display::{Highlights, render};
use mazeworks::generation::{IndependentWalls, MazeGenerator, PerfectMaze, RandomWalls};
use mazeworks::grid::{Dimensions, Grid, Pos, validate};
use mazeworks::utils::json::{load_json, save_json};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate grid mazes and query their connectivity",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Random walls, the corners may end up disconnected
    Random {
        #[command(flatten)]
        size: SizeArgs,

        /// Sample both copies of every shared wall separately
        #[arg(long)]
        independent: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Perfect maze: exactly one path between any two cells
    Perfect {
        #[command(flatten)]
        size: SizeArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check whether two cells of a maze file are connected
    Check {
        /// Maze JSON file (array of rows of {top, right, bottom, left})
        #[arg(short, long)]
        input: PathBuf,

        /// Start cell as `x,y` (column, row)
        #[arg(long, default_value = "0,0")]
        start: Pos,

        /// End cell as `x,y`, defaults to the bottom-right cell
        #[arg(long)]
        end: Option<Pos>,
    },

    /// Check corner-to-corner connectivity of a 0/1 cell maze file
    Legacy {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Check the shared-wall invariant of a maze file
    Validate {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Sample many mazes and report timing and structure
    Bench {
        #[arg(short, long, value_enum, default_value_t = GeneratorKind::Random)]
        generator: GeneratorKind,

        #[command(flatten)]
        size: SizeArgs,

        #[arg(long, default_value_t = 100)]
        samples: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Print CSV instead of tables
        #[arg(long)]
        csv: bool,

        /// Also print one row per sample
        #[arg(long)]
        per_sample: bool,
    },
}

#[derive(Args, Debug)]
struct SizeArgs {
    /// Side length of a square maze
    #[arg(short = 'n', long, conflicts_with_all = ["rows", "cols"])]
    size: Option<usize>,

    #[arg(long, requires = "cols")]
    rows: Option<usize>,

    #[arg(long, requires = "rows")]
    cols: Option<usize>,
}

impl SizeArgs {
    fn dimensions(&self) -> Result<Dimensions> {
        match (self.size, self.rows, self.cols) {
            (Some(n), _, _) => Ok(Dimensions::square(n)),
            (None, Some(rows), Some(cols)) => Ok(Dimensions { rows, cols }),
            _ => bail!("either --size or both --rows and --cols are required"),
        }
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Seed for reproducible mazes
    #[arg(long)]
    seed: Option<u64>,

    /// Write the maze as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not print the maze
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GeneratorKind {
    Independent,
    Random,
    Perfect,
}

impl GeneratorKind {
    fn generator(self) -> &'static dyn MazeGenerator {
        match self {
            GeneratorKind::Independent => &IndependentWalls,
            GeneratorKind::Random => &RandomWalls,
            GeneratorKind::Perfect => &PerfectMaze,
        }
    }
}

fn far_corner(grid: &Grid) -> Pos {
    Pos::new(grid.cols().saturating_sub(1), grid.rows().saturating_sub(1))
}

fn reachability_label(connected: bool) -> colored::ColoredString {
    if connected {
        "reachable".green().bold()
    } else {
        "unreachable".red().bold()
    }
}

fn generate(generator: &dyn MazeGenerator, size: &SizeArgs, output: &OutputArgs) -> Result<()> {
    let dimensions = size.dimensions()?;
    let mut rng = match output.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let grid = generator
        .generate(dimensions, &mut rng)
        .with_context(|| format!("generating a {dimensions} {} maze", generator.name()))?;

    let start = Pos::new(0, 0);
    let end = far_corner(&grid);
    if !output.quiet {
        let highlights = Highlights {
            start: Some(start),
            end: Some(end),
            colored: true,
        };
        println!("{}", render(&grid, &highlights));
    }

    let reachability = Reachability::build(&grid);
    let components = reachability.as_ref().map_or(0, Reachability::component_count);
    let connected =
        reachability.is_some_and(|reachability| reachability.is_connected(start, end));
    println!(
        "{} {} maze: {} open walls, {} components, {} to {} {}",
        dimensions,
        generator.name(),
        grid.open_interior_walls(),
        components,
        start,
        end,
        reachability_label(connected),
    );

    if let Some(path) = &output.output {
        save_json(&grid, path)?;
        println!("Saved to {}", path.display());
    }

    Ok(())
}

fn load_grid(path: &Path) -> Result<Grid> {
    load_json(path).with_context(|| format!("loading maze from {}", path.display()))
}

fn check(input: &Path, start: Pos, end: Option<Pos>) -> Result<()> {
    let grid = load_grid(input)?;
    let end = end.unwrap_or_else(|| far_corner(&grid));

    if !grid.contains(start) || !grid.contains(end) {
        println!(
            "{}",
            format!("note: position outside the {} maze", grid.dimensions()).yellow()
        );
    }
    println!("{start} -> {end}: {}", reachability_label(is_connected2(&grid, start, end)));
    Ok(())
}

fn legacy(input: &Path) -> Result<()> {
    let maze: BoolMaze = load_json(input)?;
    let rows = maze.len();
    let cols = maze.first().map_or(0, Vec::len);

    println!(
        "{} -> {}: {}",
        Pos::new(0, 0),
        Pos::new(cols.saturating_sub(1), rows.saturating_sub(1)),
        reachability_label(is_connected(&maze)),
    );
    Ok(())
}

fn check_invariant(input: &Path) -> Result<()> {
    let grid = load_grid(input)?;
    validate(&grid).with_context(|| format!("{} is not a valid maze", input.display()))?;

    println!("{} {} maze is {}", input.display(), grid.dimensions(), "valid".green().bold());
    Ok(())
}

fn bench(
    kind: GeneratorKind,
    size: &SizeArgs,
    config: &BenchmarkConfig,
    csv: bool,
    per_sample: bool,
) -> Result<()> {
    let generator = kind.generator();
    let dimensions = size.dimensions()?;

    if !csv {
        println!(
            "Sampling {} {} mazes of size {}...",
            config.samples,
            generator.name(),
            dimensions
        );
    }
    let outcomes = benchmark::run(generator, dimensions, config)?;
    let summary = benchmark::summarize(generator, dimensions, &outcomes);

    if csv {
        if per_sample {
            print!("{}", CsvFormatter::format(&outcomes)?);
        } else {
            print!("{}", CsvFormatter::format(&[summary])?);
        }
    } else {
        if per_sample {
            println!("{}", PrettyFormatter::format(&outcomes));
        }
        println!("{}", PrettyFormatter::format(&[summary]));
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Random {
            size,
            independent,
            output,
        } => {
            let kind = if independent {
                GeneratorKind::Independent
            } else {
                GeneratorKind::Random
            };
            generate(kind.generator(), &size, &output)
        }
        Command::Perfect { size, output } => {
            generate(GeneratorKind::Perfect.generator(), &size, &output)
        }
        Command::Check { input, start, end } => check(&input, start, end),
        Command::Legacy { input } => legacy(&input),
        Command::Validate { input } => check_invariant(&input),
        Command::Bench {
            generator,
            size,
            samples,
            seed,
            csv,
            per_sample,
        } => bench(
            generator,
            &size,
            &BenchmarkConfig { samples, seed },
            csv,
            per_sample,
        ),
    }
}
