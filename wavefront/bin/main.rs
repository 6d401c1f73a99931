use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use wavefront::{util, Neighborhood, OccupancyMap, Point, WaveConfig, WaveSearch};

/// Find a path between two cells of an occupancy grid
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Grid to search: a numpy .npy array, a json array of rows, or an image (dark pixels are obstacles)
    map: PathBuf,

    /// Start cell as X,Y
    #[arg(long, value_parser = parse_point)]
    start: Point,

    /// Goal cell as X,Y
    #[arg(long, value_parser = parse_point)]
    goal: Point,

    /// Neighborhood to expand over: neumann or moore
    #[arg(long)]
    neighborhood: Option<Neighborhood>,

    /// Json file with search settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give up after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Write the grid with the path drawn on it to this image
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Print the grid and the cost field to stdout
    #[arg(long)]
    print: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("point must be in X,Y form, got '{s}'"))?;

    let parse = |label: &str, v: &str| {
        v.trim()
            .parse::<i64>()
            .map_err(|_| format!("invalid {label} coordinate '{v}'"))
    };

    Ok(Point::new(parse("x", x)?, parse("y", y)?))
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            WaveConfig::from_json_str(&raw)?
        }
        None => WaveConfig::default(),
    };
    if let Some(neighborhood) = args.neighborhood {
        config.neighborhood = neighborhood;
    }
    if let Some(max) = args.max_expansions {
        config.max_expansions = Some(max);
    }

    let grid = util::load_grid(&args.map)
        .with_context(|| format!("loading grid {}", args.map.display()))?;
    info!("loaded {}x{} grid", grid.columns(), grid.rows());

    let search = WaveSearch::with_config(args.start, args.goal, config)?;
    let field = search.search(&grid)?;

    if args.print {
        println!("{}", grid);
        println!("{}", field.costs);
    }

    let result = search.build_path(&field, &grid)?;
    println!(
        "path of {} points, cost {:.3}, length {:.3}",
        result.len(),
        result.total_cost,
        result.euclidean_length()
    );

    if let Some(output) = &args.output {
        util::render_path(&grid, &result)
            .save(output)
            .with_context(|| format!("writing {}", output.display()))?;
        info!("wrote {}", output.display());
    }

    Ok(())
}
