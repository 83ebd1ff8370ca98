extern crate clap;

use clap::{ArgAction, Parser, Subcommand};

use benchmarks::accuracy::run_case;
use benchmarks::data::{NormalGroups, UniformGroups};

const DEFAULT_NUM_ENTRIES: usize = 100_000;
const DEFAULT_RESOLUTION: f64 = 1.0;
const DEFAULT_MAX_TIME: i64 = 1000;
const DEFAULT_NUM_GROUPS: u32 = 16;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Measure quantile accuracy against uniformly distributed synthetic values
    Uniform {
        #[clap(short, long, value_parser, default_value_t = DEFAULT_NUM_ENTRIES)]
        num_entries: usize,

        #[clap(short, long, value_parser, default_value_t = DEFAULT_RESOLUTION)]
        resolution: f64,

        #[clap(short, long, value_parser, default_value_t = DEFAULT_MAX_TIME)]
        max_time: i64,

        #[clap(short = 'g', long, value_parser, default_value_t = DEFAULT_NUM_GROUPS)]
        num_groups: u32,

        #[clap(long, value_parser, default_value_t = 1000.0)]
        value_range: f64,

        #[clap(short, long, action = ArgAction::SetTrue)]
        verbose: bool,
    },

    /// Measure quantile accuracy against normally distributed synthetic values
    Normal {
        #[clap(short, long, value_parser, default_value_t = DEFAULT_NUM_ENTRIES)]
        num_entries: usize,

        #[clap(short, long, value_parser, default_value_t = DEFAULT_RESOLUTION)]
        resolution: f64,

        #[clap(short, long, value_parser, default_value_t = DEFAULT_MAX_TIME)]
        max_time: i64,

        #[clap(short = 'g', long, value_parser, default_value_t = DEFAULT_NUM_GROUPS)]
        num_groups: u32,

        #[clap(long, value_parser, default_value_t = 500.0)]
        mean: f64,

        #[clap(long, value_parser, default_value_t = 100.0)]
        std_dev: f64,

        #[clap(short, long, action = ArgAction::SetTrue)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Command::Uniform {
            num_entries,
            resolution,
            max_time,
            num_groups,
            value_range,
            verbose,
        } => {
            run_case(
                *num_entries,
                *resolution,
                *max_time,
                &UniformGroups::new(*num_groups, *value_range),
                *verbose,
            );
        }
        Command::Normal {
            num_entries,
            resolution,
            max_time,
            num_groups,
            mean,
            std_dev,
            verbose,
        } => {
            run_case(
                *num_entries,
                *resolution,
                *max_time,
                &NormalGroups::new(*num_groups, *mean, *std_dev),
                *verbose,
            );
        }
    }
}
