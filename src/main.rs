use clap::Parser;
use log::warn;
use snafu::ErrorCompat;

mod args;
mod dashboard;

use crate::args::Args;

fn main() {
    let args = Args::parse();
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::init();
    }

    let res = match (args.config.clone(), args.input.clone()) {
        (Some(config_path), _) => {
            dashboard::run_dashboard(config_path, args.reference.clone(), args.out.clone())
        }
        (None, Some(input_path)) => {
            dashboard::run_single(input_path, args.input_type.clone(), args.out.clone())
        }
        (None, None) => {
            eprintln!("Either --config or --input must be provided. See --help for the details.");
            std::process::exit(2);
        }
    };

    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        } else {
            eprintln!("No trace found");
        }
        std::process::exit(1);
    }
}
