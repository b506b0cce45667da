//! Plots the cumulative average append time of every batch size on one
//! chart.
extern crate aadplot;
extern crate structopt;

use aadplot::{cli, pipeline};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "plot-batched-appends")]
#[structopt(about = "Compare append times across batch sizes.")]
struct Opt {
    /// TOML file overriding the default chart style.
    #[structopt(short = "s", long = "style", parse(from_os_str))]
    style: Option<PathBuf>,

    /// Where the chart is written, must end in `.png`.
    #[structopt(parse(from_os_str))]
    output: PathBuf,

    /// Benchmark logs with `dictSize,batchSize,appendTimeMillisec`.
    #[structopt(parse(from_os_str), required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let opt: Opt = cli::parse_args();
    cli::init_logger();

    let result = cli::run(&opt.output, opt.style.as_ref().map(|p| p.as_path()), || {
        pipeline::batched_appends(&opt.inputs)
    });
    cli::exit(result)
}
