//! Plots the time to append a batch against the dictionary size.
extern crate aadplot;
extern crate structopt;

use aadplot::{cli, pipeline};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "plot-append-times")]
#[structopt(about = "Plot append times of a single batch size.")]
struct Opt {
    /// Also draw the time of the last append, not only the cumulative average.
    #[structopt(long = "all")]
    all: bool,

    /// TOML file overriding the default chart style.
    #[structopt(short = "s", long = "style", parse(from_os_str))]
    style: Option<PathBuf>,

    /// Where the chart is written, must end in `.png`.
    #[structopt(parse(from_os_str))]
    output: PathBuf,

    /// Batch size shown in the title.
    batch_size: String,

    /// Benchmark logs with `dictSize,batchSize,appendTimeMillisec`.
    #[structopt(parse(from_os_str), required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let opt: Opt = cli::parse_args();
    cli::init_logger();

    let result = cli::run(&opt.output, opt.style.as_ref().map(|p| p.as_path()), || {
        pipeline::append_times(&opt.inputs, &opt.batch_size, opt.all)
    });
    cli::exit(result)
}
