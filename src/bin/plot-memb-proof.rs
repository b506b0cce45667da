//! Plots the total membership proof size, one line per number of values.
extern crate aadplot;
extern crate structopt;

use aadplot::{cli, pipeline};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "plot-memb-proof")]
#[structopt(about = "Plot membership proof sizes.")]
struct Opt {
    /// TOML file overriding the default chart style.
    #[structopt(short = "s", long = "style", parse(from_os_str))]
    style: Option<PathBuf>,

    /// Chart title.
    #[structopt(short = "t", long = "title")]
    title: Option<String>,

    /// Where the chart is written, must end in `.png`.
    #[structopt(parse(from_os_str))]
    output: PathBuf,

    /// Benchmark logs with
    /// `dictSize,numValues,forestBytes,frontierBytes,totalBytes,verifyUsec`.
    #[structopt(parse(from_os_str), required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let opt: Opt = cli::parse_args();
    cli::init_logger();

    let result = cli::run(&opt.output, opt.style.as_ref().map(|p| p.as_path()), || {
        pipeline::membership_proof(&opt.inputs, opt.title.as_ref().map(|t| t.as_str()))
    });
    cli::exit(result)
}
