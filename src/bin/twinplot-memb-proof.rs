//! Plots membership proof size and verification time on twin y-axes.
extern crate aadplot;
extern crate structopt;

use aadplot::{cli, pipeline};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "twinplot-memb-proof")]
#[structopt(about = "Plot membership proof size and verification time.")]
struct Opt {
    /// TOML file overriding the default chart style.
    #[structopt(short = "s", long = "style", parse(from_os_str))]
    style: Option<PathBuf>,

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
        pipeline::membership_twinplot(&opt.inputs)
    });
    cli::exit(result)
}
