//! Plots append-only proof size and verification time against the new
//! dictionary size.
extern crate aadplot;
extern crate structopt;

use aadplot::{cli, pipeline};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "plot-append-only-proof")]
#[structopt(about = "Plot append-only proof size and verification time.")]
struct Opt {
    /// TOML file overriding the default chart style.
    #[structopt(short = "s", long = "style", parse(from_os_str))]
    style: Option<PathBuf>,

    /// Where the chart is written, must end in `.png`.
    #[structopt(parse(from_os_str))]
    output: PathBuf,

    /// Benchmark logs with `oldDictSize,newDictSize,proofBytes,verifyUsec`.
    #[structopt(parse(from_os_str), required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let opt: Opt = cli::parse_args();
    cli::init_logger();

    let result = cli::run(&opt.output, opt.style.as_ref().map(|p| p.as_path()), || {
        pipeline::append_only_proof(&opt.inputs)
    });
    cli::exit(result)
}
