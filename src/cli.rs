//! Shared plumbing of the plotting binaries.

use chart::{Chart, PngRenderer, Render};
use chrono;
use env_logger;
use error_chain::ChainedError;
use errors::*;
use log::LevelFilter;
use setting::ChartStyle;
use std::env;
use std::io::Write;
use std::path::Path;
use std::process;
use structopt::StructOpt;
use structopt::clap::ErrorKind as ClapErrorKind;

/// Installs a logger that prefixes every line with a timestamp. Defaults to
/// `info`; `RUST_LOG` overrides it.
pub fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder.format(|buf, record| {
        let t = chrono::Local::now();
        writeln!(buf, "{} {}", t.format("%Y-%m-%d %H:%M:%S%.3f"), record.args())
    });
    builder.filter_level(LevelFilter::Info);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

/// Parses the command line. Missing arguments print the usage and exit with
/// status 0.
pub fn parse_args<T: StructOpt>() -> T {
    match T::from_iter_safe(env::args_os()) {
        Ok(opt) => opt,
        Err(ref e) if e.kind == ClapErrorKind::MissingRequiredArgument => {
            let _ = T::clap().print_help();
            println!();
            process::exit(0);
        }
        Err(e) => e.exit(),
    }
}

/// Only PNG output is supported. The file name must end in `.png`; a file
/// named just `.png` is fine.
pub fn check_output_path(out: &Path) -> Result<()> {
    let name = out.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if name.ends_with(".png") {
        Ok(())
    } else {
        bail!(ErrorKind::InvalidOutputPath(out.display().to_string()))
    }
}

/// Checks the output path, builds the chart and hands it to `renderer`.
/// Nothing is written unless the chart was built successfully.
pub fn run_with<R, F>(renderer: &R, out: &Path, build: F) -> Result<()>
where
    R: Render,
    F: FnOnce() -> Result<Chart>,
{
    check_output_path(out)?;
    let chart = build()?;
    renderer.render(&chart, out)?;
    info!("All done! See {}", out.display());
    Ok(())
}

/// `run_with` a PNG renderer using the default style, or the one read from
/// `style`.
pub fn run<F>(out: &Path, style: Option<&Path>, build: F) -> Result<()>
where
    F: FnOnce() -> Result<Chart>,
{
    check_output_path(out)?;
    let style = match style {
        Some(path) => ChartStyle::init(path)?,
        None => ChartStyle::default(),
    };
    run_with(&PngRenderer::new(style), out, build)
}

/// Exit status of a finished run.
pub fn exit_code(result: &Result<()>) -> i32 {
    match *result {
        Ok(()) => 0,
        Err(ref e) => match *e.kind() {
            ErrorKind::InvalidOutputPath(_) => 1,
            _ => 2,
        },
    }
}

/// Reports the outcome of a run and terminates the process.
pub fn exit(result: Result<()>) -> ! {
    let code = exit_code(&result);
    if let Err(e) = result {
        match *e.kind() {
            ErrorKind::InvalidOutputPath(_) => println!("ERROR: {}", e),
            _ => eprint!("{}", e.display_chain()),
        }
    }
    process::exit(code)
}
