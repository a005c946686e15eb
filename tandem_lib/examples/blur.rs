/// Box-blurs a bitmap image, optionally splitting the rows across worker
/// threads.
extern crate tandem_lib;

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use tandem_lib::filter::blur::{blur, blur_parallel};
use tandem_lib::raster::Raster;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bitmap file to read
    input: PathBuf,
    /// Bitmap file to write
    output: PathBuf,
    /// Blur radius in pixels
    radius: NonZeroUsize,
    /// Worker threads to split the rows across
    #[arg(short, long, default_value = "1")]
    threads: NonZeroUsize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let image = Raster::open(&args.input)?;
    let blurred = if args.threads.get() == 1 {
        blur(&image, args.radius.get())
    } else {
        blur_parallel(&image, args.radius.get(), args.threads.get())
    };
    blurred.save(&args.output)?;
    Ok(())
}
