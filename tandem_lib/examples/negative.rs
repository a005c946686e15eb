/// Writes the color negative of a bitmap image to a new file.
extern crate tandem_lib;

use std::path::PathBuf;

use clap::Parser;

use tandem_lib::filter::negative::negative;
use tandem_lib::raster::Raster;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bitmap file to read
    input: PathBuf,
    /// Bitmap file to write
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let image = Raster::open(&args.input)?;
    negative(&image).save(&args.output)?;
    Ok(())
}
