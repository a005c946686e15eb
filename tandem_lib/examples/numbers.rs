/// Reads numbers from stdin, one per line, and prints running statistics of
/// the last five after each one. The reading and the printing run on
/// separate threads coupled by a blocking queue; end of input (ctrl-d) shuts
/// the pipeline down cleanly.
extern crate tandem_lib;

use std::io::{self, BufReader};
use std::sync::Arc;
use std::thread;

use clap::Parser;
use log::info;

use tandem_lib::pipeline::{NumberReader, ReportFormat, StatsPrinter};
use tandem_lib::queue::BlockingQueue;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Emit one JSON object per value instead of text blocks
    #[arg(short, long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let format = if args.json {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    };

    let queue = Arc::new(BlockingQueue::new());
    let reader = NumberReader::new(BufReader::new(io::stdin()), queue.clone());
    let printer = StatsPrinter::new(io::stdout(), queue.clone(), format);

    let reader_handle = thread::spawn(move || reader.run());
    let printer_handle = thread::spawn(move || printer.run());

    let produced = reader_handle.join().unwrap()?;
    let consumed = printer_handle.join().unwrap()?;
    info!("pipeline finished: {produced} values in, {consumed} reports out");
    Ok(())
}
