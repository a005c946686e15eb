//! Producer and consumer tasks for the number statistics pipeline.
//!
//! A [`NumberReader`] parses doubles out of a line-oriented source and pushes
//! them into a shared [`BlockingQueue`]; a [`StatsPrinter`] drains the queue
//! and writes a statistics report after every value. Each side runs on its
//! own thread and the queue's close signal carries the end of input from one
//! to the other.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use log::debug;

use crate::queue::BlockingQueue;
use crate::stats::RollingStats;

/// Number of recent values the printer reports on.
pub const WINDOW_SIZE: usize = 5;

/// How a [`StatsPrinter`] renders each report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// The four-line `Max/Min/Average/Last five` text block.
    #[default]
    Text,
    /// One JSON object per report line.
    Json,
}

/// Reads numbers line by line from a source and feeds them into a queue.
///
/// One value per line: the first whitespace-separated token is parsed as an
/// `f64` and anything unparseable is skipped, as are blank lines. The queue
/// is closed when the source runs dry, so the consumer always sees an end of
/// stream.
pub struct NumberReader<R> {
    source: R,
    queue: Arc<BlockingQueue<f64>>,
}

impl<R: BufRead> NumberReader<R> {
    /// Creates a reader feeding `queue` from `source`.
    pub fn new(source: R, queue: Arc<BlockingQueue<f64>>) -> Self {
        NumberReader { source, queue }
    }

    /// Runs until the source is exhausted, then closes the queue.
    ///
    /// Returns the number of values pushed. The queue is closed on every exit
    /// path, including read errors, so a waiting consumer is never stranded.
    /// If some other thread closes the queue first, the reader stops early:
    /// there is nobody left to read for.
    pub fn run(mut self) -> io::Result<usize> {
        let mut line = String::new();
        let mut produced = 0;
        loop {
            line.clear();
            let bytes = match self.source.read_line(&mut line) {
                Ok(bytes) => bytes,
                Err(err) => {
                    self.queue.close();
                    return Err(err);
                }
            };
            if bytes == 0 {
                break;
            }
            let token = match line.split_whitespace().next() {
                Some(token) => token,
                None => continue,
            };
            match token.parse::<f64>() {
                Ok(value) => {
                    if !self.queue.push(value) {
                        break;
                    }
                    produced += 1;
                }
                Err(_) => debug!("skipping non-numeric input {:?}", token),
            }
        }
        self.queue.close();
        Ok(produced)
    }
}

/// Drains a queue of numbers and writes a statistics report for each one.
///
/// Reports cover the last [`WINDOW_SIZE`] values seen. The printer blocks on
/// the queue while it is empty and returns once the producer has closed it
/// and the remaining values are drained.
pub struct StatsPrinter<W> {
    sink: W,
    queue: Arc<BlockingQueue<f64>>,
    stats: RollingStats,
    format: ReportFormat,
}

impl<W: Write> StatsPrinter<W> {
    /// Creates a printer draining `queue` into `sink`.
    pub fn new(sink: W, queue: Arc<BlockingQueue<f64>>, format: ReportFormat) -> Self {
        StatsPrinter {
            sink,
            queue,
            stats: RollingStats::new(WINDOW_SIZE),
            format,
        }
    }

    /// Runs until the queue signals end of stream.
    ///
    /// Returns the number of values consumed.
    pub fn run(mut self) -> io::Result<usize> {
        let mut consumed = 0;
        while let Some(value) = self.queue.pop() {
            self.stats.push(value);
            consumed += 1;
            // the window is never empty here, a value was just pushed
            let summary = self.stats.summary().unwrap();
            match self.format {
                ReportFormat::Text => {
                    writeln!(self.sink, "Max: {:.2}", summary.max)?;
                    writeln!(self.sink, "Min: {:.2}", summary.min)?;
                    writeln!(self.sink, "Average: {:.2}", summary.average)?;
                    write!(self.sink, "Last five: ")?;
                    for value in &summary.values {
                        write!(self.sink, "{:.2} ", value)?;
                    }
                    writeln!(self.sink)?;
                }
                ReportFormat::Json => {
                    let line = serde_json::to_string(&summary)?;
                    writeln!(self.sink, "{}", line)?;
                }
            }
        }
        self.sink.flush()?;
        Ok(consumed)
    }
}
