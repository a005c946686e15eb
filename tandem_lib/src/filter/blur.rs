//! Box blur, sequential and banded across worker threads.

use std::ops::Range;
use std::thread;

use log::debug;

use super::row_bands;
use crate::raster::{Raster, Rgb};

/// Returns a blurred copy of `image`.
///
/// Each output pixel is the channel-wise mean of every in-bounds pixel within
/// the square window reaching `radius` pixels out; the window is clamped at
/// the image edges, so border pixels average fewer neighbors. `radius == 0`
/// copies the image unchanged.
pub fn blur(image: &Raster, radius: usize) -> Raster {
    let mut out = Raster::new(image.width(), image.height());
    let band = blur_band(image, 0..image.height(), radius);
    write_band(&mut out, 0..image.height(), &band);
    out
}

/// Like [`blur`], computed by `workers` threads each blurring one band of
/// rows.
///
/// The rows are split with [`row_bands`](super::row_bands); every worker
/// reads the shared input and produces its own output band, so the result is
/// pixel-identical to the sequential [`blur`] for any worker count.
pub fn blur_parallel(image: &Raster, radius: usize, workers: usize) -> Raster {
    let mut out = Raster::new(image.width(), image.height());
    thread::scope(|scope| {
        let mut handles = Vec::new();
        for rows in row_bands(image.height(), workers) {
            debug!("blur worker assigned rows {}..{}", rows.start, rows.end);
            let band_rows = rows.clone();
            handles.push((rows, scope.spawn(move || blur_band(image, band_rows, radius))));
        }
        for (rows, handle) in handles {
            let band = handle.join().unwrap();
            write_band(&mut out, rows, &band);
        }
    });
    out
}

/// Blurs the rows in `rows`, returning their pixels row-major.
fn blur_band(image: &Raster, rows: Range<usize>, radius: usize) -> Vec<Rgb> {
    let mut band = Vec::with_capacity(rows.len() * image.width());
    for y in rows {
        for x in 0..image.width() {
            band.push(window_average(image, x, y, radius));
        }
    }
    band
}

fn write_band(out: &mut Raster, rows: Range<usize>, band: &[Rgb]) {
    let mut index = 0;
    for y in rows {
        for x in 0..out.width() {
            out.set_pixel(x, y, band[index]);
            index += 1;
        }
    }
}

/// Averages the window of pixels within `radius` of `(x, y)`, clamped to the
/// image bounds.
fn window_average(image: &Raster, x: usize, y: usize, radius: usize) -> Rgb {
    let x_start = x.saturating_sub(radius);
    let x_end = (x + radius).min(image.width() - 1);
    let y_start = y.saturating_sub(radius);
    let y_end = (y + radius).min(image.height() - 1);

    let mut total_red: u64 = 0;
    let mut total_green: u64 = 0;
    let mut total_blue: u64 = 0;
    for yy in y_start..=y_end {
        for xx in x_start..=x_end {
            let color = image.pixel(xx, yy);
            total_red += u64::from(color.red);
            total_green += u64::from(color.green);
            total_blue += u64::from(color.blue);
        }
    }
    let count = ((y_end - y_start + 1) * (x_end - x_start + 1)) as u64;
    Rgb {
        red: (total_red / count) as u8,
        green: (total_green / count) as u8,
        blue: (total_blue / count) as u8,
    }
}
