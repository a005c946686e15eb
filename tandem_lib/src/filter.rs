//! Pixel filters over rasters.

pub mod blur;
pub mod negative;

use std::ops::Range;

/// Splits `height` rows into at most `workers` contiguous bands.
///
/// Band sizes differ by at most one, with the leading bands taking the
/// remainder. Empty bands are dropped, so fewer than `workers` bands come
/// back when there are not enough rows to go around; `workers == 0` is
/// treated as one. The bands are disjoint and cover `0..height` in order.
pub fn row_bands(height: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let per_band = height / workers;
    let extra = height % workers;
    let mut bands = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let len = per_band + usize::from(i < extra);
        if len == 0 {
            break;
        }
        bands.push(start..start + len);
        start += len;
    }
    bands
}
