//! Color inversion.

use crate::raster::{Raster, Rgb};

/// Returns a copy of `image` with every color channel inverted.
pub fn negative(image: &Raster) -> Raster {
    let mut out = Raster::new(image.width(), image.height());
    for y in 0..image.height() {
        for x in 0..image.width() {
            let color = image.pixel(x, y);
            out.set_pixel(
                x,
                y,
                Rgb {
                    red: u8::MAX - color.red,
                    green: u8::MAX - color.green,
                    blue: u8::MAX - color.blue,
                },
            );
        }
    }
    out
}
