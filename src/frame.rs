//! Conversion of images into the device frame buffer
//!
//! The device frame buffer holds one bit per pixel, `cols / 8` bytes per
//! row, most significant bit = leftmost pixel, `1` = white. Pixels outside
//! the source image are white, so any image size yields a full-size buffer.
//!
//! The per-pixel nibble codes the panel expects on the wire are produced
//! later, while [`Epd::display`](crate::Epd::display) streams the buffer.

use crate::color::Color;
use crate::config::Dimensions;

/// A rectangular image that can be converted into a frame buffer
///
/// With the `graphics` feature every embedded-graphics image whose color
/// converts to `Rgb888` implements this trait.
pub trait SourceImage {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    /// Color at (x, y); only called for coordinates inside [`size`](Self::size)
    fn pixel(&self, x: u32, y: u32) -> Color;
}

/// Frame buffer length does not match the panel geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferSizeMismatch {
    /// Required buffer size in bytes
    pub required: usize,
    /// Provided buffer size in bytes
    pub provided: usize,
}

impl core::fmt::Display for BufferSizeMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Buffer size mismatch: required {} bytes, provided {}",
            self.required, self.provided
        )
    }
}

impl core::error::Error for BufferSizeMismatch {}

/// Convert `image` into `buffer`, which must be exactly `dims.buffer_size()` long
pub fn convert_into<S: SourceImage + ?Sized>(
    image: &S,
    dims: Dimensions,
    buffer: &mut [u8],
) -> Result<(), BufferSizeMismatch> {
    let required = dims.buffer_size();
    if buffer.len() != required {
        return Err(BufferSizeMismatch {
            required,
            provided: buffer.len(),
        });
    }

    buffer.fill(Color::White.byte());

    let (src_w, src_h) = image.size();
    let bytes_per_row = dims.bytes_per_row();
    if bytes_per_row == 0 {
        return Ok(());
    }
    for (row, line) in buffer.chunks_exact_mut(bytes_per_row).enumerate() {
        let y = row as u32;
        for (index, byte) in line.iter_mut().enumerate() {
            let mut packed = 0u8;
            for bit in 0..8u32 {
                let x = index as u32 * 8 + bit;
                let color = if x < src_w && y < src_h {
                    image.pixel(x, y)
                } else {
                    Color::White
                };
                if color.bit() {
                    packed |= 0x80 >> bit;
                }
            }
            *byte = packed;
        }
    }

    Ok(())
}

/// Convert `image` into a freshly allocated frame buffer
#[cfg(any(test, feature = "alloc"))]
pub fn convert<S: SourceImage + ?Sized>(image: &S, dims: Dimensions) -> alloc::vec::Vec<u8> {
    let mut buffer = alloc::vec![Color::White.byte(); dims.buffer_size()];
    // Length matches by construction
    let _ = convert_into(image, dims, &mut buffer);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Solid {
        width: u32,
        height: u32,
        color: Color,
    }

    impl SourceImage for Solid {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn pixel(&self, _x: u32, _y: u32) -> Color {
            self.color
        }
    }

    /// Black on even columns, white on odd ones
    struct Stripes;

    impl SourceImage for Stripes {
        fn size(&self) -> (u32, u32) {
            (800, 480)
        }

        fn pixel(&self, x: u32, _y: u32) -> Color {
            if x % 2 == 0 { Color::Black } else { Color::White }
        }
    }

    fn full(color: Color) -> Solid {
        Solid {
            width: 800,
            height: 480,
            color,
        }
    }

    #[test]
    fn test_all_black_and_all_white() {
        let dims = Dimensions::default();
        let black = convert(&full(Color::Black), dims);
        let white = convert(&full(Color::White), dims);
        assert_eq!(black, alloc::vec![0x00; dims.buffer_size()]);
        assert_eq!(white, alloc::vec![0xFF; dims.buffer_size()]);
    }

    #[test]
    fn test_small_image_is_padded_with_white() {
        let dims = Dimensions::default();
        let image = Solid {
            width: 12,
            height: 2,
            color: Color::Black,
        };
        let buffer = convert(&image, dims);
        assert_eq!(buffer.len(), dims.buffer_size());

        let bpr = dims.bytes_per_row();
        for row in 0..2 {
            assert_eq!(buffer[row * bpr], 0x00);
            // columns 8..12 black, 12..16 white
            assert_eq!(buffer[row * bpr + 1], 0x0F);
            assert!(buffer[row * bpr + 2..(row + 1) * bpr].iter().all(|b| *b == 0xFF));
        }
        assert!(buffer[2 * bpr..].iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_oversized_image_is_cropped() {
        let dims = Dimensions::new(16, 16).unwrap();
        let image = Solid {
            width: 1000,
            height: 1000,
            color: Color::Black,
        };
        assert_eq!(convert(&image, dims), alloc::vec![0x00; 32]);
    }

    #[test]
    fn test_empty_image_is_white() {
        let dims = Dimensions::default();
        let image = Solid {
            width: 0,
            height: 0,
            color: Color::Black,
        };
        assert!(convert(&image, dims).iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_msb_is_leftmost_pixel() {
        let dims = Dimensions::default();
        let buffer = convert(&Stripes, dims);
        assert!(buffer.iter().all(|b| *b == 0x55));
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let dims = Dimensions::default();
        let image = Solid {
            width: 333,
            height: 101,
            color: Color::Black,
        };
        assert_eq!(convert(&image, dims), convert(&image, dims));
    }

    #[test]
    fn test_convert_into_rejects_wrong_length() {
        let dims = Dimensions::default();
        let mut buffer = [0u8; 10];
        assert_eq!(
            convert_into(&full(Color::White), dims, &mut buffer),
            Err(BufferSizeMismatch {
                required: 48_000,
                provided: 10
            })
        );
    }
}
