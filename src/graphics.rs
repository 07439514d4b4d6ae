//! Graphics support via embedded-graphics
//!
//! Any embedded-graphics image that knows its size and can be sampled per
//! pixel ([`OriginDimensions`] + [`GetPixel`]) converts into a frame buffer,
//! as long as its color converts to [`Rgb888`]. Each pixel is thresholded
//! with [`Color::nearest`].
//!
//! ## Example
//!
//! ```rust
//! use embedded_graphics::image::GetPixel;
//! use embedded_graphics::pixelcolor::Rgb888;
//! use embedded_graphics::prelude::*;
//! use uc8179::{Dimensions, convert};
//!
//! struct Gradient;
//!
//! impl OriginDimensions for Gradient {
//!     fn size(&self) -> Size {
//!         Size::new(8, 1)
//!     }
//! }
//!
//! impl GetPixel for Gradient {
//!     type Color = Rgb888;
//!
//!     fn pixel(&self, p: Point) -> Option<Rgb888> {
//!         let level = (p.x * 32) as u8;
//!         Some(Rgb888::new(level, level, level))
//!     }
//! }
//!
//! let Ok(dims) = Dimensions::new(1, 8) else { return };
//! // dark half black, bright half white
//! assert_eq!(convert(&Gradient, dims), [0x0F]);
//! ```

use embedded_graphics_core::geometry::{OriginDimensions, Point};
use embedded_graphics_core::image::GetPixel;
use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};

use crate::color::Color;
use crate::frame::SourceImage;

impl<T> SourceImage for T
where
    T: OriginDimensions + GetPixel,
    T::Color: Into<Rgb888>,
{
    fn size(&self) -> (u32, u32) {
        let size = OriginDimensions::size(self);
        (size.width, size.height)
    }

    fn pixel(&self, x: u32, y: u32) -> Color {
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            return Color::White;
        };
        GetPixel::pixel(self, Point::new(x, y)).map_or(Color::White, |color| {
            let rgb: Rgb888 = color.into();
            Color::nearest(rgb.r(), rgb.g(), rgb.b())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dimensions;
    use crate::frame::convert;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;

    /// Solid image of a fixed size
    struct Fill<C> {
        size: Size,
        color: C,
    }

    impl<C> OriginDimensions for Fill<C> {
        fn size(&self) -> Size {
            self.size
        }
    }

    impl<C: PixelColor> GetPixel for Fill<C> {
        type Color = C;

        fn pixel(&self, p: Point) -> Option<C> {
            let inside = p.x >= 0
                && p.y >= 0
                && (p.x as u32) < self.size.width
                && (p.y as u32) < self.size.height;
            inside.then_some(self.color)
        }
    }

    #[test]
    fn test_rgb_images_are_thresholded() {
        let dims = Dimensions::default();
        let black = Fill {
            size: Size::new(800, 480),
            color: Rgb888::new(20, 30, 40),
        };
        let white = Fill {
            size: Size::new(800, 480),
            color: Rgb565::WHITE,
        };
        assert!(convert(&black, dims).iter().all(|b| *b == 0x00));
        assert!(convert(&white, dims).iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_size_comes_from_origin_dimensions() {
        let image = Fill {
            size: Size::new(12, 3),
            color: Rgb888::BLACK,
        };
        assert_eq!(SourceImage::size(&image), (12, 3));
        assert_eq!(SourceImage::pixel(&image, 0, 0), Color::Black);
    }

    #[test]
    fn test_small_image_is_padded() {
        let dims = Dimensions::new(2, 16).unwrap();
        let image = Fill {
            size: Size::new(4, 1),
            color: Rgb888::BLACK,
        };
        assert_eq!(convert(&image, dims), [0x0F, 0xFF, 0xFF, 0xFF]);
    }
}
