use image::{imageops::FilterType, RgbaImage};
use crate::traits::Resampler;

/// Resampler backed by `image::imageops::resize`
#[derive(Debug, Clone, Copy)]
pub struct FilterResampler {
    pub filter: FilterType,
}

impl Default for FilterResampler {
    fn default() -> Self {
        Self { filter: FilterType::Lanczos3 }
    }
}

impl Resampler for FilterResampler {
    fn resize(&self, image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
        if image.dimensions() == (width, height) {
            return image.clone();
        }
        image::imageops::resize(image, width, height, self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_exact_output_size() {
        let image = RgbaImage::from_pixel(300, 200, Rgba([10, 20, 30, 255]));
        let resized = FilterResampler::default().resize(&image, 768, 512);
        assert_eq!(resized.dimensions(), (768, 512));
        // flat color survives Lanczos up to rounding
        let pixel = resized.get_pixel(400, 300);
        assert!((pixel[0] as i32 - 10).abs() <= 1);
        assert_eq!(pixel[3], 255);
    }
}
