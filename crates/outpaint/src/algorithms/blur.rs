use image::RgbaImage;
use crate::traits::EdgeBlur;

/// Gaussian blur across the whole composite
#[derive(Debug, Clone)]
pub struct GaussianEdgeBlur {
    /// Sigma per unit of blur radius
    pub sigma_per_radius: f32,
}

impl Default for GaussianEdgeBlur {
    fn default() -> Self {
        Self { sigma_per_radius: 0.5 }
    }
}

impl GaussianEdgeBlur {
    pub fn sigma(&self, radius: u32) -> f32 {
        (radius as f32 * self.sigma_per_radius).max(0.5)
    }
}

impl EdgeBlur for GaussianEdgeBlur {
    fn blur(&self, image: &RgbaImage, radius: u32) -> RgbaImage {
        if radius == 0 {
            return image.clone();
        }
        imageproc::filter::gaussian_blur_f32(image, self.sigma(radius))
    }
}

/// Box-weighted blur from `image::imageops`, cheaper on large radii
#[derive(Debug, Clone, Default)]
pub struct ImageopsEdgeBlur;

impl EdgeBlur for ImageopsEdgeBlur {
    fn blur(&self, image: &RgbaImage, radius: u32) -> RgbaImage {
        if radius == 0 {
            return image.clone();
        }
        image::imageops::blur(image, radius as f32 / 2.0)
    }
}
