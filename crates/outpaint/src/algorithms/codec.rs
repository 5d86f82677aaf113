use image::{
    codecs::png::{CompressionType, FilterType, PngEncoder},
    ImageFormat, RgbaImage,
};
use crate::{
    error::{OutpaintError, Result},
    traits::ImageCodec,
    types::{DecodedImage, MaskImage},
};

/// PNG output codec; decodes every format the `image` crate is built with
#[derive(Debug, Clone, Copy)]
pub struct PngCodec {
    pub compression: CompressionType,
}

impl Default for PngCodec {
    fn default() -> Self {
        Self { compression: CompressionType::Fast }
    }
}

impl PngCodec {
    fn encoder<'a>(&self, buffer: &'a mut Vec<u8>) -> PngEncoder<&'a mut Vec<u8>> {
        PngEncoder::new_with_quality(buffer, self.compression, FilterType::Adaptive)
    }
}

impl ImageCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
        let format = image::guess_format(bytes).map_err(OutpaintError::Decode)?;
        let decoded = image::load_from_memory_with_format(bytes, format).map_err(OutpaintError::Decode)?;
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(OutpaintError::InvalidDimensions {
                width: decoded.width(),
                height: decoded.height(),
            });
        }
        Ok(DecodedImage {
            pixels: decoded.to_rgba8(),
            format,
        })
    }

    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        image
            .write_with_encoder(self.encoder(&mut buffer))
            .map_err(OutpaintError::Encode)?;
        Ok(buffer)
    }

    fn encode_mask(&self, mask: &MaskImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        mask.write_with_encoder(self.encoder(&mut buffer))
            .map_err(OutpaintError::Encode)?;
        Ok(buffer)
    }

    fn canonical_format(&self) -> ImageFormat {
        ImageFormat::Png
    }
}
