pub mod blur;
pub mod codec;
pub mod gradient;
pub mod reflect;
pub mod resample;
pub mod shuffle;

pub use blur::{GaussianEdgeBlur, ImageopsEdgeBlur};
pub use codec::PngCodec;
pub use gradient::{build_mask, Extents, LinearGradient};
pub use reflect::{place, placement_offset, reflect_edges};
pub use resample::FilterResampler;
pub use shuffle::{shuffle_pixels, SplitMix64};
