//! Seeded pixel permutation used to decorrelate reflected strips.

use image::RgbaImage;

/// SplitMix64; small, seedable and good enough to scatter pixels.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Value in `0..bound`; `bound` must be non-zero
    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// Returns a copy of `image` with its pixels permuted (Fisher-Yates).
///
/// The multiset of pixel values is unchanged, so the color histogram
/// survives while spatial structure does not. Same seed, same output.
pub fn shuffle_pixels(image: &RgbaImage, seed: u64) -> RgbaImage {
    let mut shuffled = image.clone();
    let count = (image.width() as u64) * (image.height() as u64);
    if count < 2 {
        return shuffled;
    }

    let mut rng = SplitMix64::new(seed);
    let raw: &mut [u8] = &mut shuffled;
    for i in (1..count).rev() {
        let j = rng.below(i + 1);
        if i != j {
            let (a, b) = (i as usize * 4, j as usize * 4);
            for channel in 0..4 {
                raw.swap(a + channel, b + channel);
            }
        }
    }
    shuffled
}
