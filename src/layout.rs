//! Texture packing for 1-D input arrays
//!
//! GPU textures cap each dimension, so arbitrary-length arrays are folded
//! into a square-ish 2-D grid: `width = min(ceil(sqrt(n)), max)`,
//! `height = ceil(n / width)`. The tail of the last row is zero padding;
//! kernels never address it because dispatches bounds-check against the
//! real element count.

use crate::error::ComputeError;

/// Dimensions of a packed input texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureLayout {
    /// Texture width in texels
    pub width: u32,
    /// Texture height in texels
    pub height: u32,
}

impl TextureLayout {
    /// Compute the layout for `n` elements under a maximum dimension.
    ///
    /// Returns `ComputeError::TextureCapacity` when `n` cannot fit in a
    /// single `max * max` texture. The original implementation silently
    /// corrupted data past that boundary; here it is an explicit error.
    pub fn for_len(n: usize, max_texture_size: u32) -> Result<Self, ComputeError> {
        let max = max_texture_size.max(1);
        if n as u64 > (max as u64) * (max as u64) {
            return Err(ComputeError::TextureCapacity { len: n, max });
        }
        if n == 0 {
            return Ok(Self { width: 1, height: 1 });
        }
        let width = ((n as f64).sqrt().ceil() as u32).min(max).max(1);
        let height = n.div_ceil(width as usize) as u32;
        Ok(Self { width, height })
    }

    /// Number of texels in the texture, padding included
    pub fn texel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Pack `n` source elements of `src_channels` floats each into a
/// zero-padded buffer of `dst_channels` floats per texel.
///
/// Widening (`src_channels < dst_channels`) fills the extra channels with
/// zero; this is how 3-channel node positions land in `Rgba32Float`
/// texels.
pub fn pack_texels_f32(
    src: &[f32],
    src_channels: usize,
    dst_channels: usize,
    layout: TextureLayout,
) -> Vec<f32> {
    debug_assert!(src_channels <= dst_channels);
    debug_assert_eq!(src.len() % src_channels, 0);

    let mut packed = vec![0.0f32; layout.texel_count() * dst_channels];
    for (i, chunk) in src.chunks_exact(src_channels).enumerate() {
        packed[i * dst_channels..i * dst_channels + src_channels].copy_from_slice(chunk);
    }
    packed
}

/// `pack_texels_f32` for u32 data (edge endpoint indices)
pub fn pack_texels_u32(
    src: &[u32],
    src_channels: usize,
    dst_channels: usize,
    layout: TextureLayout,
) -> Vec<u32> {
    debug_assert!(src_channels <= dst_channels);
    debug_assert_eq!(src.len() % src_channels, 0);

    let mut packed = vec![0u32; layout.texel_count() * dst_channels];
    for (i, chunk) in src.chunks_exact(src_channels).enumerate() {
        packed[i * dst_channels..i * dst_channels + src_channels].copy_from_slice(chunk);
    }
    packed
}
