//! Progressive accumulation film.
//!
//! Two parallel buffers in row-major, top-down order (row 0 is the top
//! image row): a `Vec4` running radiance sum per pixel and the packed
//! 8-bit RGBA display buffer derived from it. `frame_index` counts the
//! passes folded into the sum; the display value is always
//! `clamp(sum / frame_index, 0, 1)`.

use glam::Vec4;

/// Pack a radiance value into `(a << 24) | (b << 16) | (g << 8) | r`.
///
/// Input is clamped to [0, 1] per component and truncated to 8 bits.
/// In little-endian memory the packed word reads as `[r, g, b, a]`
/// bytes, which is what RGBA image consumers expect.
#[inline]
pub fn pack_rgba(color: Vec4) -> u32 {
    let color = color.clamp(Vec4::ZERO, Vec4::ONE);
    let r = (color.x * 255.0) as u32;
    let g = (color.y * 255.0) as u32;
    let b = (color.z * 255.0) as u32;
    let a = (color.w * 255.0) as u32;
    (a << 24) | (b << 16) | (g << 8) | r
}

/// Per-pixel radiance accumulator plus its packed display buffer.
#[derive(Clone, Debug)]
pub struct Film {
    width: u32,
    height: u32,
    accumulation: Vec<Vec4>,
    pixels: Vec<u32>,
    frame_index: u32,
}

impl Default for Film {
    fn default() -> Self {
        Self::new()
    }
}

impl Film {
    /// Create an empty 0x0 film. Call [`Film::resize`] before use.
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            accumulation: Vec::new(),
            pixels: Vec::new(),
            frame_index: 1,
        }
    }

    /// Resolution as `(width, height)`.
    #[inline]
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Index of the pass currently being accumulated (1-based).
    #[inline]
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Reallocate both buffers for a new resolution, discarding previous
    /// contents. The fresh buffers read as all-zero. Zero dimensions are
    /// rejected as a no-op; an unchanged resolution keeps the buffers.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("film resize to {}x{} rejected", width, height);
            return;
        }
        if width == self.width && height == self.height {
            return;
        }

        let len = (width * height) as usize;
        self.width = width;
        self.height = height;
        self.accumulation = vec![Vec4::ZERO; len];
        self.pixels = vec![0; len];
        log::debug!("film buffers reallocated at {}x{}", width, height);
    }

    /// Restart progressive accumulation at the next pass.
    pub fn reset(&mut self) {
        self.frame_index = 1;
    }

    /// Prepare for one render pass: a restarted accumulator is zeroed
    /// here, immediately before new samples arrive.
    pub(crate) fn begin_pass(&mut self) {
        if self.frame_index == 1 {
            self.accumulation.fill(Vec4::ZERO);
        }
    }

    /// Advance the frame counter after a completed pass.
    pub(crate) fn advance(&mut self, accumulate: bool) {
        if accumulate {
            self.frame_index += 1;
        } else {
            self.frame_index = 1;
        }
    }

    /// Both buffers as whole mutable slices, for the row dispatcher.
    pub(crate) fn buffers_mut(&mut self) -> (&mut [Vec4], &mut [u32]) {
        (&mut self.accumulation, &mut self.pixels)
    }

    /// Packed display pixel at `(x, y)`, row 0 at the top.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[(x + y * self.width) as usize]
    }

    /// The packed display buffer in row-major, top-down order.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The raw accumulation buffer.
    pub fn accumulation(&self) -> &[Vec4] {
        &self.accumulation
    }

    /// Display buffer viewed as RGBA bytes (little-endian layout).
    pub fn as_rgba_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rgba_channels() {
        assert_eq!(pack_rgba(Vec4::new(1.0, 0.0, 0.0, 1.0)), 0xFF00_00FF);
        assert_eq!(pack_rgba(Vec4::new(0.0, 1.0, 0.0, 1.0)), 0xFF00_FF00);
        assert_eq!(pack_rgba(Vec4::new(0.0, 0.0, 1.0, 1.0)), 0xFFFF_0000);
        assert_eq!(pack_rgba(Vec4::ZERO), 0x0000_0000);
    }

    #[test]
    fn test_pack_rgba_clamps_and_truncates() {
        // Out-of-range values clamp instead of wrapping
        assert_eq!(pack_rgba(Vec4::new(2.0, -1.0, 0.0, 1.0)), 0xFF00_00FF);
        // 0.5 * 255 truncates to 127
        assert_eq!(pack_rgba(Vec4::new(0.5, 0.0, 0.0, 0.0)), 0x0000_007F);
    }

    #[test]
    fn test_resize_allocates_zeroed() {
        let mut film = Film::new();
        film.resize(4, 2);

        assert_eq!(film.resolution(), (4, 2));
        assert_eq!(film.pixels().len(), 8);
        assert!(film.accumulation().iter().all(|&v| v == Vec4::ZERO));
        assert!(film.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_resize_then_reset_reads_zero() {
        let mut film = Film::new();
        film.resize(2, 2);
        film.reset();

        assert_eq!(film.frame_index(), 1);
        assert!(film.accumulation().iter().all(|&v| v == Vec4::ZERO));
    }

    #[test]
    fn test_zero_resize_is_noop() {
        let mut film = Film::new();
        film.resize(4, 4);
        film.resize(0, 7);
        assert_eq!(film.resolution(), (4, 4));
    }

    #[test]
    fn test_begin_pass_zeroes_only_on_restart() {
        let mut film = Film::new();
        film.resize(1, 1);

        {
            let (accumulation, _) = film.buffers_mut();
            accumulation[0] = Vec4::ONE;
        }
        film.advance(true);
        assert_eq!(film.frame_index(), 2);

        // Frame 2: the running sum survives
        film.begin_pass();
        assert_eq!(film.accumulation()[0], Vec4::ONE);

        // After a reset the next pass starts from zero
        film.reset();
        film.begin_pass();
        assert_eq!(film.accumulation()[0], Vec4::ZERO);
    }

    #[test]
    fn test_rgba_bytes_layout() {
        let mut film = Film::new();
        film.resize(1, 1);
        {
            let (_, pixels) = film.buffers_mut();
            pixels[0] = pack_rgba(Vec4::new(1.0, 0.0, 0.0, 1.0));
        }
        if cfg!(target_endian = "little") {
            assert_eq!(film.as_rgba_bytes(), &[0xFF, 0x00, 0x00, 0xFF]);
        }
    }
}
