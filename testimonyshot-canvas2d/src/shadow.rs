//! Gaussian blur of shadow coverage masks.
//!
//! Shadows use the HTML canvas model: the blur value is twice the standard
//! deviation of the Gaussian. The Gaussian is approximated by three successive
//! box blurs, which keeps the cost linear in the mask size regardless of radius.

/// Number of box blur passes used to approximate a Gaussian.
const BOX_PASSES: usize = 3;

/// Standard deviation of the Gaussian for a canvas `shadowBlur` value.
pub(crate) fn blur_sigma(shadow_blur: f32) -> f32 {
    (shadow_blur / 2.0).max(0.0)
}

/// How far (in pixels) a blurred shape can spread beyond its outline.
pub(crate) fn blur_extent(sigma: f32) -> u32 {
    (sigma * 3.0).ceil() as u32
}

/// Box widths whose successive application approximates a Gaussian of `sigma`.
fn box_sizes(sigma: f32, passes: usize) -> Vec<usize> {
    let n = passes as f32;
    let w_ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wlf = wl as f32;
    let m_ideal =
        (12.0 * sigma * sigma - n * wlf * wlf - 4.0 * n * wlf - 3.0 * n) / (-4.0 * wlf - 4.0);
    let m = m_ideal.round().max(0.0) as usize;
    (0..passes)
        .map(|i| if i < m { wl as usize } else { wu as usize })
        .collect()
}

/// Blur a single-channel coverage buffer in place.
pub(crate) fn gaussian_blur_alpha(data: &mut [u8], width: usize, height: usize, sigma: f32) {
    if sigma <= 0.0 || width == 0 || height == 0 || data.len() != width * height {
        return;
    }
    let mut scratch = vec![0u8; data.len()];
    for size in box_sizes(sigma, BOX_PASSES) {
        let radius = (size - 1) / 2;
        if radius == 0 {
            continue;
        }
        box_blur_horizontal(data, &mut scratch, width, height, radius);
        box_blur_vertical(&scratch, data, width, height, radius);
    }
}

/// Horizontal pass; samples outside the buffer count as zero coverage.
fn box_blur_horizontal(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let div = (2 * radius + 1) as u32;
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        let out = &mut dst[y * width..(y + 1) * width];
        let mut sum: u32 = row[..=radius.min(width - 1)].iter().map(|&v| v as u32).sum();
        for x in 0..width {
            out[x] = ((sum + div / 2) / div) as u8;
            if x + radius + 1 < width {
                sum += row[x + radius + 1] as u32;
            }
            if x >= radius {
                sum -= row[x - radius] as u32;
            }
        }
    }
}

/// Vertical pass; samples outside the buffer count as zero coverage.
fn box_blur_vertical(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let div = (2 * radius + 1) as u32;
    for x in 0..width {
        let mut sum: u32 = (0..=radius.min(height - 1))
            .map(|y| src[y * width + x] as u32)
            .sum();
        for y in 0..height {
            dst[y * width + x] = ((sum + div / 2) / div) as u8;
            if y + radius + 1 < height {
                sum += src[(y + radius + 1) * width + x] as u32;
            }
            if y >= radius {
                sum -= src[(y - radius) * width + x] as u32;
            }
        }
    }
}
