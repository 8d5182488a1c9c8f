//! Drawing pixel buffers, reading pixels back and PNG encoding.

use super::Canvas2dContext;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::CanvasImageDataRef;
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint};

/// Meters per inch, for PNG pixel density.
const METERS_PER_INCH: f32 = 0.0254;

impl Canvas2dContext {
    /// Draw `image` resampled bilinearly into the rectangle at (`dx`, `dy`).
    ///
    /// The current transform, global alpha and clip region apply. An empty
    /// image or destination draws nothing.
    pub fn draw_image_data_scaled(
        &mut self,
        image: &CanvasImageDataRef<'_>,
        dx: f32,
        dy: f32,
        dw: f32,
        dh: f32,
    ) -> Canvas2dResult<()> {
        if !image.has_expected_len() {
            return Err(Canvas2dError::ImageDataSize {
                len: image.data.len(),
                width: image.width,
                height: image.height,
            });
        }
        if dw <= 0.0 || dh <= 0.0 {
            return Ok(());
        }
        let Some(mut source) = Pixmap::new(image.width, image.height) else {
            return Ok(());
        };
        for (src, dst) in image.data.chunks_exact(4).zip(source.data_mut().chunks_exact_mut(4)) {
            let alpha = u32::from(src[3]);
            for channel in 0..3 {
                dst[channel] = ((u32::from(src[channel]) * alpha + 127) / 255) as u8;
            }
            dst[3] = src[3];
        }

        let transform = self
            .state
            .transform
            .pre_translate(dx, dy)
            .pre_scale(dw / image.width as f32, dh / image.height as f32);
        let paint = PixmapPaint {
            opacity: self.state.global_alpha,
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        let clip = self.clip_mask();
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, clip.as_ref());
        Ok(())
    }

    /// Straight-alpha RGBA for a region. Pixels off the surface read as
    /// transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut out = vec![0u8; width as usize * height as usize * 4];
        if width == 0 {
            return out;
        }
        for (row, dst_row) in out.chunks_exact_mut(width as usize * 4).enumerate() {
            let sy = y + row as i32;
            if sy < 0 || sy >= self.height as i32 {
                continue;
            }
            for (col, dst) in dst_row.chunks_exact_mut(4).enumerate() {
                let sx = x + col as i32;
                if sx < 0 || sx >= self.width as i32 {
                    continue;
                }
                if let Some(px) = self.pixmap.pixel(sx as u32, sy as u32) {
                    let c = px.demultiply();
                    dst.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
                }
            }
        }
        out
    }

    /// Encode the surface as an RGBA PNG with a pixel density of `ppi`
    /// (72 when unset).
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        let ppm = (ppi.unwrap_or(72.0).max(0.0) / METERS_PER_INCH).round() as u32;
        let pixels = self.get_image_data(0, 0, self.width, self.height);
        let mut png_bytes = Vec::new();
        let mut encoder = png::Encoder::new(&mut png_bytes, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&pixels)?;
        writer.finish()?;
        Ok(png_bytes)
    }
}
