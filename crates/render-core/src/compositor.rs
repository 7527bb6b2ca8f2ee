//! Raster preparation and replay of a [`PageLayout`] onto a graphics context.

use crate::error::RenderError;
use crate::traits::GraphicsContext;
use image::imageops::{self, FilterType};
use invoice_layout::{DrawCommand, ImageSlot, PageLayout, placement};
use invoice_types::{AssetError, RasterAsset};

/// Resamples `raster` to exactly `width × height` pixels (bilinear).
pub fn scale_to(raster: &RasterAsset, width: u32, height: u32) -> Result<RasterAsset, AssetError> {
    if raster.width() == width && raster.height() == height {
        return Ok(raster.clone());
    }
    let source = image::RgbaImage::from_raw(raster.width(), raster.height(), raster.pixels().to_vec())
        .ok_or(AssetError::BufferMismatch {
            expected: raster.width() as usize * raster.height() as usize * 4,
            actual: raster.pixels().len(),
        })?;
    let scaled = imageops::resize(&source, width, height, FilterType::Triangle);
    RasterAsset::from_rgba(width, height, scaled.into_raw())
}

/// The scaled rasters owned by one render call.
#[derive(Debug, Clone)]
pub struct RasterLayers {
    watermark: RasterAsset,
    signature: Option<RasterAsset>,
}

impl RasterLayers {
    pub fn prepare(watermark: &RasterAsset, signature: Option<&RasterAsset>) -> Result<Self, RenderError> {
        let (w, h) = placement::target_pixels(ImageSlot::Watermark);
        let watermark = scale_to(watermark, w, h)?;
        let signature = signature
            .map(|raster| {
                let (w, h) = placement::target_pixels(ImageSlot::Signature);
                scale_to(raster, w, h)
            })
            .transpose()?;
        Ok(Self {
            watermark,
            signature,
        })
    }

    pub fn get(&self, slot: ImageSlot) -> Option<&RasterAsset> {
        match slot {
            ImageSlot::Watermark => Some(&self.watermark),
            ImageSlot::Signature => self.signature.as_ref(),
        }
    }
}

/// Paints every command of `layout` in order. Placements whose raster is
/// absent are skipped.
pub fn paint_layout<G>(layout: &PageLayout, layers: &RasterLayers, ctx: &mut G) -> Result<(), RenderError>
where
    G: GraphicsContext + ?Sized,
{
    for command in &layout.commands {
        match command {
            DrawCommand::FillRect { rect, color } => ctx.fill_rect(*rect, *color)?,
            DrawCommand::Text(run) => ctx.draw_text(&run.text, run.origin, &run.style)?,
            DrawCommand::Line { from, to, stroke } => ctx.draw_line(*from, *to, stroke)?,
            DrawCommand::StrokeRect { rect, stroke } => ctx.stroke_rect(*rect, stroke)?,
            DrawCommand::Image {
                slot,
                dest,
                opacity,
            } => match layers.get(*slot) {
                Some(raster) => ctx.draw_image(raster, *dest, *opacity)?,
                None => log::debug!("No raster supplied for {:?}; placement skipped", slot),
            },
        }
    }
    Ok(())
}
