//! Where the two raster layers land on the page.

use crate::metrics::{PAGE, SIGNATURE_RECT, WATERMARK_OPACITY, WATERMARK_SIZE};
use crate::output::{DrawCommand, ImageSlot};
use invoice_types::Rect;

pub fn watermark() -> DrawCommand {
    DrawCommand::Image {
        slot: ImageSlot::Watermark,
        dest: Rect::centered_in(PAGE, WATERMARK_SIZE),
        opacity: WATERMARK_OPACITY,
    }
}

pub fn signature() -> DrawCommand {
    DrawCommand::Image {
        slot: ImageSlot::Signature,
        dest: SIGNATURE_RECT,
        opacity: 1.0,
    }
}

/// Target pixel dimensions a raster is scaled to before placement.
pub fn target_pixels(slot: ImageSlot) -> (u32, u32) {
    let rect = match slot {
        ImageSlot::Watermark => Rect::centered_in(PAGE, WATERMARK_SIZE),
        ImageSlot::Signature => SIGNATURE_RECT,
    };
    (rect.width as u32, rect.height as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watermark_is_centered() {
        let DrawCommand::Image { dest, opacity, .. } = watermark() else {
            panic!("expected an image placement");
        };
        assert_eq!(dest, Rect::new(167.5, 291.0, 260.0, 260.0));
        assert!((opacity - 0.1373).abs() < 0.001);
    }

    #[test]
    fn target_sizes() {
        assert_eq!(target_pixels(ImageSlot::Watermark), (260, 260));
        assert_eq!(target_pixels(ImageSlot::Signature), (140, 40));
    }
}
