//! Image XObjects. Color goes into a DeviceRGB image; a non-opaque alpha
//! channel becomes a DeviceGray soft mask.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use invoice_render_core::RenderError;
use invoice_types::RasterAsset;
use lopdf::{Dictionary, Object, Stream, dictionary};
use std::io::Write;

pub(crate) fn compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn image_stream(
    mut dict: Dictionary,
    samples: Vec<u8>,
    compress_stream: bool,
) -> Result<Stream, RenderError> {
    if compress_stream {
        dict.set("Filter", "FlateDecode");
        Ok(Stream::new(dict, compress(&samples)?).with_compression(false))
    } else {
        Ok(Stream::new(dict, samples).with_compression(false))
    }
}

/// The soft mask for `raster`, if it has any transparency.
pub(crate) fn soft_mask(raster: &RasterAsset, compress_stream: bool) -> Result<Option<Stream>, RenderError> {
    if !raster.has_transparency() {
        return Ok(None);
    }
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => raster.width() as i64,
        "Height" => raster.height() as i64,
        "ColorSpace" => "DeviceGray",
        "BitsPerComponent" => 8i64,
    };
    image_stream(dict, raster.alpha_channel(), compress_stream).map(Some)
}

pub(crate) fn color_image(
    raster: &RasterAsset,
    smask: Option<lopdf::ObjectId>,
    compress_stream: bool,
) -> Result<Stream, RenderError> {
    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => raster.width() as i64,
        "Height" => raster.height() as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8i64,
    };
    if let Some(id) = smask {
        dict.set("SMask", Object::Reference(id));
    }
    image_stream(dict, raster.rgb_channels(), compress_stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(alpha: u8) -> RasterAsset {
        RasterAsset::from_rgba(2, 2, [10, 20, 30, alpha].repeat(4)).unwrap()
    }

    #[test]
    fn opaque_raster_has_no_mask() {
        assert!(soft_mask(&raster(255), true).unwrap().is_none());
    }

    #[test]
    fn translucent_raster_gets_gray_mask() {
        let mask = soft_mask(&raster(35), false).unwrap().unwrap();
        assert_eq!(mask.content, vec![35; 4]);
        assert_eq!(
            mask.dict.get(b"ColorSpace").unwrap().as_name().unwrap(),
            b"DeviceGray"
        );
    }

    #[test]
    fn color_samples_drop_alpha() {
        let image = color_image(&raster(255), Some((9, 0)), false).unwrap();
        assert_eq!(image.content, [10, 20, 30].repeat(4));
        assert_eq!(image.dict.get(b"SMask").unwrap().as_reference().unwrap(), (9, 0));
        assert!(image.dict.get(b"Filter").is_err());
    }

    #[test]
    fn compressed_images_declare_flate() {
        let image = color_image(&raster(255), None, true).unwrap();
        assert_eq!(image.dict.get(b"Filter").unwrap().as_name().unwrap(), b"FlateDecode");
        assert_ne!(image.content, [10, 20, 30].repeat(4));
    }
}
