use thiserror::Error;

/// Errors raised while constructing or decoding a raster or font asset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Raster input is empty")]
    Empty,
    #[error("Raster has a zero dimension ({width}x{height})")]
    ZeroDimension { width: u32, height: u32 },
    #[error("Pixel buffer holds {actual} bytes, expected {expected} for RGBA8")]
    BufferMismatch { expected: usize, actual: usize },
    #[error("Failed to decode raster: {0}")]
    Decode(String),
    #[error("Unusable font: {0}")]
    Font(String),
}

impl From<image::ImageError> for AssetError {
    fn from(err: image::ImageError) -> Self {
        AssetError::Decode(err.to_string())
    }
}

/// An owned, decoded bitmap in non-premultiplied RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterAsset {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterAsset {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AssetError> {
        if width == 0 || height == 0 {
            return Err(AssetError::ZeroDimension { width, height });
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(AssetError::ZeroDimension { width, height })?;
        if pixels.len() != expected {
            return Err(AssetError::BufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decodes an encoded image (PNG or JPEG).
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        if bytes.is_empty() {
            return Err(AssetError::Empty);
        }
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn has_transparency(&self) -> bool {
        self.pixels.chunks_exact(4).any(|px| px[3] != u8::MAX)
    }

    /// Color channels without alpha, row-major.
    pub fn rgb_channels(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    pub fn alpha_channel(&self) -> Vec<u8> {
        self.pixels.chunks_exact(4).map(|px| px[3]).collect()
    }
}
