//! The bundled watermark logo.

use invoice_types::{AssetError, RasterAsset};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// PNG bytes of the logo embedded into the binary.
pub const BUNDLED_LOGO_PNG: &[u8] = include_bytes!("../assets/logo.png");

static BUNDLED_LOGO: Lazy<Result<Arc<RasterAsset>, AssetError>> =
    Lazy::new(|| RasterAsset::decode(BUNDLED_LOGO_PNG).map(Arc::new));

/// The decoded bundled logo, decoded once per process.
pub fn bundled_watermark() -> Result<Arc<RasterAsset>, AssetError> {
    BUNDLED_LOGO.clone()
}
