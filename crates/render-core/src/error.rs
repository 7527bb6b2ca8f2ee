use invoice_types::AssetError;
use thiserror::Error;

/// Every failure is fatal to the render call that raised it.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Encoding(err.to_string())
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Asset(AssetError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_errors_convert() {
        let err: RenderError = AssetError::Empty.into();
        assert!(matches!(err, RenderError::Asset(AssetError::Empty)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: RenderError = io.into();
        assert!(matches!(err, RenderError::Io(_)));
        assert!(err.to_string().contains("read-only"));
    }
}
