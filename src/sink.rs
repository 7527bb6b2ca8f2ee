use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where a rendered document is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// An exact file path.
    File(PathBuf),
    /// A directory; the file is named `<prefix>_<unix millis>.pdf`.
    Directory { dir: PathBuf, prefix: String },
}

impl OutputSink {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        OutputSink::File(path.into())
    }

    pub fn directory(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        OutputSink::Directory {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Resolves the target path, using `at` to name files in a directory sink.
    pub fn resolve(&self, at: DateTime<Utc>) -> PathBuf {
        match self {
            OutputSink::File(path) => path.clone(),
            OutputSink::Directory { dir, prefix } => dir.join(timestamped_file_name(prefix, at)),
        }
    }
}

/// The result of a successful render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    /// The written file, or `None` when the document was only rendered in memory.
    pub location: Option<PathBuf>,
}

pub fn timestamped_file_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}.pdf", prefix, at.timestamp_millis())
}

/// Writes `bytes` to `path` through a temporary sibling file.
///
/// Readers see either the previous file or the complete new one. On failure
/// the temporary file is removed and `path` is left untouched.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".invoice-")
        .suffix(".partial")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn directory_sink_names_by_millis() {
        let at = Utc.timestamp_millis_opt(1_760_000_000_123).unwrap();
        let sink = OutputSink::directory("/tmp/out", "VTM");
        assert_eq!(sink.resolve(at), PathBuf::from("/tmp/out/VTM_1760000000123.pdf"));
    }

    #[test]
    fn file_sink_is_used_verbatim() {
        let sink = OutputSink::file("/tmp/invoice.pdf");
        assert_eq!(sink.resolve(Utc::now()), PathBuf::from("/tmp/invoice.pdf"));
    }

    #[test]
    fn atomic_write_replaces_and_leaves_no_partials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pdf");
        write_atomically(&path, b"first").unwrap();
        write_atomically(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn missing_directory_fails_without_creating_anything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("a.pdf");
        let err = write_atomically(&path, b"data").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!path.exists());
    }
}
