//! Output file writing.
//!
//! Every file goes to a temporary file in the target directory first and is
//! renamed into place once fully written, so a failed run leaves no partial
//! output behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::AppError;
use crate::models::OutputFile;

/// Write `bytes` to `path` atomically.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| AppError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| AppError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| AppError::io(path, e.error))?;
    Ok(())
}

/// Write all files of one conversion next to each other.
///
/// Files are named `<stem>.<extension>` inside `dir`. When any write fails,
/// the files already written by this call are removed again.
pub fn write_outputs(
    dir: &Path,
    stem: &str,
    files: &[OutputFile],
    tags: bool,
) -> Result<Vec<PathBuf>, AppError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(file.file_name(stem, tags));
        if let Err(e) = write_atomic(&path, &file.bytes) {
            for done in &written {
                let _ = std::fs::remove_file(done);
            }
            return Err(e);
        }
        tracing::info!(path = %path.display(), bytes = file.bytes.len(), "Wrote output");
        written.push(path);
    }
    Ok(written)
}

/// Output stem for an input path: the file name without its extension or
/// CiderPress tag.
pub fn output_stem(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = name.split('#').next().unwrap_or(&name).to_string();
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tags;

    #[test]
    fn test_write_atomic_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PIC.SHR");
        write_atomic(&path, &[1, 2, 3]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PIC.SHR");
        std::fs::write(&path, b"old contents").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_write_atomic_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("X.A2FC");
        assert!(matches!(write_atomic(&path, &[0]), Err(AppError::Io { .. })));
    }

    #[test]
    fn test_write_outputs_with_tags() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            OutputFile::new("AUX", Some(tags::BIN_2000), vec![1]),
            OutputFile::new("BIN", Some(tags::BIN_2000), vec![2]),
        ];
        let written = write_outputs(dir.path(), "CAT", &files, true).unwrap();
        assert_eq!(written[0], dir.path().join("CAT.AUX#062000"));
        assert_eq!(std::fs::read(&written[1]).unwrap(), vec![2]);
    }

    #[test]
    fn test_output_stem() {
        assert_eq!(output_stem(Path::new("images/cat.png")), "cat");
        assert_eq!(output_stem(Path::new("CAT.SHR#C10000")), "CAT");
        assert_eq!(output_stem(Path::new("noext")), "noext");
        assert_eq!(output_stem(Path::new("archive.tar.png")), "archive.tar");
    }
}
