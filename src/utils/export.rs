//! Writing the session's citations to a text file.

use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Separator written after every citation
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// Errors that can occur while exporting citations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// There is nothing to write
    #[error("No citations to export")]
    Empty,

    /// The destination could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Render citations as the exported file body: one paragraph per citation,
/// each followed by a blank line.
pub fn render(citations: &[String]) -> String {
    let mut body = String::with_capacity(
        citations
            .iter()
            .map(|c| c.len() + PARAGRAPH_BREAK.len())
            .sum(),
    );
    for citation in citations {
        body.push_str(citation);
        body.push_str(PARAGRAPH_BREAK);
    }
    body
}

/// Append `extension` to a path that has none
pub fn with_default_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_none() && !extension.is_empty() {
        path.set_extension(extension);
    }
    path
}

/// Write citations to `path`, replacing any existing file.
///
/// The body goes to a temporary file next to the destination which is then
/// renamed over it, so a failed export never leaves a truncated file. An
/// existing destination is resolved through symlinks and keeps its
/// permissions; a new one is created with the usual umask-filtered mode.
/// Returns the number of citations written.
pub fn write_citations(path: &Path, citations: &[String]) -> Result<usize, ExportError> {
    if citations.is_empty() {
        return Err(ExportError::Empty);
    }

    let io_error = |source: io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let existing = fs::metadata(&target).ok().map(|meta| meta.permissions());

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut builder = tempfile::Builder::new();
    if existing.is_none() {
        if let Some(permissions) = create_permissions() {
            builder.permissions(permissions);
        }
    }

    let mut file = builder.tempfile_in(&dir).map_err(io_error)?;
    file.write_all(render(citations).as_bytes())
        .map_err(io_error)?;
    if let Some(permissions) = existing {
        file.as_file().set_permissions(permissions).map_err(io_error)?;
    }
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(&target).map_err(|e| io_error(e.error))?;

    tracing::info!(path = %target.display(), count = citations.len(), "Exported citations");
    Ok(citations.len())
}

/// Mode requested for a newly created export; the process umask still applies
#[cfg(unix)]
fn create_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn create_permissions() -> Option<Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn citations() -> Vec<String> {
        vec![
            "Smith (2020). Example Paper. Recuperado de https://doi.org/10.1000/xyz123".to_string(),
            "Doe. Other Paper. 2021; Disponible en: https://doi.org/10.1000/abc".to_string(),
        ]
    }

    #[test]
    fn test_render_paragraphs() {
        assert_eq!(render(&["a".to_string(), "b".to_string()]), "a\n\nb\n\n");
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_write_citations_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("citas.txt");

        let count = write_citations(&path, &citations()).unwrap();
        assert_eq!(count, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Smith (2020). Example Paper. Recuperado de https://doi.org/10.1000/xyz123\n\n\
             Doe. Other Paper. 2021; Disponible en: https://doi.org/10.1000/abc\n\n"
        );
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("citas.txt");
        std::fs::write(&path, "old content that is much longer than the new one").unwrap();

        write_citations(&path, &["new".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_gets_default_create_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        // A plain create shows what the current umask allows
        let reference = dir.path().join("reference");
        std::fs::File::create(&reference).unwrap();
        let expected = std::fs::metadata(&reference).unwrap().permissions().mode() & 0o777;

        let path = dir.path().join("citas.txt");
        write_citations(&path, &citations()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("citas.txt");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, Permissions::from_mode(0o640)).unwrap();

        write_citations(&path, &["new".to_string()]).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_through_symlink_keeps_link() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("real.txt");
        let link = dir.path().join("link.txt");
        std::fs::write(&target, "old").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        write_citations(&link, &["new".to_string()]).unwrap();

        assert!(std::fs::symlink_metadata(&link)
            .unwrap()
            .file_type()
            .is_symlink());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new\n\n");
    }

    #[test]
    fn test_empty_export_creates_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");

        let result = write_citations(&path, &[]);
        assert!(matches!(result, Err(ExportError::Empty)));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("citas.txt");

        let result = write_citations(&path, &citations());
        match result {
            Err(ExportError::Io { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_extension() {
        assert_eq!(
            with_default_extension(PathBuf::from("citas"), "txt"),
            PathBuf::from("citas.txt")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("notes.md"), "txt"),
            PathBuf::from("notes.md")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("citas"), ""),
            PathBuf::from("citas")
        );
    }
}
