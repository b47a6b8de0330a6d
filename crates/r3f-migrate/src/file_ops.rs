use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `content` to `target` via a temp file in the same directory and a
/// rename, so readers never observe a half-written file.
pub fn atomic_write(target: &Path, content: &[u8]) -> io::Result<()> {
    let parent = target
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no parent directory"))?;
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Layout.style.jsx");
        atomic_write(&target, b"export const A = 1").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "export const A = 1");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("global.css");
        fs::write(&target, "@tailwind utilities;").unwrap();
        atomic_write(&target, b"*,::before{box-sizing:border-box}").unwrap();
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "*,::before{box-sizing:border-box}"
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("src").join("components").join("dom").join("a.jsx");
        atomic_write(&target, b"deep").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "deep");
    }
}
