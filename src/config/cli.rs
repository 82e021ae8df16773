use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 本機檔案系統；相對路徑以 `base_path` 為起點
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 以目前工作目錄為起點
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(Path::new(path))
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        tokio_test::block_on(storage.write_file("out/nested/chinese.csv", b"rank\n1\n")).unwrap();
        let data = tokio_test::block_on(storage.read_file("out/nested/chinese.csv")).unwrap();

        assert_eq!(data, b"rank\n1\n");
        assert!(dir.path().join("out/nested").is_dir());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = tokio_test::block_on(storage.read_file("missing.txt")).unwrap_err();
        assert!(matches!(err, EtlError::IoError(_)));
    }

    #[test]
    fn test_absolute_paths_ignore_base() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("german.txt");
        std::fs::write(&target, "1\tder\tart\tthe\n").unwrap();

        let storage = LocalStorage::new("/nonexistent-base");
        let data = tokio_test::block_on(storage.read_file(target.to_str().unwrap())).unwrap();
        assert_eq!(data, b"1\tder\tart\tthe\n");
    }
}
