use std::cell::RefCell;

use solana_sdk::hash::hash;

use super::{Storage, StorageFile, UploadError};
use crate::constants::MOCK_STORAGE_URL;

/// Keeps uploads in memory and addresses them by content hash.
///
/// Nothing it returns resolves over the network; useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RefCell<Vec<(String, StorageFile)>>,
}

impl MemoryStorage {
    pub fn uploads(&self) -> Vec<StorageFile> {
        self.files
            .borrow()
            .iter()
            .map(|(_, file)| file.clone())
            .collect()
    }

    pub fn get(&self, uri: &str) -> Option<StorageFile> {
        self.files
            .borrow()
            .iter()
            .find(|(locator, _)| locator == uri)
            .map(|(_, file)| file.clone())
    }
}

impl Storage for MemoryStorage {
    fn upload(&self, file: &StorageFile) -> Result<String, UploadError> {
        let uri = format!("{}/{}", MOCK_STORAGE_URL, hash(&file.bytes));
        self.files.borrow_mut().push((uri.clone(), file.clone()));
        Ok(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(bytes: &[u8]) -> StorageFile {
        StorageFile {
            file_name: "f".to_string(),
            content_type: "application/octet-stream".to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn same_content_same_locator() {
        let storage = MemoryStorage::default();
        let a = storage.upload(&file(b"abc")).unwrap();
        let b = storage.upload(&file(b"abc")).unwrap();
        let c = storage.upload(&file(b"abd")).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with(MOCK_STORAGE_URL));
        assert_eq!(storage.uploads().len(), 3);
    }
}
