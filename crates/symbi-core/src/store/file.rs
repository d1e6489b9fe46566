use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::KvStore;
use super::error::{StoreError, StoreResult};

const ENTRY_EXTENSION: &str = "json";

const TEMP_EXTENSION: &str = "tmp";

/// File-per-key store rooted at a directory.
///
/// File names are the hex-encoded key, so any key maps to a portable name. Each write goes
/// to its own uniquely named temporary file that is renamed over the entry, so concurrent
/// writers to one key never share a temp file.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_root(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::Unavailable {
                message: format!("cannot create {}: {e}", self.root.display()),
            })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", encode_key(key), ENTRY_EXTENSION))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!(
            "{}.{}.{}",
            encode_key(key),
            uuid::Uuid::new_v4().simple(),
            TEMP_EXTENSION
        ))
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.entry_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.ensure_root().await?;

        let temp_path = self.temp_path(key);
        let final_path = self.entry_path(key);

        let written = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&value).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&temp_path, &final_path).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        debug!(key, bytes = value.len(), "Entry written");
        Ok(())
    }

    async fn del(&self, key: &str) -> StoreResult<bool> {
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();

            if let Some(ext) = path.extension()
                && ext == ENTRY_EXTENSION
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && let Some(key) = decode_key(stem)
                && key.starts_with(prefix)
            {
                match fs::read(&path).await {
                    Ok(bytes) => entries.push((key, bytes)),
                    // Deleted between listing and reading.
                    Err(e) if e.kind() == ErrorKind::NotFound => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }
}

fn encode_key(key: &str) -> String {
    key.bytes().map(|b| format!("{b:02x}")).collect()
}

fn decode_key(encoded: &str) -> Option<String> {
    if encoded.len() % 2 != 0 {
        return None;
    }
    let bytes = (0..encoded.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(encoded.get(i..i + 2)?, 16).ok())
        .collect::<Option<Vec<u8>>>()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_encoding() {
        assert_eq!(encode_key("a:1"), "613a31");
        assert_eq!(decode_key("613a31").as_deref(), Some("a:1"));
        assert_eq!(decode_key("613"), None);
        assert_eq!(decode_key("zz"), None);
    }
}
