//! The backing document: the whole order collection as one JSON array.

use crate::server::model::order::Order;
use derive_more::{Display, Error};
use log::warn;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Display, Error)]
pub(crate) enum StorageError {
    #[display("failed to encode orders, {_0}")]
    Encode(serde_json::Error),
    #[display("failed to write orders file, {_0}")]
    Io(io::Error),
}

#[derive(Debug, Clone)]
pub(crate) struct OrderFile {
    path: PathBuf,
}

impl OrderFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty collection if the document does not exist yet.
    /// Returns whether the file was created; an existing file is never touched.
    pub async fn init(&self) -> Result<bool, StorageError> {
        match fs::metadata(&self.path).await {
            Ok(_) => return Ok(false),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StorageError::Io(e)),
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(StorageError::Io)?;
        }
        self.save(&[]).await?;
        Ok(true)
    }

    /// Read the whole collection. A document that is not a readable JSON array loads as empty;
    /// the records inside the array are not checked.
    pub async fn load(&self) -> Vec<Order> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("failed to read {}, treating as empty, {}", self.path.display(), e);
                return Vec::new();
            }
        };
        match serde_json::from_slice::<Vec<Order>>(&bytes) {
            Ok(orders) => orders,
            Err(e) => {
                warn!("{} is not a JSON array, treating as empty, {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Replace the document with `orders`, through a temporary file and a rename.
    pub async fn save(&self, orders: &[Order]) -> Result<(), StorageError> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        orders.serialize(&mut serializer).map_err(StorageError::Encode)?;

        let tmp = self.temp_path();
        fs::write(&tmp, &buf).await.map_err(StorageError::Io)?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            fs::remove_file(&tmp).await.ok();
            return Err(StorageError::Io(e));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("orders"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn order(id: i64, status: &str) -> Order {
        Order::from(json!({
            "udid": format!("U{id}"),
            "status": status,
            "date": "2024-01-01",
            "id": id,
        }))
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let file = OrderFile::new(dir.path().join("orders.json"));
        assert!(file.load().await.is_empty());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempdir().unwrap();
        let file = OrderFile::new(dir.path().join("orders.json"));
        let orders = vec![
            order(1, "open"),
            Order::from(json!({"udid": "U2", "status": "closed", "date": "2024-01-02", "id": 2, "note": "rush"})),
        ];

        file.save(&orders).await.unwrap();
        assert_eq!(file.load().await, orders);
        assert!(!file.temp_path().exists());
    }

    #[tokio::test]
    async fn saved_document_is_indented() {
        let dir = tempdir().unwrap();
        let file = OrderFile::new(dir.path().join("orders.json"));
        file.save(&[order(1, "open")]).await.unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert!(text.starts_with("[\n    {\n        \"udid\": \"U1\",\n        \"status\": \"open\""));
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.json");
        let file = OrderFile::new(&path);

        for content in ["", "{not json", r#"{"id": 1}"#, "[1, 2"] {
            std::fs::write(&path, content).unwrap();
            assert!(file.load().await.is_empty(), "content: {content}");
        }
    }

    #[tokio::test]
    async fn loosely_typed_records_are_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "udid": "A", "status": "open", "date": "d"}, {"id": 2, "udid": 12345}, {"id": 3}]"#,
        )
        .unwrap();
        let file = OrderFile::new(&path);

        let orders = file.load().await;
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[1].get("udid"), Some(&json!(12345)));

        file.save(&orders).await.unwrap();
        assert_eq!(file.load().await, orders);
    }

    #[tokio::test]
    async fn init_only_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("orders.json");
        let file = OrderFile::new(&path);

        assert!(file.init().await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");

        std::fs::write(&path, "garbage").unwrap();
        assert!(!file.init().await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "garbage");
    }
}
