//! Источники байтов для ассетов (файловая система, память)

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::io;
use std::path::PathBuf;

/// Ошибка загрузки одного ассета
///
/// Никогда не пробрасывается наружу из `load_assets` — заменяется fallback'ом.
#[derive(Debug)]
pub enum AssetLoadError {
    NotFound { path: String },
    Io { path: String, source: io::Error },
    /// Файл есть, но пустой
    Empty { path: String },
}

impl fmt::Display for AssetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "asset '{path}' not found"),
            Self::Io { path, source } => write!(f, "asset '{path}' read failed: {source}"),
            Self::Empty { path } => write!(f, "asset '{path}' is empty"),
        }
    }
}

impl std::error::Error for AssetLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Async источник сырых байтов ассета
///
/// Каждый fetch независим; loader запускает их параллельно на IoTaskPool.
pub trait AssetSource: Send + Sync + 'static {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, AssetLoadError>> + Send;
}

/// Чтение с диска относительно root директории
#[derive(Debug, Clone)]
pub struct FileAssetSource {
    root: PathBuf,
}

impl FileAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FileAssetSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, AssetLoadError>> + Send {
        let full_path = self.root.join(path);
        let path = path.to_string();

        async move {
            match std::fs::read(&full_path) {
                Ok(bytes) if bytes.is_empty() => Err(AssetLoadError::Empty { path }),
                Ok(bytes) => Ok(bytes),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    Err(AssetLoadError::NotFound { path })
                }
                Err(err) => Err(AssetLoadError::Io { path, source: err }),
            }
        }
    }
}

/// In-memory источник (тесты, встроенные ассеты)
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryAssetSource {
    pub fn with_file(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), bytes.into());
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, AssetLoadError>> + Send {
        let result = match self.files.get(path) {
            Some(bytes) if bytes.is_empty() => Err(AssetLoadError::Empty {
                path: path.to_string(),
            }),
            Some(bytes) => Ok(bytes.clone()),
            None => Err(AssetLoadError::NotFound {
                path: path.to_string(),
            }),
        };

        async move { result }
    }
}
