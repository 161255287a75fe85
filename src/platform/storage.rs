//! Platform storage backends

#[cfg(any(target_arch = "wasm32", test))]
use crate::store::{Storage, StoreError};

/// `window.localStorage` (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// `None` when the browser denies storage access
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(|e| StoreError::Read {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

/// LocalStorage, or an in-memory fallback if the browser refuses it
#[cfg(target_arch = "wasm32")]
pub fn default_storage() -> Box<dyn Storage> {
    match LocalStore::open() {
        Some(store) => Box::new(store),
        None => {
            log::warn!("LocalStorage unavailable, records will not survive reload");
            Box::new(crate::store::MemoryStore::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use crate::store::{Storage, StoreError};

    /// One `<key>.json` file per key inside a directory
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> PathBuf {
            self.dir.join(format!("{key}.json"))
        }
    }

    impl Storage for FileStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(value) => Ok(Some(value)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(StoreError::Read {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        /// Write to a temp file then rename over the target
        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            let write_err = |e: std::io::Error| StoreError::Write {
                key: key.to_string(),
                reason: e.to_string(),
            };
            fs::create_dir_all(&self.dir).map_err(write_err)?;

            let target = self.path_for(key);
            let tmp = target.with_extension("json.tmp");
            fs::write(&tmp, value).map_err(write_err)?;
            fs::rename(&tmp, &target).map_err(write_err)?;
            Ok(())
        }
    }
}
