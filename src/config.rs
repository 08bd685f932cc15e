use crate::{Error, FILE_EXTENSION, FOLDER_NAME};
use std::path::{Path, PathBuf};

/// Where to find the game's resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_path: PathBuf,
    resource_folder: String,
}

impl Config {
    /// Constructs a configuration from the folder holding the game's executable
    /// and the name of its resource folder (`rsc_p` or `rsc_k`).
    ///
    /// # Errors
    /// Errors if either is empty.
    pub fn new(base_path: impl Into<PathBuf>, resource_folder: impl Into<String>) -> Result<Self, Error> {
        let base_path = base_path.into();
        let resource_folder = resource_folder.into();
        if base_path.as_os_str().is_empty() {
            return Err(Error::MissingConfig("base path"));
        }
        if resource_folder.is_empty() {
            return Err(Error::MissingConfig("resource folder"));
        }
        Ok(Self {
            base_path,
            resource_folder,
        })
    }

    /// Returns the folder holding the game's executable.
    #[inline]
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the name of the resource folder.
    #[inline]
    #[must_use]
    pub fn resource_folder(&self) -> &str {
        &self.resource_folder
    }

    /// Returns the folder all PXPACK files are kept in.
    #[must_use]
    pub fn field_folder(&self) -> PathBuf {
        self.base_path.join(&self.resource_folder).join(FOLDER_NAME)
    }

    /// Returns the path of the PXPACK file with the given base filename.
    #[must_use]
    pub fn pxpack_path(&self, base_filename: &str) -> PathBuf {
        self.field_folder()
            .join(format!("{base_filename}{FILE_EXTENSION}"))
    }
}
