use crate::config::ChuvasConfig;
use crate::sources::error::SourceError;
use crate::sources::{RawSource, SourceSet};
use log::{debug, info};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Reads the configured rainfall and mortality files from a local directory
/// laid out like the published data drop.
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Builds the manifest. Files that do not exist are recorded as missing
    /// and surface later as load warnings; any other I/O failure aborts.
    pub async fn read_sources(&self, config: &ChuvasConfig) -> Result<SourceSet, SourceError> {
        let mut sources = SourceSet::new();

        for relative in &config.rainfall_files {
            sources = match self.read_optional(relative).await? {
                Some(bytes) => sources.with_rainfall(RawSource::utf8(relative.as_str(), bytes)),
                None => {
                    debug!("No rainfall file at {}", self.root.join(relative).display());
                    sources.with_missing_rainfall(relative.as_str())
                }
            };
        }

        for year in config.years() {
            let relative = config.mortality_file(year);
            match self.read_optional(&relative).await? {
                Some(bytes) => {
                    sources = sources.with_mortality_year(year, RawSource::latin1(relative, bytes))
                }
                None => debug!("No mortality file at {}", self.root.join(&relative).display()),
            }
        }

        info!(
            "Read {} rainfall and {} mortality sources from {}",
            sources.rainfall().len(),
            sources.mortality().len(),
            self.root.display()
        );
        Ok(sources)
    }

    async fn read_optional(&self, relative: &str) -> Result<Option<Vec<u8>>, SourceError> {
        let path = self.root.join(relative);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SourceError::Read(path, e)),
        }
    }
}
