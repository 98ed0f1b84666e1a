use crate::error::{FilesError, Result};
use filetally_counter::{CountReport, CounterConfig, WordCounter};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const TEXT_FILE_EXTENSIONS: &[&str] = &["txt", "md"];

/// File-management operations over a single directory of text files.
///
/// All operations see only files directly under the managed directory with
/// a text extension (`txt`, `md`); everything else is invisible to them.
pub struct FileManager {
    dir: PathBuf,
}

impl FileManager {
    /// Create a manager for `dir`, which must exist and be a directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(FilesError::InvalidDirectory(dir.display().to_string()));
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check if the file has a text extension
    fn is_text_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                TEXT_FILE_EXTENSIONS.iter().any(|candidate| *candidate == ext)
            })
            .unwrap_or(false)
    }

    /// Resolve a caller-supplied name inside the managed directory.
    ///
    /// Rejects anything that would escape it: absolute paths, separators,
    /// parent components.
    fn resolve_name(&self, name: &str) -> Result<PathBuf> {
        let candidate = Path::new(name);
        let mut components = candidate.components();
        let is_plain_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !is_plain_name {
            return Err(FilesError::InvalidFileName(name.to_string()));
        }
        Ok(self.dir.join(name))
    }

    /// Names of text files directly under the directory, sorted.
    pub fn list_files(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for result in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            match result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let path = entry.path();
                    if !Self::is_text_file(path) {
                        continue;
                    }
                    if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                        names.push(name.to_string());
                    }
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }
        names.sort();
        Ok(names)
    }

    /// Create (or overwrite) a file with the given content.
    pub async fn create_file(&self, name: &str, content: &str) -> Result<()> {
        let path = self.resolve_name(name)?;
        tokio::fs::write(&path, content).await?;
        log::info!("Created {}", path.display());
        Ok(())
    }

    /// Delete a file by name.
    pub async fn delete_file(&self, name: &str) -> Result<()> {
        let path = self.resolve_name(name)?;
        if !path.is_file() {
            return Err(FilesError::FileNotFound(name.to_string()));
        }
        tokio::fs::remove_file(&path).await?;
        log::info!("Deleted {}", path.display());
        Ok(())
    }

    /// Delete text files whose content duplicates another's.
    ///
    /// Files are grouped by SHA-256 of their content; the lexicographically
    /// first name in each group survives. Returns the deleted names.
    pub async fn delete_duplicates(&self) -> Result<Vec<String>> {
        let mut survivors: HashMap<[u8; 32], String> = HashMap::new();
        let mut deleted = Vec::new();

        // list_files is sorted, so the first name seen per digest is the
        // lexicographically first.
        for name in self.list_files()? {
            let path = self.dir.join(&name);
            let content = tokio::fs::read(&path).await?;
            let digest: [u8; 32] = Sha256::digest(&content).into();
            if survivors.contains_key(&digest) {
                tokio::fs::remove_file(&path).await?;
                log::info!("Deleted duplicate {name}");
                deleted.push(name);
            } else {
                survivors.insert(digest, name);
            }
        }
        Ok(deleted)
    }

    /// Names of text files whose content contains `keyword`, sorted.
    pub async fn keyword_search(&self, keyword: &str) -> Result<Vec<String>> {
        let mut matches = Vec::new();
        for name in self.list_files()? {
            let path = self.dir.join(&name);
            match tokio::fs::read_to_string(&path).await {
                Ok(content) if content.contains(keyword) => matches.push(name),
                Ok(_) => {}
                Err(e) => log::warn!("Skipping {name}: {e}"),
            }
        }
        Ok(matches)
    }

    /// Top words of a managed file, rendered as `"word: count"` lines.
    pub async fn count_words(&self, name: &str, num_threads: usize) -> Result<Vec<String>> {
        let report = self
            .count_words_with(name, CounterConfig::with_threads(num_threads))
            .await?;
        Ok(report.top.iter().map(|entry| entry.to_string()).collect())
    }

    /// Full counting run over a managed file with an explicit configuration.
    pub async fn count_words_with(
        &self,
        name: &str,
        config: CounterConfig,
    ) -> Result<CountReport> {
        let path = self.resolve_name(name)?;
        let counter = WordCounter::new(config)?;
        Ok(counter.count(&path).await?)
    }
}
