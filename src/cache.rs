//! Persistent verdict cache keyed by repository and branch.
//!
//! One TOML file per repository id under the cache directory, holding a
//! `branch → passed` table. Entries are idempotent overwrites with no
//! expiry: a hit always short-circuits re-evaluation, so a stale entry can
//! mask a later-fixed or later-broken check until cleared with
//! `gate cache clear`. Writers from separate processes are not coordinated;
//! merges in a single checkout are sequential by construction, and
//! concurrent invocations against the same checkout are out of scope.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Current cache file format version.
const CACHE_VERSION: u32 = 1;

/// Stable identifier for a repository, derived from its canonical root path.
pub fn repository_id(root: &Path) -> String {
    let canonical = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let digest = Sha256::digest(canonical.to_string_lossy().as_bytes());
    format!("{digest:x}")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    #[serde(default)]
    verdicts: BTreeMap<String, bool>,
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            verdicts: BTreeMap::new(),
        }
    }
}

/// On-disk verdict store.
#[derive(Debug, Clone)]
pub struct VerdictCache {
    dir: PathBuf,
}

impl VerdictCache {
    /// Open the cache in the platform cache directory.
    pub fn open_default() -> Result<Self> {
        let base = dirs::cache_dir()
            .ok_or_else(|| Error::Cache("no cache directory available".to_string()))?;
        Ok(Self::at(base.join("gh-gate")))
    }

    /// Open the cache rooted at `dir`.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the cache file for `repo_id`.
    pub fn file_path(&self, repo_id: &str) -> PathBuf {
        self.dir.join(format!("{repo_id}.toml"))
    }

    /// Look up the cached verdict for (`repo_id`, `branch`).
    pub fn lookup(&self, repo_id: &str, branch: &str) -> Result<Option<bool>> {
        Ok(self.load(repo_id)?.verdicts.get(branch).copied())
    }

    /// Store a verdict, overwriting any prior entry for the same key.
    pub fn store(&self, repo_id: &str, branch: &str, passed: bool) -> Result<()> {
        let mut file = self.load(repo_id)?;
        file.verdicts.insert(branch.to_string(), passed);
        self.save(repo_id, &file)
    }

    /// Remove every cached verdict for `repo_id`.
    pub fn clear(&self, repo_id: &str) -> Result<()> {
        let path = self.file_path(repo_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Cache(format!(
                "failed to remove {}: {e}",
                path.display()
            ))),
        }
    }

    /// All cached verdicts for `repo_id`, sorted by branch.
    pub fn entries(&self, repo_id: &str) -> Result<Vec<(String, bool)>> {
        Ok(self.load(repo_id)?.verdicts.into_iter().collect())
    }

    fn load(&self, repo_id: &str) -> Result<CacheFile> {
        let path = self.file_path(repo_id);
        if !path.exists() {
            return Ok(CacheFile::default());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Cache(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| Error::Cache(format!("failed to parse {}: {e}", path.display())))
    }

    fn save(&self, repo_id: &str, file: &CacheFile) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .map_err(|e| Error::Cache(format!("failed to create {}: {e}", self.dir.display())))?;
        }
        let content = toml::to_string_pretty(file)
            .map_err(|e| Error::Cache(format!("failed to serialize cache: {e}")))?;
        let with_header = format!(
            "# gh-gate verdict cache\n# Auto-generated - manual edits may be overwritten\n\n{content}"
        );
        let path = self.file_path(repo_id);
        fs::write(&path, with_header)
            .map_err(|e| Error::Cache(format!("failed to write {}: {e}", path.display())))
    }
}
