use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

use crate::errors::GenerationError;
use crate::faker_rs::locales::LocaleKey;

/// Line-list assets shipped per locale under `assets/<locale>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LineAsset {
    FirstNames,
    LastNames,
    Cities,
    Streets,
}

impl LineAsset {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::FirstNames => "first_names.txt",
            Self::LastNames => "last_names.txt",
            Self::Cities => "cities.txt",
            Self::Streets => "streets.txt",
        }
    }
}

/// Directory holding the bundled assets of this crate.
pub fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Lazily reads and caches line-list assets.
///
/// A missing file is cached as an empty list; callers fall back to faker
/// data in that case.
#[derive(Debug)]
pub struct LineAssets {
    root: PathBuf,
    cache: RwLock<BTreeMap<(LocaleKey, LineAsset), Arc<Vec<String>>>>,
}

impl LineAssets {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            cache: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn lines(
        &self,
        locale: LocaleKey,
        asset: LineAsset,
    ) -> Result<Arc<Vec<String>>, GenerationError> {
        if let Some(lines) = self
            .cache
            .read()
            .ok()
            .and_then(|cache| cache.get(&(locale, asset)).cloned())
        {
            return Ok(lines);
        }

        let path = self.root.join(locale.as_str()).join(asset.file_name());
        let lines = Arc::new(read_lines(&path)?);

        let mut cache = self
            .cache
            .write()
            .map_err(|_| GenerationError::Asset("asset cache poisoned".to_string()))?;
        cache.insert((locale, asset), Arc::clone(&lines));
        Ok(lines)
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, GenerationError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(GenerationError::Asset(format!(
                "failed to read asset {}: {}",
                path.display(),
                err
            )));
        }
    };

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Process-wide loader over [`assets_root`].
pub fn line_assets() -> &'static LineAssets {
    static ASSETS: OnceLock<LineAssets> = OnceLock::new();
    ASSETS.get_or_init(|| LineAssets::new(assets_root()))
}
