use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use crate::error::{NavigatorError, Result};
use crate::repository::store::Repository;

use super::model::NavigationModel;

/// A model together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub path: PathBuf,
    /// SHA-1 of the source text
    pub fingerprint: String,
    pub model: NavigationModel,
}

/// Read a navigation model, as JSON for `.json` files and YAML otherwise.
pub fn load_model(path: &Path) -> Result<LoadedModel> {
    let text = std::fs::read_to_string(path).map_err(|e| NavigatorError::SourceUnreadable {
        what: "navigation model",
        path: path.display().to_string(),
        source: e,
    })?;

    let invalid = |reason: String| NavigatorError::InvalidSource {
        what: "navigation model",
        path: path.display().to_string(),
        reason,
    };

    let model = if path.extension().is_some_and(|e| e == "json") {
        NavigationModel::from_json_str(&text).map_err(|e| invalid(e.to_string()))?
    } else {
        NavigationModel::from_yaml_str(&text).map_err(|e| invalid(e.to_string()))?
    };

    let fingerprint = text_fingerprint(&text);
    tracing::info!(
        path = %path.display(),
        states = model.state_count(),
        transitions = model.transition_count(),
        %fingerprint,
        "loaded navigation model"
    );

    Ok(LoadedModel {
        path: path.to_path_buf(),
        fingerprint,
        model,
    })
}

pub fn text_fingerprint(text: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Owns the navigation model and repositories for one caller session.
///
/// Both are read on first use and then served from memory until
/// [`NavigationSession::reload`] or [`NavigationSession::clear`].
#[derive(Debug, Default)]
pub struct NavigationSession {
    model: Option<LoadedModel>,
    repositories: HashMap<PathBuf, Repository>,
}

impl NavigationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The model at `path`, loading it unless it is already cached.
    ///
    /// Asking for a different path replaces the cached model, but only
    /// once the new one has loaded.
    pub fn model(&mut self, path: &Path) -> Result<&NavigationModel> {
        let loaded = match self.model.take() {
            Some(loaded) if loaded.path == path => loaded,
            previous => match load_model(path) {
                Ok(loaded) => loaded,
                Err(e) => {
                    self.model = previous;
                    return Err(e);
                }
            },
        };
        Ok(&self.model.insert(loaded).model)
    }

    /// Drop everything cached and read the model at `path` again.
    pub fn reload(&mut self, path: &Path) -> Result<&NavigationModel> {
        self.clear();
        self.model(path)
    }

    /// Install an already-built model, e.g. one assembled in code.
    pub fn install(&mut self, loaded: LoadedModel) {
        self.model = Some(loaded);
    }

    pub fn loaded(&self) -> Option<&LoadedModel> {
        self.model.as_ref()
    }

    /// The repository at `path`, loading it unless it is already cached.
    pub fn repository(&mut self, path: &Path) -> Result<&Repository> {
        match self.repositories.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let repository = Repository::load(path)?;
                tracing::info!(path = %path.display(), entries = repository.len(), "loaded repository");
                Ok(&*entry.insert(repository))
            }
        }
    }

    pub fn clear(&mut self) {
        self.model = None;
        self.repositories.clear();
    }
}
