use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelStoreError {
    #[error("failed to read label file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("label file {0} contains no labels")]
    Empty(String),
}

/// Class names loaded from a plain text file, one label per line. The
/// 0-based line index is the label id the classifier reports.
#[derive(Debug, Clone)]
pub struct LabelStore {
    labels: Vec<String>,
}

impl LabelStore {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LabelStoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LabelStoreError::Io {
            path: path.display().to_string(),
            source,
        })?;

        // Blank lines are kept so that line numbers keep matching label ids.
        let labels: Vec<String> = content.lines().map(|line| line.trim().to_string()).collect();

        if labels.iter().all(|label| label.is_empty()) {
            return Err(LabelStoreError::Empty(path.display().to_string()));
        }

        Ok(Self { labels })
    }

    /// Human-readable name for a label id, falling back to the bare id for
    /// anything outside the label file.
    pub fn name(&self, label_id: usize) -> String {
        self.labels
            .get(label_id)
            .cloned()
            .unwrap_or_else(|| format!("label {}", label_id))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
