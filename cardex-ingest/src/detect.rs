//! Cache-or-infer schema detection.
//!
//! Per-file inference is slow and costs money; statements from one provider
//! recur monthly with an identical layout, so descriptors are cached under
//! the date-stripped identity key and inference runs once per family.

use anyhow::{Context, Result};
use cardex_core::JsonCache;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::identity::file_identity_key;
use crate::schema::{SchemaDescriptor, SchemaError};

/// Sample rows handed to the model, not counting a potential header line.
pub const DEFAULT_SAMPLE_ROWS: usize = 10;

/// External schema-inference capability.
///
/// Takes the file name plus leading sample lines and returns the raw
/// structured object; the detector owns validation. Blocking, fallible,
/// no retries.
pub trait SchemaInference {
    fn infer_schema(&self, file_name: &str, sample: &str) -> Result<serde_json::Value>;
}

/// Resolves a file to its schema descriptor, consulting the cache first.
pub struct SchemaDetector<I> {
    inference: I,
    cache: JsonCache<SchemaDescriptor>,
    sample_rows: usize,
}

impl<I: SchemaInference> SchemaDetector<I> {
    pub fn new(inference: I, cache_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            inference,
            cache: JsonCache::load(cache_path.as_ref())?,
            sample_rows: DEFAULT_SAMPLE_ROWS,
        })
    }

    pub fn with_sample_rows(mut self, sample_rows: usize) -> Self {
        self.sample_rows = sample_rows;
        self
    }

    /// Schema for `path`: cached descriptor if its identity key is known,
    /// otherwise one inference call whose result is cached and persisted
    /// before returning.
    pub fn detect(&mut self, path: &Path) -> Result<SchemaDescriptor> {
        let key = file_identity_key(path);
        if let Some(descriptor) = self.cache.get(&key) {
            return Ok(descriptor.clone());
        }

        let sample = self.read_sample(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let value = self
            .inference
            .infer_schema(&file_name, &sample)
            .map_err(|e| SchemaError::Inference(e.to_string()))?;
        let descriptor = SchemaDescriptor::from_value(value)
            .with_context(|| format!("inferred schema for {file_name}"))?;

        self.cache.put(key, descriptor.clone());
        self.cache.flush()?;
        Ok(descriptor)
    }

    /// Leading lines only; +1 for a potential header row.
    fn read_sample(&self, path: &Path) -> Result<String> {
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let mut lines = Vec::new();
        for line in BufReader::new(file).lines().take(self.sample_rows + 1) {
            lines.push(line.with_context(|| format!("read {}", path.display()))?);
        }
        Ok(lines.join("\n"))
    }
}
