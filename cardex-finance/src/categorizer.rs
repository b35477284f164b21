//! Cache-first batch categorization.
//!
//! Known merchant keys resolve without a model call; the rest go out in
//! fixed-size batches. The model answers with a JSON object mapping 1-based
//! batch positions to category labels, sometimes wrapped in code fences or
//! commentary, so the mapping is extracted from the text rather than parsed
//! directly. A batch whose response cannot be used degrades every
//! transaction in it to `Other` and the run continues.

use anyhow::Result;
use cardex_core::{Category, JsonCache, Transaction};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::merchant::merchant_key;

pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Malformed batch response; absorbed into the `Other` fallback, never fatal.
#[derive(Debug, Error)]
#[error("no category mapping in response: {0}")]
pub struct CategorizationParseError(pub String);

/// External categorization capability.
///
/// Takes the batch's description strings and returns the raw response text;
/// the categorizer owns extraction and validation. Blocking, fallible, no
/// retries.
pub trait CategoryInference {
    fn categorize_batch(&self, descriptions: &[String]) -> Result<String>;
}

/// Assigns categories, consulting the merchant cache first.
pub struct Categorizer<I> {
    inference: I,
    cache: JsonCache<Category>,
    batch_size: usize,
}

impl<I: CategoryInference> Categorizer<I> {
    pub fn new(inference: I, cache_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            inference,
            cache: JsonCache::load(cache_path.as_ref())?,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Populate `category` on every transaction. The merchant cache is
    /// flushed once, after all batches.
    pub fn categorize(&mut self, mut transactions: Vec<Transaction>) -> Result<Vec<Transaction>> {
        let mut uncached = Vec::new();
        for (i, txn) in transactions.iter_mut().enumerate() {
            match self.cache.get(&merchant_key(&txn.description)) {
                Some(category) => txn.category = Some(*category),
                None => uncached.push(i),
            }
        }

        for chunk in uncached.chunks(self.batch_size) {
            let descriptions: Vec<String> = chunk
                .iter()
                .map(|&i| transactions[i].description.clone())
                .collect();

            // A failed call or an unusable response both leave the mapping
            // empty: the whole batch falls back to Other.
            let mapping = match self.inference.categorize_batch(&descriptions) {
                Ok(text) => parse_batch_response(&text).unwrap_or_default(),
                Err(_) => HashMap::new(),
            };

            for (pos, &i) in chunk.iter().enumerate() {
                let label = mapping.get(&(pos + 1));
                match label.and_then(|l| Category::from_label(l)) {
                    Some(category) => {
                        transactions[i].category = Some(category);
                        self.cache.put(merchant_key(&transactions[i].description), category);
                    }
                    // Fallback is not cached: a transient bad response must
                    // not pin this merchant to Other on future runs.
                    None => transactions[i].category = Some(Category::Other),
                }
            }
        }

        self.cache.flush()?;
        Ok(transactions)
    }
}

/// Parse the model's text into a position -> label map.
fn parse_batch_response(
    text: &str,
) -> Result<HashMap<usize, String>, CategorizationParseError> {
    let value = extract_json_object(text)
        .ok_or_else(|| CategorizationParseError(text.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| CategorizationParseError(text.to_string()))?;

    let mut mapping = HashMap::new();
    for (key, val) in object {
        if let (Ok(pos), Some(label)) = (key.parse::<usize>(), val.as_str()) {
            mapping.insert(pos, label.to_string());
        }
    }
    Ok(mapping)
}

/// Pull the first JSON object out of a response that may wrap it in
/// code fences or surrounding prose.
fn extract_json_object(text: &str) -> Option<serde_json::Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
