//! cardex-finance: merchant-keyed categorization and spending aggregation.
//!
//! Categorization follows the same infer-once/cache-by-derived-key pattern as
//! schema detection: known merchants resolve from the cache, unknown ones go
//! to the external model in fixed-size batches.

pub mod aggregate;
pub mod categorizer;
pub mod merchant;

pub use categorizer::{CategoryInference, Categorizer, DEFAULT_BATCH_SIZE};
pub use merchant::merchant_key;
