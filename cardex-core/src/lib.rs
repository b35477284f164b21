//! cardex-core: canonical transaction model, the closed category set, and the
//! JSON file cache both inference pipelines persist through.

pub mod cache;
pub mod category;
pub mod transaction;

pub use cache::JsonCache;
pub use category::Category;
pub use transaction::Transaction;
