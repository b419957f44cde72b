//! # Aisle Core
//!
//! Reorders a free-text shopping list to follow the walk through a store.
//!
//! ## Architecture
//!
//! ```text
//! raw text
//!     │
//!     ├──> split_list → item list
//!     │
//!     ├──> Resolver (one item at a time)
//!     │      ├─ exact lookup in the Lexicon
//!     │      ├─ similar-item suggestion (normalized Levenshtein > 0.7)
//!     │      ├─ InteractionPort: confirm substitution / choose section
//!     │      └─ confirmed mappings written through the Catalog (persisted)
//!     │
//!     └──> sort_entries
//!            └─ stable sort by section rank, unranked items last
//! ```
//!
//! ## Example
//!
//! ```rust
//! use aisle_core::{sort_text, Catalog, MemoryStore, Resolver, SectionChoice, SortOutcome};
//!
//! # struct Decline;
//! # #[async_trait::async_trait]
//! # impl aisle_core::InteractionPort for Decline {
//! #     async fn confirm_substitution(&mut self, _: &str, _: &str) -> aisle_core::Result<bool> {
//! #         Ok(false)
//! #     }
//! #     async fn choose_section(&mut self, _: &str, _: &[String]) -> aisle_core::Result<SectionChoice> {
//! #         Ok(SectionChoice::Cancelled)
//! #     }
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut catalog = Catalog::load(MemoryStore::new(), true).await;
//! let outcome = sort_text(&Resolver::default(), &mut catalog, "Milk\nBroccoli", &mut Decline)
//!     .await
//!     .unwrap();
//! if let SortOutcome::Sorted(report) = outcome {
//!     assert_eq!(report.sorted_texts(), vec!["Broccoli", "Milk"]);
//! }
//! # });
//! ```

mod bundle;
mod catalog;
mod config;
mod defaults;
mod error;
mod lexicon;
mod list_text;
mod normalize;
mod resolve;
mod session;
mod similarity;
mod sort;
mod store;

pub use bundle::{backup_file_name, ExportBundle, BUNDLE_VERSION};
pub use catalog::{Catalog, Change, SaveOutcome, ITEMS_KEY, SECTIONS_KEY};
pub use config::{AisleConfig, ResolverConfig, CONFIG_FILE_NAME};
pub use defaults::{default_lexicon, DEFAULT_ITEMS, DEFAULT_SECTIONS};
pub use error::{AisleError, Result};
pub use lexicon::{ItemFilter, Lexicon, SectionInsert, SectionPosition};
pub use list_text::{join_list, split_list};
pub use normalize::normalize_key;
pub use resolve::{InteractionPort, Resolution, ResolvedItem, Resolver, SectionChoice};
pub use session::{sort_items, sort_text, SortOutcome, SortReport};
pub use similarity::{
    best_match_above, find_best_match, similarity, SimilarMatch, DEFAULT_SIMILARITY_THRESHOLD,
};
pub use sort::{rank_of, sort_entries, Rank, ShoppingEntry};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
