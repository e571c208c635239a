//! CSV splitting engine.
//!
//! Streams the input once, copies the header into every part and rotates to
//! a new part file when the current one holds the configured number of data
//! records. At most one part is open at any time.

mod engine;
mod observer;
mod part;
mod record;
mod trim;
mod types;

pub use engine::Splitter;
pub use observer::{NoopObserver, SplitObserver};
pub use types::{PartSummary, SplitSummary};
