//! Reelsmith Content Model
//!
//! Defines the data contracts between the content source and the pipeline:
//! - **Items:** One content record per video to produce (title, description,
//!   source images, narration text)
//! - **Queue:** The ordered list of records awaiting processing
//! - **Ledger:** Append-only record of completed item ids; an id, once
//!   acknowledged, is never reprocessed
//!
//! Records are read-only to the pipeline; only the ledger is ever written.

pub mod item;
pub mod ledger;

pub use item::*;
pub use ledger::*;
