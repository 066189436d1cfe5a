//! Agenda grid computations: civil-date helpers, the per-day slot index and
//! the same-professional overlap scan. All pure and synchronous.

pub mod dates;
pub mod slots;

pub use slots::{SlotIndex, detect_overlaps};
