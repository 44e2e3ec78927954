//! Domain model for folders, notes and their write shapes.
//!
//! # Responsibility
//! - Define the persisted row shapes for `noteful_folders` and `noteful_notes`.
//! - Define partial-update shapes used by patch operations.
//! - Define the tri-state request field used to tell absent from null.
//!
//! # Invariants
//! - `id` values are assigned by the store and never reused or changed.
//! - A note always references exactly one folder through `folder_id`.

pub mod field;
pub mod folder;
pub mod note;
