//! Resource handlers for folders and notes.
//!
//! # Responsibility
//! - Validate request bodies before any store call.
//! - Orchestrate repository calls into create/get/list/update/delete flows.
//! - Produce sanitized output views.
//!
//! # Invariants
//! - Services stay transport-agnostic: no HTTP types here.
//! - Every text field leaving a view passes through `sanitize::sanitize`.

pub mod folder_service;
pub mod note_service;
pub mod sanitize;
