//! Narrative composition and the read-only view for Scorn.
//!
//! # Modules
//!
//! - [`composer`] -- [`Scene`] snapshot and the hash-keyed text builders:
//!   realization, descriptions, distant lines, context lines and cues.
//! - [`lexicon`] -- Phrase pools keyed by area, settlement, structure and
//!   exterior type.
//! - [`status`] -- Vital and legitimacy bands and the status header.
//! - [`view`] -- [`View`] projection and its plain-text rendering.
//!
//! [`Scene`]: composer::Scene
//! [`View`]: view::View

pub mod composer;
pub mod lexicon;
pub mod status;
pub mod view;

pub use composer::{LocationText, Scene, settlement_line};
pub use status::status_header;
pub use view::{ItemOption, View};
