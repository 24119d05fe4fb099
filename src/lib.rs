//! # resume-press – paginated resume layout and PDF export
//!
//! This crate lays out a structured resume document into fixed-size pages
//! and exports it as a PDF. The pipeline stages are:
//!
//! 1. **Flatten** – resume fields → linear block list ([`blocks`])
//! 2. **Group** – blocks → atomic/splittable layout groups ([`group`])
//! 3. **Typeset** – flexbox pass with Taffy, producing measured boxes
//!    ([`typeset`], [`measure`])
//! 4. **Pack** – greedy first-fit pagination with mid-list splitting
//!    ([`packer`])
//! 5. **Plan** – frozen, serializable page plans ([`plan`], [`preview`],
//!    [`export`])
//! 6. **Render** – emit PDF bytes via printpdf ([`render`])
//!
//! The stateful [`engine::LayoutEngine`] drives the edit → measure → pack
//! cycle with a generation guard, so measurements from superseded document
//! snapshots are never packed.

pub mod blocks;
pub mod document;
pub mod engine;
pub mod error;
pub mod export;
pub mod fonts;
pub mod group;
pub mod measure;
pub mod metrics;
pub mod packer;
pub mod pipeline;
pub mod plan;
pub mod preview;
pub mod render;
pub mod style;
pub mod typeset;

// Re-exports for convenience
pub use document::Resume;
pub use engine::{EngineState, LayoutEngine};
pub use error::LayoutError;
pub use pipeline::{export_pdf, export_pdf_from_json, preview_plan, PressConfig};
pub use plan::LayoutPlan;
