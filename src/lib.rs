// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! GPU-driven renderer for animated 3D trail curves built on wgpu.
//!
//! Every trail is a procedurally generated ribbon whose points live in one
//! shared storage buffer. Per-trail metadata (color, width, glow, slice of
//! the point array) lives in a second storage buffer, and each trail is drawn
//! with a single instanced draw of a 4-vertex quad: one instance per segment.
//!
//! # Key entry points
//!
//! - [`engine::TrailEngine`] - the facade a UI drives (add/clear trails,
//!   input, stats, per-frame render)
//! - [`trail::TrailStore`] - the CPU-side source of truth for trails and
//!   points
//! - [`trail::generate_points`] - the parametric curve generator
//! - [`camera::OrbitController`] - drag/scroll orbit camera
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! Everything runs on the thread that owns the GPU context. Mutations go
//! to the [`trail::TrailStore`] first; when a GPU context is attached the
//! [`gpu::trail_buffers::TrailBuffers`] mirror is fully re-uploaded right
//! away, otherwise the upload is deferred until the next attach or frame.
//! The [`renderer::TrailRenderer`] then binds shared state once per frame
//! and issues one instanced draw per uploaded trail.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod trail;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{FrameStats, TrailEngine};
pub use error::TrailsError;
pub use input::{InputEvent, KeyAction, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
