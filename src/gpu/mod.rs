//! GPU resource management.
//!
//! Device/surface initialization, growable buffers, bind group helpers,
//! attachment and lookup textures, and the storage-buffer mirror of the
//! trail store.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Bind group layout entries and samplers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Render targets, depth/MSAA attachments, and the gradient texture.
pub mod texture;
/// Storage-buffer mirror of the trail store.
pub mod trail_buffers;
