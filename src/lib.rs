//! GPU-accelerated edge computation for graph visualization
//!
//! This crate computes per-edge geometry (midpoint and length), colors, and
//! visibility for large graphs on the GPU using wgpu compute shaders. It is
//! a backend processing unit for a rendering layer: the caller supplies node
//! positions, edge endpoint indices, and per-edge properties, and gets back
//! typed arrays ready for upload into whatever draws the edges.
//!
//! # Architecture
//!
//! Two layers:
//!
//! - [`EdgeComputeEngine`] (low level) — owns the wgpu device, the three
//!   compute pipelines, and the input textures. One call at a time, enforced
//!   by `&mut self`.
//! - [`GpuEdgeProcessor`] (high level) — initialize/process/dispose
//!   lifecycle, capability detection, and the soft-failure contract: when
//!   the environment has no usable GPU, calls return `false`/`None` instead
//!   of failing, so consumers can always fall back to a CPU path.
//!
//! Input arrays are packed into 2-D textures (square-ish layout, zero
//! padding), kernels address them by integer texel coordinate, and results
//! come back through storage buffers and a blocking staging-buffer readback.
//!
//! # Example
//!
//! ```rust,ignore
//! use edge_compute::{EdgeComputeData, GpuComputeConfig, GpuEdgeProcessor};
//!
//! if !GpuEdgeProcessor::is_available() {
//!     // fall back to CPU edge layout
//!     return;
//! }
//!
//! let mut processor = GpuEdgeProcessor::new(GpuComputeConfig::default());
//! if !processor.initialize() {
//!     return;
//! }
//!
//! let data = EdgeComputeData {
//!     node_positions: vec![0.0, 0.0, 0.0, 4.0, 0.0, 0.0],
//!     edge_indices: vec![0, 1],
//!     edge_properties: vec![0xFF0000 as f32, 1.0, 1.0, 0.0],
//! };
//!
//! if let Some(result) = processor.process_edges(&data)? {
//!     // result.edge_positions = [midpoint xyz, length] per edge
//!     // result.edge_colors    = rgba per edge
//!     // result.edge_visibility = 0/1 byte per edge
//! }
//!
//! processor.dispose();
//! ```
//!
//! # Failure model
//!
//! Expected environment failures (no adapter, no compute support) surface
//! as `false` from [`GpuEdgeProcessor::initialize`] or `None` from
//! [`GpuEdgeProcessor::process_edges`], logged at warning severity.
//! Programming failures (shader validation, malformed input data, inputs
//! exceeding texture capacity) are [`ComputeError`] values and propagate
//! with `?`.

mod engine;
mod error;
mod layout;
mod shaders;
mod types;

pub mod processor;

pub use engine::EdgeComputeEngine;
pub use error::ComputeError;
pub use layout::TextureLayout;
pub use processor::GpuEdgeProcessor;
pub use shaders::{EdgeShaders, combined_edge_shader};
pub use types::{
    ComputeResult,
    DEFAULT_MAX_TEXTURE_SIZE,
    DEFAULT_WORKGROUP_SIZE,
    EdgeComputeData,
    GpuCapabilities,
    GpuComputeConfig,
};
