//! Data model for the edge compute pipeline
//!
//! Input/output records exchanged with the caller, the configuration
//! struct, and the `repr(C)` uniform type uploaded to the GPU. GPU-facing
//! types use f32/u32 and are Pod for direct buffer upload.

use std::time::Duration;

use bytemuck::{Pod, Zeroable};

use crate::error::ComputeError;

// =============================================================================
// Default Constants
// =============================================================================

/// Default maximum texture dimension used for input packing
pub const DEFAULT_MAX_TEXTURE_SIZE: u32 = 4096;

/// Default compute workgroup size (invocations per workgroup, x dimension)
pub const DEFAULT_WORKGROUP_SIZE: u32 = 64;

/// Upper bound on the configurable workgroup size.
/// 256 is the guaranteed `max_compute_workgroup_size_x` on all wgpu targets.
pub const MAX_WORKGROUP_SIZE: u32 = 256;

/// Floats per entry in `ComputeResult::edge_positions` (midpoint xyz + length)
pub const POSITION_CHANNELS: usize = 4;

/// Floats per entry in `ComputeResult::edge_colors` (rgba)
pub const COLOR_CHANNELS: usize = 4;

/// Raw per-node and per-edge input to the compute pipeline.
///
/// All arrays are flattened:
///
/// - `node_positions`: xyz triple per node, ordered by node index
/// - `edge_indices`: `[source, target]` pair per edge
/// - `edge_properties`: `[packed_color, opacity, visible, highlighted]`
///   quadruple per edge, where `packed_color` is a 24-bit `0xRRGGBB` value
///   stored in the float's integral part
#[derive(Debug, Clone, Default)]
pub struct EdgeComputeData {
    /// Flattened node positions (3 floats per node)
    pub node_positions: Vec<f32>,
    /// Flattened endpoint node indices (2 per edge)
    pub edge_indices: Vec<u32>,
    /// Flattened edge properties (4 floats per edge)
    pub edge_properties: Vec<f32>,
}

impl EdgeComputeData {
    /// Number of nodes described by `node_positions`
    pub fn node_count(&self) -> usize {
        self.node_positions.len() / 3
    }

    /// Number of edges described by `edge_indices`
    pub fn edge_count(&self) -> usize {
        self.edge_indices.len() / 2
    }

    /// Check the structural invariants of the data model.
    ///
    /// Invariants: `node_positions` holds whole xyz triples,
    /// `edge_indices` holds whole pairs, every index addresses an existing
    /// node, and `edge_properties` holds exactly one quadruple per edge.
    pub fn validate(&self) -> Result<(), ComputeError> {
        if self.node_positions.len() % 3 != 0 {
            return Err(ComputeError::InvalidData(format!(
                "node_positions length {} is not a multiple of 3",
                self.node_positions.len()
            )));
        }
        if self.edge_indices.len() % 2 != 0 {
            return Err(ComputeError::InvalidData(format!(
                "edge_indices length {} is not a multiple of 2",
                self.edge_indices.len()
            )));
        }
        let expected_properties = self.edge_count() * 4;
        if self.edge_properties.len() != expected_properties {
            return Err(ComputeError::InvalidData(format!(
                "edge_properties length {} does not match {} edges (expected {})",
                self.edge_properties.len(),
                self.edge_count(),
                expected_properties
            )));
        }
        let node_count = self.node_count() as u32;
        if let Some(&bad) = self.edge_indices.iter().find(|&&i| i >= node_count) {
            return Err(ComputeError::InvalidData(format!(
                "edge references node {bad}, but only {node_count} nodes were provided"
            )));
        }
        Ok(())
    }
}

/// Per-edge results read back from the GPU.
///
/// Produced fresh by every `process_edges` call; the caller owns the
/// arrays.
#[derive(Debug, Clone, Default)]
pub struct ComputeResult {
    /// Midpoint xyz + length, 4 floats per edge
    pub edge_positions: Vec<f32>,
    /// RGBA color, 4 floats per edge
    pub edge_colors: Vec<f32>,
    /// Thresholded visibility, one 0/1 byte per edge
    pub edge_visibility: Vec<u8>,
    /// Wall-clock time for upload, dispatch, and readback
    pub compute_time: Duration,
}

/// Configuration for the compute pipeline, supplied at construction time.
#[derive(Debug, Clone)]
pub struct GpuComputeConfig {
    /// Clamp on texture width/height used for input packing.
    /// Further clamped to the device limit at initialization.
    pub max_texture_size: u32,
    /// Compute workgroup size baked into the kernels (clamped to 1..=256)
    pub workgroup_size: u32,
    /// Backends the adapter may come from
    pub backends: wgpu::Backends,
    /// Adapter power preference
    pub power_preference: wgpu::PowerPreference,
}

impl GpuComputeConfig {
    /// Workgroup size with the 1..=256 clamp applied
    pub fn effective_workgroup_size(&self) -> u32 {
        self.workgroup_size.clamp(1, MAX_WORKGROUP_SIZE)
    }
}

impl Default for GpuComputeConfig {
    fn default() -> Self {
        Self {
            max_texture_size: DEFAULT_MAX_TEXTURE_SIZE,
            workgroup_size: DEFAULT_WORKGROUP_SIZE,
            backends: wgpu::Backends::PRIMARY,
            power_preference: wgpu::PowerPreference::HighPerformance,
        }
    }
}

/// Capabilities probed from the adapter and device at initialization
#[derive(Debug, Clone)]
pub struct GpuCapabilities {
    /// Effective maximum texture dimension (device limit clamped by config)
    pub max_texture_size: u32,
    /// Whether 32-bit float textures can be bound (always true on wgpu core)
    pub float_textures_supported: bool,
    /// Whether the adapter can run compute shaders
    pub compute_shaders_supported: bool,
    /// Human-readable adapter name, for diagnostics
    pub adapter_name: String,
    /// Backend the adapter runs on
    pub backend: wgpu::Backend,
}

/// Per-call parameters uploaded to the GPU as a uniform.
///
/// Layout matches the WGSL `Params` struct; 16 bytes, naturally aligned.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ComputeParams {
    /// Number of edges to process
    pub edge_count: u32,
    /// Number of nodes in the position texture
    pub node_count: u32,
    /// Width of the node position texture (for index -> texel mapping)
    pub node_tex_width: u32,
    /// Width of the edge index/property textures
    pub edge_tex_width: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> EdgeComputeData {
        EdgeComputeData {
            node_positions: vec![0.0, 0.0, 0.0, 4.0, 0.0, 0.0],
            edge_indices: vec![0, 1],
            edge_properties: vec![0xFF0000 as f32, 1.0, 1.0, 0.0],
        }
    }

    #[test]
    fn params_size_is_16_byte_aligned() {
        // Uniform buffers want 16-byte-aligned structs
        let size = std::mem::size_of::<ComputeParams>();
        assert_eq!(size, 16);
        assert_eq!(size % 16, 0);
    }

    #[test]
    fn counts_derive_from_array_lengths() {
        let data = sample_data();
        assert_eq!(data.node_count(), 2);
        assert_eq!(data.edge_count(), 1);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn empty_data_is_valid() {
        assert!(EdgeComputeData::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_ragged_positions() {
        let mut data = sample_data();
        data.node_positions.pop();
        assert!(matches!(
            data.validate(),
            Err(ComputeError::InvalidData(_))
        ));
    }

    #[test]
    fn validate_rejects_odd_index_array() {
        let mut data = sample_data();
        data.edge_indices.push(0);
        assert!(data.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mut data = sample_data();
        data.edge_indices[1] = 7;
        let err = data.validate().unwrap_err();
        assert!(err.to_string().contains("node 7"));
    }

    #[test]
    fn validate_rejects_property_count_mismatch() {
        let mut data = sample_data();
        data.edge_properties.truncate(3);
        assert!(data.validate().is_err());
    }

    #[test]
    fn config_defaults() {
        let config = GpuComputeConfig::default();
        assert_eq!(config.max_texture_size, DEFAULT_MAX_TEXTURE_SIZE);
        assert_eq!(config.workgroup_size, DEFAULT_WORKGROUP_SIZE);
        assert_eq!(config.effective_workgroup_size(), DEFAULT_WORKGROUP_SIZE);
    }

    #[test]
    fn workgroup_size_is_clamped() {
        let mut config = GpuComputeConfig::default();
        config.workgroup_size = 0;
        assert_eq!(config.effective_workgroup_size(), 1);
        config.workgroup_size = 1024;
        assert_eq!(config.effective_workgroup_size(), MAX_WORKGROUP_SIZE);
    }
}
