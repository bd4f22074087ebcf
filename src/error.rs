//! Error taxonomy for the edge compute pipeline
//!
//! Two kinds of failure exist here. Soft failures are expected environment
//! conditions (no GPU adapter, no compute shader support) — the processor
//! converts them into `false`/`None` so callers can fall back to a CPU
//! path without wrapping every call in error handling. Hard failures are
//! programming or data defects (shader validation errors, malformed input)
//! and propagate as `Err`.

use thiserror::Error;

/// Errors that can occur while initializing or running the compute pipeline
#[derive(Error, Debug)]
pub enum ComputeError {
    /// No GPU adapter matched the requested backends and power preference
    #[error("no suitable GPU adapter available")]
    AdapterUnavailable,

    /// The adapter exists but cannot run compute shaders (e.g. downlevel GL)
    #[error("adapter does not support compute shaders")]
    ComputeUnsupported,

    /// The adapter refused to create a device
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    /// Shader compilation or pipeline creation failed validation.
    /// Carries the backend diagnostic; indicates a defect in the WGSL.
    #[error("shader validation failed: {0}")]
    ShaderValidation(String),

    /// Input arrays violate the data-model invariants
    #[error("invalid edge data: {0}")]
    InvalidData(String),

    /// The input does not fit in a single texture of the configured size
    #[error("{len} elements exceed texture capacity {max}x{max}")]
    TextureCapacity {
        /// Number of elements that were requested
        len: usize,
        /// Maximum texture dimension in effect
        max: u32,
    },

    /// Mapping the staging buffer for readback failed
    #[error("GPU readback failed: {0}")]
    Readback(String),
}

impl ComputeError {
    /// Whether this is an expected environment failure rather than a defect.
    ///
    /// Soft failures are the ones the high-level processor swallows into
    /// its boolean/`None` contract.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            ComputeError::AdapterUnavailable
                | ComputeError::ComputeUnsupported
                | ComputeError::DeviceCreation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_failures_are_classified() {
        assert!(ComputeError::AdapterUnavailable.is_soft());
        assert!(ComputeError::ComputeUnsupported.is_soft());
        assert!(!ComputeError::ShaderValidation("bad wgsl".into()).is_soft());
        assert!(!ComputeError::InvalidData("truncated".into()).is_soft());
        assert!(
            !ComputeError::TextureCapacity {
                len: 1 << 30,
                max: 4096
            }
            .is_soft()
        );
    }

    #[test]
    fn capacity_error_names_the_limit() {
        let err = ComputeError::TextureCapacity {
            len: 20_000_000,
            max: 4096,
        };
        let message = err.to_string();
        assert!(message.contains("20000000"));
        assert!(message.contains("4096x4096"));
    }
}
