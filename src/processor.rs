//! High-level processor: lifecycle and the soft-failure contract
//!
//! `GpuEdgeProcessor` hides backend setup behind an
//! initialize/process/dispose lifecycle and turns environment failures
//! into return values instead of errors. Consumers are expected to call
//! [`GpuEdgeProcessor::is_available`] first and keep a CPU fallback for
//! whenever `initialize` returns `false` or `process_edges` returns
//! `Ok(None)`.

use tracing::{debug, warn};

use crate::engine::EdgeComputeEngine;
use crate::error::ComputeError;
use crate::types::{ComputeResult, EdgeComputeData, GpuCapabilities, GpuComputeConfig};

/// Lifecycle state of the processor.
///
/// `Unconfigured -> Ready` on a successful initialize; a failed initialize
/// stays `Unconfigured` (nothing is retained, so retrying is safe).
/// `Ready -> Disposed` on dispose; disposed processors are not
/// re-initializable.
enum State {
    Unconfigured,
    Ready(EdgeComputeEngine),
    Disposed,
}

/// Façade over [`EdgeComputeEngine`] with lifecycle handling.
///
/// Exactly one engine per processor, exclusively owned. `process_edges`
/// takes `&mut self`, so concurrent calls are ruled out at compile time;
/// callers that share a processor across tasks must serialize access
/// themselves.
pub struct GpuEdgeProcessor {
    config: GpuComputeConfig,
    state: State,
}

impl GpuEdgeProcessor {
    /// Create an uninitialized processor with the given configuration
    pub fn new(config: GpuComputeConfig) -> Self {
        Self {
            config,
            state: State::Unconfigured,
        }
    }

    /// Cheap static probe: does this environment have a usable GPU?
    ///
    /// Uses the default configuration's backend mask. The probe adapter is
    /// dropped before returning.
    pub fn is_available() -> bool {
        EdgeComputeEngine::adapter_available(&GpuComputeConfig::default())
    }

    /// Probe availability for a specific configuration
    pub fn is_available_with(config: &GpuComputeConfig) -> bool {
        EdgeComputeEngine::adapter_available(config)
    }

    /// Bring up the GPU engine. Never fails hard: every error — soft or
    /// otherwise — is logged and converted to `false`, and the processor
    /// stays retryable when it was not yet initialized.
    pub fn initialize(&mut self) -> bool {
        match self.state {
            State::Ready(_) => {
                debug!("processor already initialized");
                return true;
            }
            State::Disposed => {
                warn!("cannot initialize a disposed edge processor");
                return false;
            }
            State::Unconfigured => {}
        }

        match EdgeComputeEngine::new(self.config.clone()) {
            Ok(engine) => {
                let caps = engine.capabilities();
                debug!(
                    adapter = %caps.adapter_name,
                    backend = ?caps.backend,
                    max_texture_size = caps.max_texture_size,
                    "GPU edge processor ready"
                );
                self.state = State::Ready(engine);
                true
            }
            Err(err) => {
                if err.is_soft() {
                    warn!(%err, "GPU edge compute unavailable, caller should fall back to CPU");
                } else {
                    warn!(%err, "GPU edge compute initialization failed");
                }
                false
            }
        }
    }

    /// Process one batch of edges.
    ///
    /// `Ok(None)` means "not available — fall back to CPU": the processor
    /// was never initialized, or has been disposed. Malformed input and
    /// other hard failures propagate as `Err`.
    pub fn process_edges(
        &mut self,
        data: &EdgeComputeData,
    ) -> Result<Option<ComputeResult>, ComputeError> {
        match &mut self.state {
            State::Ready(engine) => engine.process_edges(data).map(Some),
            State::Unconfigured => {
                warn!("process_edges called before initialize; returning None");
                Ok(None)
            }
            State::Disposed => {
                warn!("process_edges called after dispose; returning None");
                Ok(None)
            }
        }
    }

    /// Capabilities of the initialized engine, if any
    pub fn capabilities(&self) -> Option<&GpuCapabilities> {
        match &self.state {
            State::Ready(engine) => Some(engine.capabilities()),
            _ => None,
        }
    }

    /// Whether the processor currently holds a ready engine
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// Release the engine and every GPU resource it owns.
    ///
    /// Idempotent: safe to call repeatedly or without a prior
    /// `initialize`. A disposed processor stays disposed.
    pub fn dispose(&mut self) {
        if matches!(self.state, State::Ready(_)) {
            debug!("disposing GPU edge processor");
        }
        self.state = State::Disposed;
    }
}

impl Default for GpuEdgeProcessor {
    fn default() -> Self {
        Self::new(GpuComputeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed_data() -> EdgeComputeData {
        EdgeComputeData {
            node_positions: vec![0.0, 0.0, 0.0, 4.0, 0.0, 0.0],
            edge_indices: vec![0, 1],
            edge_properties: vec![0xFF0000 as f32, 1.0, 1.0, 0.0],
        }
    }

    #[test]
    fn process_before_initialize_returns_none() {
        let mut processor = GpuEdgeProcessor::default();
        let result = processor.process_edges(&well_formed_data()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn process_after_dispose_returns_none() {
        let mut processor = GpuEdgeProcessor::default();
        processor.dispose();
        let result = processor.process_edges(&well_formed_data()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut processor = GpuEdgeProcessor::default();
        processor.dispose();
        processor.dispose();
        assert!(!processor.is_ready());
    }

    #[test]
    fn dispose_without_initialize_is_safe() {
        let mut processor = GpuEdgeProcessor::default();
        assert!(!processor.is_ready());
        processor.dispose();
    }

    #[test]
    fn disposed_processor_cannot_reinitialize() {
        let mut processor = GpuEdgeProcessor::default();
        processor.dispose();
        assert!(!processor.initialize());
        assert!(!processor.is_ready());
    }

    #[test]
    fn capabilities_require_ready_state() {
        let processor = GpuEdgeProcessor::default();
        assert!(processor.capabilities().is_none());
    }

    #[test]
    fn availability_probe_does_not_panic() {
        // Headless environments legitimately return false here
        let _ = GpuEdgeProcessor::is_available();
    }

    #[test]
    fn initialize_and_process_when_gpu_present() {
        if !GpuEdgeProcessor::is_available() {
            eprintln!("skipping: no GPU adapter with compute support");
            return;
        }

        let mut processor = GpuEdgeProcessor::default();
        assert!(processor.initialize());
        assert!(processor.is_ready());
        // Second initialize is a no-op
        assert!(processor.initialize());

        let caps = processor.capabilities().expect("capabilities");
        assert!(caps.compute_shaders_supported);
        assert!(caps.max_texture_size >= 1);

        let result = processor
            .process_edges(&well_formed_data())
            .unwrap()
            .expect("ready processor returns a result");
        assert_eq!(result.edge_positions.len(), 4);
        assert_eq!(result.edge_visibility, vec![1]);
    }
}
