//! Low-level GPU edge compute engine
//!
//! Owns the wgpu device and the three compute pipelines, uploads edge data
//! into textures, dispatches the kernels, and reads results back through a
//! staging buffer. The engine has no dependency on the rest of the crate's
//! lifecycle handling; `GpuEdgeProcessor` wraps it.
//!
//! Concurrency: `process_edges` takes `&mut self`, so the "one call at a
//! time" contract is enforced by the borrow checker. Each call creates its
//! own transient input textures and output buffers; the pipelines, bind
//! group layout, and parameter buffer persist across calls.

use std::time::Instant;

use tracing::debug;
use wgpu::util::DeviceExt;

use crate::error::ComputeError;
use crate::layout::{TextureLayout, pack_texels_f32, pack_texels_u32};
use crate::shaders::EdgeShaders;
use crate::types::{
    COLOR_CHANNELS, ComputeParams, ComputeResult, EdgeComputeData, GpuCapabilities,
    GpuComputeConfig, POSITION_CHANNELS,
};

/// GPU engine for the three edge compute passes.
///
/// Created through [`EdgeComputeEngine::new`]; dropped resources are
/// released by wgpu, so disposal is `Drop`. Re-creation after drop is a
/// fresh engine, not a re-initialization.
pub struct EdgeComputeEngine {
    device: wgpu::Device,
    queue: wgpu::Queue,

    // Compute pipelines, one per output
    positions_pipeline: wgpu::ComputePipeline,
    colors_pipeline: wgpu::ComputePipeline,
    visibility_pipeline: wgpu::ComputePipeline,

    // Shared layout: three input textures, params uniform, output buffer
    bind_group_layout: wgpu::BindGroupLayout,
    params_buffer: wgpu::Buffer,

    capabilities: GpuCapabilities,
    workgroup_size: u32,
    max_texture_size: u32,
}

impl EdgeComputeEngine {
    /// Create the engine: adapter, device, and the three pipelines.
    ///
    /// Soft failures (no adapter, no compute support, device refusal)
    /// come back as their respective [`ComputeError`] variants. Shader or
    /// pipeline validation failures are hard
    /// [`ComputeError::ShaderValidation`] errors carrying the backend
    /// diagnostic. Either way, everything allocated before the failure is
    /// a local and is released on the error path; a failed construction
    /// leaks nothing.
    pub fn new(config: GpuComputeConfig) -> Result<Self, ComputeError> {
        pollster::block_on(Self::new_async(config))
    }

    /// Async form of [`EdgeComputeEngine::new`]
    pub async fn new_async(config: GpuComputeConfig) -> Result<Self, ComputeError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ComputeError::AdapterUnavailable)?;

        if !adapter
            .get_downlevel_capabilities()
            .flags
            .contains(wgpu::DownlevelFlags::COMPUTE_SHADERS)
        {
            return Err(ComputeError::ComputeUnsupported);
        }

        let info = adapter.get_info();
        debug!(
            adapter = %info.name,
            backend = ?info.backend,
            "creating edge compute device"
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Edge Compute Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let max_texture_size = config
            .max_texture_size
            .min(device.limits().max_texture_dimension_2d)
            .max(1);

        let capabilities = GpuCapabilities {
            max_texture_size,
            float_textures_supported: true,
            compute_shaders_supported: true,
            adapter_name: info.name,
            backend: info.backend,
        };

        let workgroup_size = config.effective_workgroup_size();
        let shaders = EdgeShaders::new(workgroup_size);

        // Shader and pipeline creation inside a validation error scope, so
        // WGSL defects surface as errors with the backend diagnostic
        // instead of a panic.
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let positions_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Edge Position Kernel"),
            source: wgpu::ShaderSource::Wgsl(shaders.positions.into()),
        });
        let colors_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Edge Color Kernel"),
            source: wgpu::ShaderSource::Wgsl(shaders.colors.into()),
        });
        let visibility_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Edge Visibility Kernel"),
            source: wgpu::ShaderSource::Wgsl(shaders.visibility.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Edge Compute Bind Group Layout"),
            entries: &[
                // Node position texture (rgba32float, xyz + pad)
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Edge endpoint index texture (rg32uint)
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Uint,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Edge property texture (rgba32float)
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 4,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Edge Compute Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let positions_pipeline =
            device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some("Edge Position Pipeline"),
                layout: Some(&pipeline_layout),
                module: &positions_module,
                entry_point: Some("edge_positions"),
                compilation_options: Default::default(),
                cache: None,
            });

        let colors_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Edge Color Pipeline"),
            layout: Some(&pipeline_layout),
            module: &colors_module,
            entry_point: Some("edge_colors"),
            compilation_options: Default::default(),
            cache: None,
        });

        let visibility_pipeline =
            device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some("Edge Visibility Pipeline"),
                layout: Some(&pipeline_layout),
                module: &visibility_module,
                entry_point: Some("edge_visibility"),
                compilation_options: Default::default(),
                cache: None,
            });

        if let Some(err) = device.pop_error_scope().await {
            return Err(ComputeError::ShaderValidation(err.to_string()));
        }

        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Edge Compute Params"),
            contents: bytemuck::bytes_of(&ComputeParams {
                edge_count: 0,
                node_count: 0,
                node_tex_width: 1,
                edge_tex_width: 1,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Ok(Self {
            device,
            queue,
            positions_pipeline,
            colors_pipeline,
            visibility_pipeline,
            bind_group_layout,
            params_buffer,
            capabilities,
            workgroup_size,
            max_texture_size,
        })
    }

    /// Whether an adapter with compute support exists for this config.
    ///
    /// Cheap probe for callers deciding between GPU and CPU paths; the
    /// probe instance and adapter are dropped before returning.
    pub fn adapter_available(config: &GpuComputeConfig) -> bool {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: config.backends,
                ..Default::default()
            });
            match instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: config.power_preference,
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
            {
                Some(adapter) => adapter
                    .get_downlevel_capabilities()
                    .flags
                    .contains(wgpu::DownlevelFlags::COMPUTE_SHADERS),
                None => false,
            }
        })
    }

    /// Capabilities probed at creation
    pub fn capabilities(&self) -> &GpuCapabilities {
        &self.capabilities
    }

    /// Run the three compute passes over `data` and read back the results.
    ///
    /// Blocking: the draw submission and the staging-buffer map complete
    /// before this returns. The exclusive borrow serializes callers.
    pub fn process_edges(&mut self, data: &EdgeComputeData) -> Result<ComputeResult, ComputeError> {
        let started = Instant::now();
        data.validate()?;

        let edge_count = data.edge_count();
        let node_count = data.node_count();

        if edge_count == 0 {
            return Ok(ComputeResult {
                compute_time: started.elapsed(),
                ..ComputeResult::default()
            });
        }

        let node_layout = TextureLayout::for_len(node_count, self.max_texture_size)?;
        let edge_layout = TextureLayout::for_len(edge_count, self.max_texture_size)?;

        // Upload the three input textures (xyz triples widen to rgba texels)
        let node_texture = self.create_input_texture_f32(
            "Node Position Texture",
            &pack_texels_f32(&data.node_positions, 3, 4, node_layout),
            node_layout,
        );
        let endpoint_texture = self.create_input_texture_u32(
            "Edge Endpoint Texture",
            &pack_texels_u32(&data.edge_indices, 2, 2, edge_layout),
            edge_layout,
        );
        let property_texture = self.create_input_texture_f32(
            "Edge Property Texture",
            &pack_texels_f32(&data.edge_properties, 4, 4, edge_layout),
            edge_layout,
        );

        let params = ComputeParams {
            edge_count: edge_count as u32,
            node_count: node_count as u32,
            node_tex_width: node_layout.width,
            edge_tex_width: edge_layout.width,
        };
        self.queue
            .write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));

        // Per-call output and staging buffers; sized exactly, no padding
        let positions_size = (edge_count * POSITION_CHANNELS * 4) as u64;
        let colors_size = (edge_count * COLOR_CHANNELS * 4) as u64;
        let visibility_size = (edge_count * 4) as u64;

        let positions_buffer = self.create_output_buffer("Edge Position Output", positions_size);
        let colors_buffer = self.create_output_buffer("Edge Color Output", colors_size);
        let visibility_buffer =
            self.create_output_buffer("Edge Visibility Output", visibility_size);

        let staging_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Edge Compute Staging"),
            size: positions_size + colors_size + visibility_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let node_view = node_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let endpoint_view = endpoint_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let property_view = property_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group_for = |label, output: &wgpu::Buffer| {
            self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&node_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&endpoint_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(&property_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: self.params_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 4,
                        resource: output.as_entire_binding(),
                    },
                ],
            })
        };

        let positions_bind_group = bind_group_for("Edge Position Bind Group", &positions_buffer);
        let colors_bind_group = bind_group_for("Edge Color Bind Group", &colors_buffer);
        let visibility_bind_group =
            bind_group_for("Edge Visibility Bind Group", &visibility_buffer);

        let workgroups = (edge_count as u32).div_ceil(self.workgroup_size).max(1);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Edge Compute Encoder"),
            });

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Edge Position Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.positions_pipeline);
            pass.set_bind_group(0, &positions_bind_group, &[]);
            pass.dispatch_workgroups(workgroups, 1, 1);
        }

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Edge Color Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.colors_pipeline);
            pass.set_bind_group(0, &colors_bind_group, &[]);
            pass.dispatch_workgroups(workgroups, 1, 1);
        }

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Edge Visibility Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.visibility_pipeline);
            pass.set_bind_group(0, &visibility_bind_group, &[]);
            pass.dispatch_workgroups(workgroups, 1, 1);
        }

        encoder.copy_buffer_to_buffer(&positions_buffer, 0, &staging_buffer, 0, positions_size);
        encoder.copy_buffer_to_buffer(
            &colors_buffer,
            0,
            &staging_buffer,
            positions_size,
            colors_size,
        );
        encoder.copy_buffer_to_buffer(
            &visibility_buffer,
            0,
            &staging_buffer,
            positions_size + colors_size,
            visibility_size,
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        // Blocking readback
        let buffer_slice = staging_buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = self.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|_| ComputeError::Readback("map callback never fired".into()))?
            .map_err(|e| ComputeError::Readback(e.to_string()))?;

        let mapped = buffer_slice.get_mapped_range();
        let floats: &[f32] = bytemuck::cast_slice(&mapped);

        let position_elems = edge_count * POSITION_CHANNELS;
        let color_elems = edge_count * COLOR_CHANNELS;

        let edge_positions = floats[..position_elems].to_vec();
        let edge_colors = floats[position_elems..position_elems + color_elems].to_vec();
        // Threshold to 0/1 after readback: visible * (1 + highlighted) > 0.5
        let edge_visibility: Vec<u8> = floats
            [position_elems + color_elems..position_elems + color_elems + edge_count]
            .iter()
            .map(|&v| u8::from(v > 0.5))
            .collect();

        drop(mapped);
        staging_buffer.unmap();

        let compute_time = started.elapsed();
        debug!(edge_count, node_count, ?compute_time, "edge compute pass complete");

        Ok(ComputeResult {
            edge_positions,
            edge_colors,
            edge_visibility,
            compute_time,
        })
    }

    fn create_input_texture_f32(
        &self,
        label: &str,
        texels: &[f32],
        layout: TextureLayout,
    ) -> wgpu::Texture {
        self.write_input_texture(
            label,
            bytemuck::cast_slice(texels),
            layout,
            wgpu::TextureFormat::Rgba32Float,
            16,
        )
    }

    fn create_input_texture_u32(
        &self,
        label: &str,
        texels: &[u32],
        layout: TextureLayout,
    ) -> wgpu::Texture {
        self.write_input_texture(
            label,
            bytemuck::cast_slice(texels),
            layout,
            wgpu::TextureFormat::Rg32Uint,
            8,
        )
    }

    fn write_input_texture(
        &self,
        label: &str,
        data: &[u8],
        layout: TextureLayout,
        format: wgpu::TextureFormat,
        bytes_per_texel: u32,
    ) -> wgpu::Texture {
        let size = wgpu::Extent3d {
            width: layout.width,
            height: layout.height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_texel * layout.width),
                rows_per_image: Some(layout.height),
            },
            size,
        );
        texture
    }

    fn create_output_buffer(&self, label: &str, size: u64) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Option<EdgeComputeEngine> {
        let config = GpuComputeConfig::default();
        if !EdgeComputeEngine::adapter_available(&config) {
            eprintln!("skipping: no GPU adapter with compute support");
            return None;
        }
        Some(EdgeComputeEngine::new(config).expect("engine creation"))
    }

    fn single_edge_data(properties: [f32; 4]) -> EdgeComputeData {
        EdgeComputeData {
            node_positions: vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0],
            edge_indices: vec![0, 1],
            edge_properties: properties.to_vec(),
        }
    }

    #[test]
    fn position_pass_yields_midpoint_and_length() {
        let Some(mut engine) = engine() else { return };

        let data = single_edge_data([0.0, 1.0, 1.0, 0.0]);
        let result = engine.process_edges(&data).unwrap();

        // Nodes at (0,0,0) and (2,0,0): midpoint (1,0,0), length 2
        assert_eq!(result.edge_positions.len(), 4);
        assert!((result.edge_positions[0] - 1.0).abs() < 1e-5);
        assert!(result.edge_positions[1].abs() < 1e-5);
        assert!(result.edge_positions[2].abs() < 1e-5);
        assert!((result.edge_positions[3] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn length_is_direction_agnostic() {
        let Some(mut engine) = engine() else { return };

        let mut data = single_edge_data([0.0, 1.0, 1.0, 0.0]);
        data.edge_indices = vec![1, 0];
        let result = engine.process_edges(&data).unwrap();

        assert!((result.edge_positions[3] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn color_pass_decodes_packed_hex() {
        let Some(mut engine) = engine() else { return };

        // 0x40A0C0 with opacity 0.5
        let packed = (0x40 * 65536 + 0xA0 * 256 + 0xC0) as f32;
        let data = single_edge_data([packed, 0.5, 1.0, 0.0]);
        let result = engine.process_edges(&data).unwrap();

        let expected = [
            0x40 as f32 / 255.0,
            0xA0 as f32 / 255.0,
            0xC0 as f32 / 255.0,
            0.5,
        ];
        for (got, want) in result.edge_colors.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5, "got {got}, want {want}");
        }
    }

    #[test]
    fn visibility_zero_dominates_highlight() {
        let Some(mut engine) = engine() else { return };

        // (visible, highlighted) -> expected byte
        let cases = [
            ([0.0f32, 1.0], 0u8),
            ([1.0, 1.0], 1),
            ([1.0, 0.0], 1),
            ([0.0, 0.0], 0),
        ];
        for ([visible, highlighted], expected) in cases {
            let data = single_edge_data([0.0, 1.0, visible, highlighted]);
            let result = engine.process_edges(&data).unwrap();
            assert_eq!(
                result.edge_visibility,
                vec![expected],
                "visible={visible} highlighted={highlighted}"
            );
        }
    }

    #[test]
    fn empty_input_short_circuits() {
        let Some(mut engine) = engine() else { return };

        let result = engine.process_edges(&EdgeComputeData::default()).unwrap();
        assert!(result.edge_positions.is_empty());
        assert!(result.edge_colors.is_empty());
        assert!(result.edge_visibility.is_empty());
    }

    #[test]
    fn many_edges_cross_texture_rows() {
        let Some(mut engine) = engine() else { return };

        // Ring of 100 nodes on the x axis; enough edges that the packed
        // edge texture has multiple rows (width 10, height 10).
        let node_count = 100usize;
        let mut data = EdgeComputeData::default();
        for i in 0..node_count {
            data.node_positions
                .extend_from_slice(&[i as f32, 0.0, 0.0]);
        }
        for i in 0..node_count {
            data.edge_indices
                .extend_from_slice(&[i as u32, ((i + 1) % node_count) as u32]);
            data.edge_properties
                .extend_from_slice(&[0.0, 1.0, 1.0, 0.0]);
        }

        let result = engine.process_edges(&data).unwrap();
        assert_eq!(result.edge_positions.len(), node_count * 4);
        assert_eq!(result.edge_visibility.len(), node_count);

        // Edge 5 connects nodes 5 and 6: midpoint x 5.5, length 1
        assert!((result.edge_positions[5 * 4] - 5.5).abs() < 1e-4);
        assert!((result.edge_positions[5 * 4 + 3] - 1.0).abs() < 1e-4);
        // The wrap-around edge spans the whole line: length 99
        let last = (node_count - 1) * 4;
        assert!((result.edge_positions[last + 3] - 99.0).abs() < 1e-3);
    }

    #[test]
    fn oversized_input_is_rejected() {
        let config = GpuComputeConfig {
            max_texture_size: 2,
            ..GpuComputeConfig::default()
        };
        if !EdgeComputeEngine::adapter_available(&config) {
            eprintln!("skipping: no GPU adapter with compute support");
            return;
        }
        let mut engine = EdgeComputeEngine::new(config).unwrap();

        // 5 nodes exceed a 2x2 texture
        let mut data = EdgeComputeData::default();
        for i in 0..5 {
            data.node_positions.extend_from_slice(&[i as f32, 0.0, 0.0]);
        }
        data.edge_indices = vec![0, 1];
        data.edge_properties = vec![0.0, 1.0, 1.0, 0.0];

        assert!(matches!(
            engine.process_edges(&data),
            Err(ComputeError::TextureCapacity { .. })
        ));
    }

    #[test]
    fn invalid_indices_are_rejected_before_upload() {
        let Some(mut engine) = engine() else { return };

        let mut data = single_edge_data([0.0, 1.0, 1.0, 0.0]);
        data.edge_indices = vec![0, 9];
        assert!(matches!(
            engine.process_edges(&data),
            Err(ComputeError::InvalidData(_))
        ));
    }
}
