//! WGSL compute kernels for the edge pipeline
//!
//! Three kernels, one per output: edge position (midpoint + length), edge
//! color, and edge visibility. All share the same bind group layout: the
//! three packed input textures, a uniform parameter block, and one output
//! storage array. One invocation per edge; out-of-range invocations from
//! the last workgroup return early.

/// Placeholder substituted with the configured workgroup size
const WORKGROUP_TOKEN: &str = "{{WG}}";

/// Common declarations shared by all kernels
pub const TYPES: &str = r#"
struct Params {
    edge_count: u32,
    node_count: u32,
    node_tex_width: u32,
    edge_tex_width: u32,
}

@group(0) @binding(0) var node_positions: texture_2d<f32>;
@group(0) @binding(1) var edge_endpoints: texture_2d<u32>;
@group(0) @binding(2) var edge_properties: texture_2d<f32>;
@group(0) @binding(3) var<uniform> params: Params;
@group(0) @binding(4) var<storage, read_write> output: array<f32>;

fn texel_for(index: u32, width: u32) -> vec2<i32> {
    return vec2<i32>(i32(index % width), i32(index / width));
}
"#;

/// Position kernel - midpoint and length per edge.
///
/// "Start" is the first endpoint of the pair, "end" the second; length is
/// direction-agnostic.
pub const EDGE_POSITIONS: &str = r#"
@compute @workgroup_size({{WG}})
fn edge_positions(@builtin(global_invocation_id) global_id: vec3<u32>) {
    let edge_idx = global_id.x;
    if (edge_idx >= params.edge_count) {
        return;
    }

    let endpoints = textureLoad(edge_endpoints, texel_for(edge_idx, params.edge_tex_width), 0).xy;
    let start = textureLoad(node_positions, texel_for(endpoints.x, params.node_tex_width), 0).xyz;
    let end = textureLoad(node_positions, texel_for(endpoints.y, params.node_tex_width), 0).xyz;

    let midpoint = (start + end) * 0.5;
    let base = edge_idx * 4u;
    output[base] = midpoint.x;
    output[base + 1u] = midpoint.y;
    output[base + 2u] = midpoint.z;
    output[base + 3u] = length(end - start);
}
"#;

/// Color kernel - unpack a 24-bit 0xRRGGBB color from the float's integral
/// part via base-256 modulo/divide, pass opacity through as alpha.
///
/// The decomposition must stay exactly these three modulo/divide
/// operations; any alternate unpacking changes colors silently.
pub const EDGE_COLORS: &str = r#"
fn mod256(v: f32) -> f32 {
    return v - floor(v / 256.0) * 256.0;
}

@compute @workgroup_size({{WG}})
fn edge_colors(@builtin(global_invocation_id) global_id: vec3<u32>) {
    let edge_idx = global_id.x;
    if (edge_idx >= params.edge_count) {
        return;
    }

    let props = textureLoad(edge_properties, texel_for(edge_idx, params.edge_tex_width), 0);
    let packed = props.x;

    let base = edge_idx * 4u;
    output[base] = mod256(packed / 65536.0) / 255.0;
    output[base + 1u] = mod256(packed / 256.0) / 255.0;
    output[base + 2u] = mod256(packed) / 255.0;
    output[base + 3u] = props.y;
}
"#;

/// Visibility kernel - `visible * (1 + highlighted)` per edge.
///
/// A highlighted but invisible edge stays invisible: the multiplication by
/// zero dominates. The >0.5 threshold to a 0/1 byte is applied on the CPU
/// after readback, not here.
pub const EDGE_VISIBILITY: &str = r#"
@compute @workgroup_size({{WG}})
fn edge_visibility(@builtin(global_invocation_id) global_id: vec3<u32>) {
    let edge_idx = global_id.x;
    if (edge_idx >= params.edge_count) {
        return;
    }

    let props = textureLoad(edge_properties, texel_for(edge_idx, params.edge_tex_width), 0);
    output[edge_idx] = props.z * (1.0 + props.w);
}
"#;

/// The three kernel sources with the workgroup size baked in
pub struct EdgeShaders {
    /// Position kernel (entry point `edge_positions`)
    pub positions: String,
    /// Color kernel (entry point `edge_colors`)
    pub colors: String,
    /// Visibility kernel (entry point `edge_visibility`)
    pub visibility: String,
}

impl EdgeShaders {
    /// Build the kernel sources for the given workgroup size
    pub fn new(workgroup_size: u32) -> Self {
        let wg = workgroup_size.to_string();
        Self {
            positions: format!("{}\n{}", TYPES, EDGE_POSITIONS).replace(WORKGROUP_TOKEN, &wg),
            colors: format!("{}\n{}", TYPES, EDGE_COLORS).replace(WORKGROUP_TOKEN, &wg),
            visibility: format!("{}\n{}", TYPES, EDGE_VISIBILITY).replace(WORKGROUP_TOKEN, &wg),
        }
    }
}

/// Combined source for all three kernels (useful for debugging)
pub fn combined_edge_shader(workgroup_size: u32) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        TYPES, EDGE_POSITIONS, EDGE_COLORS, EDGE_VISIBILITY
    )
    .replace(WORKGROUP_TOKEN, &workgroup_size.to_string())
}
