use std::f32::consts::PI;

#[repr(C)]
#[derive(Copy, Clone, Default, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ]
        }
    }
}

/// Number of vertices in one fan: the center plus `segments + 1` perimeter
/// points, the last one repeating the first.
pub fn fan_len(segments: usize) -> usize {
    segments + 2
}

/// Builds a triangle fan approximating a circle.
pub fn generate_fan(center: [f32; 2], radius: f32, segments: usize) -> Vec<Vertex> {
    let mut vertices = vec![Vertex::default(); fan_len(segments)];
    write_fan(&mut vertices, center, radius, segments);
    vertices
}

/// Same as [`generate_fan`] but overwrites `out` in place. `out` must hold
/// exactly `fan_len(segments)` vertices.
pub fn write_fan(out: &mut [Vertex], center: [f32; 2], radius: f32, segments: usize) {
    debug_assert_eq!(out.len(), fan_len(segments));

    let [cx, cy] = center;
    out[0] = Vertex { position: [cx, cy, 0.0] };

    for (i, vertex) in out[1..].iter_mut().enumerate() {
        let theta = 2.0 * PI * i as f32 / segments as f32;
        *vertex = Vertex {
            position: [cx + radius * theta.cos(), cy + radius * theta.sin(), 0.0],
        };
    }
}

/// Triangle list equivalent of one fan of `fan_len(segments)` vertices, with
/// indices local to the fan. wgpu has no fan topology, so every circle is
/// drawn with this list and its own base vertex.
pub fn fan_indices(segments: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(segments * 3);
    for i in 1..=segments as u32 {
        indices.extend_from_slice(&[0, i, i + 1]);
    }
    indices
}
