//! Vertex layouts shared with the renderer. All are `#[repr(C)]` + `Pod` so
//! they upload with `bytemuck::cast_slice`.

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
}

/// Indexed triangle list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

impl<V> Mesh<V> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends `vertices` and their local `indices`, rebasing the indices.
    pub fn append(&mut self, vertices: impl IntoIterator<Item = V>, indices: &[u32]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(vertices);
        self.indices.extend(indices.iter().map(|i| base + i));
    }
}

#[cfg(test)]
mod tests {
    use super::{Mesh, StarVertex};

    #[test]
    fn append_rebases_indices() {
        let mut mesh = Mesh::new();
        let tri = [
            StarVertex { position: [0.0; 3] },
            StarVertex { position: [1.0; 3] },
            StarVertex { position: [2.0; 3] },
        ];
        mesh.append(tri, &[0, 1, 2]);
        mesh.append(tri, &[0, 2, 1]);
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 5, 4]);
        assert_eq!(mesh.index_count(), 6);
    }

    #[test]
    fn vertex_strides_match_shader_layouts() {
        assert_eq!(std::mem::size_of::<super::GlobeVertex>(), 32);
        assert_eq!(std::mem::size_of::<super::MarkerVertex>(), 40);
        assert_eq!(std::mem::size_of::<StarVertex>(), 12);
    }
}
