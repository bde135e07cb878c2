//! Vertex buffer layout handed to the renderer: `[x, y, z, height, u, v]`.

pub const VERTEX_STRIDE_FLOATS: usize = 6;
pub const VERTEX_STRIDE_BYTES: usize = VERTEX_STRIDE_FLOATS * core::mem::size_of::<f32>();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub location: u32,
    pub components: u32,
    /// Offset from the start of the vertex, in floats.
    pub offset_floats: usize,
}

impl VertexAttribute {
    #[inline]
    pub const fn offset_bytes(&self) -> usize {
        self.offset_floats * core::mem::size_of::<f32>()
    }
}

pub const VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        name: "position",
        location: 0,
        components: 3,
        offset_floats: 0,
    },
    // Voxel level, not column height; drives height-banded shading
    VertexAttribute {
        name: "height",
        location: 1,
        components: 1,
        offset_floats: 3,
    },
    VertexAttribute {
        name: "texcoord",
        location: 2,
        components: 2,
        offset_floats: 4,
    },
];
