//! Texture atlas layout: a `columns x rows` grid, one cell per cube face.

use voxterra_world::AtlasParams;

use crate::template::{CUBE_TEMPLATE, CubeFace, VERTICES_PER_CUBE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasCell {
    pub column: u32,
    pub row: u32,
}

/// Normalized texture rectangle; `v0` is the top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    #[inline]
    pub fn lerp(&self, cu: f32, cv: f32) -> [f32; 2] {
        [
            self.u0 + cu * (self.u1 - self.u0),
            self.v0 + cv * (self.v1 - self.v0),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtlasLayout {
    pub columns: u32,
    pub rows: u32,
    /// Indexed by `CubeFace::index()`.
    pub cells: [AtlasCell; 6],
}

/// Texture coordinates for all 24 template vertices under one atlas layout.
pub type CubeTexcoords = [[f32; 2]; VERTICES_PER_CUBE];

impl AtlasLayout {
    #[inline]
    pub fn cell(&self, face: CubeFace) -> AtlasCell {
        self.cells[face.index()]
    }

    /// UV rectangle of the cell assigned to `face`, derived from the grid dimensions.
    pub fn uv_rect(&self, face: CubeFace) -> UvRect {
        let c = self.cell(face);
        let cw = 1.0 / self.columns as f32;
        let ch = 1.0 / self.rows as f32;
        UvRect {
            u0: c.column as f32 * cw,
            v0: c.row as f32 * ch,
            u1: (c.column + 1) as f32 * cw,
            v1: (c.row + 1) as f32 * ch,
        }
    }

    /// Maps the template's per-face corner UVs into this atlas. Computed once per mesh.
    pub fn resolve(&self) -> CubeTexcoords {
        let mut out = [[0.0; 2]; VERTICES_PER_CUBE];
        for face in CubeFace::ALL {
            let rect = self.uv_rect(face);
            for i in face.vertex_range() {
                let [cu, cv] = CUBE_TEMPLATE.corner_uv[i];
                out[i] = rect.lerp(cu, cv);
            }
        }
        out
    }
}

impl Default for AtlasLayout {
    fn default() -> Self {
        AtlasLayout::from(&AtlasParams::default())
    }
}

impl From<&AtlasParams> for AtlasLayout {
    fn from(p: &AtlasParams) -> Self {
        let cells = p.cells.map(|[column, row]| AtlasCell { column, row });
        Self {
            columns: p.columns,
            rows: p.rows,
            cells,
        }
    }
}
