//! The shared unit-cube template: 6 unwelded faces of 4 corners each.

use voxterra_geom::Vec3;

pub const VERTICES_PER_CUBE: usize = 24;
pub const INDICES_PER_CUBE: usize = 36;
pub const CORNERS_PER_FACE: usize = 4;

/// Two triangles per face, counter-clockwise when seen from outside.
pub const FACE_LOCAL_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Cube faces in template order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CubeFace {
    Front = 0,
    Back = 1,
    Left = 2,
    Right = 3,
    Top = 4,
    Bottom = 5,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Right,
        CubeFace::Top,
        CubeFace::Bottom,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the outward unit normal.
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            CubeFace::Front => Vec3::new(0.0, 0.0, 1.0),
            CubeFace::Back => Vec3::new(0.0, 0.0, -1.0),
            CubeFace::Left => Vec3::new(-1.0, 0.0, 0.0),
            CubeFace::Right => Vec3::new(1.0, 0.0, 0.0),
            CubeFace::Top => Vec3::new(0.0, 1.0, 0.0),
            CubeFace::Bottom => Vec3::new(0.0, -1.0, 0.0),
        }
    }

    /// Template vertex range belonging to this face.
    #[inline]
    pub fn vertex_range(self) -> core::ops::Range<usize> {
        let start = self.index() * CORNERS_PER_FACE;
        start..start + CORNERS_PER_FACE
    }
}

/// Read-only cube geometry shared by every emitted voxel.
///
/// Corners of each face run bottom-left, bottom-right, top-right, top-left as
/// seen from outside the cube. `corner_uv` is the position inside the face's
/// atlas cell, with `v = 0` at the top edge of the image.
pub struct CubeTemplate {
    pub positions: [[f32; 3]; VERTICES_PER_CUBE],
    pub corner_uv: [[f32; 2]; VERTICES_PER_CUBE],
    pub indices: [u32; INDICES_PER_CUBE],
}

const H: f32 = 0.5;
const FACE_CORNER_UV: [[f32; 2]; CORNERS_PER_FACE] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

const fn build_corner_uv() -> [[f32; 2]; VERTICES_PER_CUBE] {
    let mut out = [[0.0; 2]; VERTICES_PER_CUBE];
    let mut i = 0;
    while i < VERTICES_PER_CUBE {
        out[i] = FACE_CORNER_UV[i % CORNERS_PER_FACE];
        i += 1;
    }
    out
}

const fn build_indices() -> [u32; INDICES_PER_CUBE] {
    let mut out = [0u32; INDICES_PER_CUBE];
    let mut face = 0;
    while face < 6 {
        let mut k = 0;
        while k < FACE_LOCAL_INDICES.len() {
            out[face * 6 + k] = FACE_LOCAL_INDICES[k] + (face * CORNERS_PER_FACE) as u32;
            k += 1;
        }
        face += 1;
    }
    out
}

pub static CUBE_TEMPLATE: CubeTemplate = CubeTemplate {
    positions: [
        // Front (+Z)
        [-H, -H, H],
        [H, -H, H],
        [H, H, H],
        [-H, H, H],
        // Back (-Z)
        [H, -H, -H],
        [-H, -H, -H],
        [-H, H, -H],
        [H, H, -H],
        // Left (-X)
        [-H, -H, -H],
        [-H, -H, H],
        [-H, H, H],
        [-H, H, -H],
        // Right (+X)
        [H, -H, H],
        [H, -H, -H],
        [H, H, -H],
        [H, H, H],
        // Top (+Y)
        [-H, H, H],
        [H, H, H],
        [H, H, -H],
        [-H, H, -H],
        // Bottom (-Y)
        [-H, -H, -H],
        [H, -H, -H],
        [H, -H, H],
        [-H, -H, H],
    ],
    corner_uv: build_corner_uv(),
    indices: build_indices(),
};

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(i: u32) -> Vec3 {
        let [x, y, z] = CUBE_TEMPLATE.positions[i as usize];
        Vec3::new(x, y, z)
    }

    #[test]
    fn every_triangle_faces_outward() {
        for face in CubeFace::ALL {
            let tris = &CUBE_TEMPLATE.indices[face.index() * 6..face.index() * 6 + 6];
            for t in tris.chunks(3) {
                let (a, b, c) = (pos(t[0]), pos(t[1]), pos(t[2]));
                let n = (b - a).cross(c - a);
                assert!(n.dot(face.normal()) > 0.0, "{:?} triangle {:?} winds inward", face, t);
            }
        }
    }

    #[test]
    fn face_corners_lie_on_their_plane() {
        for face in CubeFace::ALL {
            let n = face.normal();
            for i in face.vertex_range() {
                assert_eq!(pos(i as u32).dot(n), H, "{:?} corner {}", face, i);
            }
        }
    }

    #[test]
    fn indices_follow_fixed_local_pattern() {
        assert_eq!(&CUBE_TEMPLATE.indices[..6], &[0, 1, 2, 2, 3, 0]);
        assert_eq!(&CUBE_TEMPLATE.indices[30..], &[20, 21, 22, 22, 23, 20]);
        assert!(CUBE_TEMPLATE.indices.iter().all(|&i| (i as usize) < VERTICES_PER_CUBE));
    }

    #[test]
    fn corner_uv_spans_unit_cell() {
        for face in CubeFace::ALL {
            let uvs: Vec<[f32; 2]> = face.vertex_range().map(|i| CUBE_TEMPLATE.corner_uv[i]).collect();
            assert_eq!(uvs, FACE_CORNER_UV.to_vec());
        }
    }
}
