//! Subdivided icosahedron as a line list.
//!
//! Each base face is split into a triangular grid with `detail + 1` segments
//! per edge. Grid points are keyed by their integer barycentric weights over
//! the base corners, so points on a shared edge weld exactly without any
//! floating-point tolerance.

use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;

const T: f32 = 1.618_034; // golden ratio

#[rustfmt::skip]
const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, T, 0.0], [1.0, T, 0.0], [-1.0, -T, 0.0], [1.0, -T, 0.0],
    [0.0, -1.0, T], [0.0, 1.0, T], [0.0, -1.0, -T], [0.0, 1.0, -T],
    [T, 0.0, -1.0], [T, 0.0, 1.0], [-T, 0.0, -1.0], [-T, 0.0, 1.0],
];

#[rustfmt::skip]
const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Barycentric key: up to three `(corner, weight)` pairs sorted by corner,
/// zero weights dropped and padded with `(u32::MAX, 0)`.
type GridKey = [(u32, u32); 3];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

pub struct IcosphereWireframe {
    pub vertices: Vec<LineVertex>,
    /// Pairs of indices into `vertices`, one pair per unique edge.
    pub indices: Vec<u32>,
}

impl IcosphereWireframe {
    pub fn new(radius: f32, detail: u32) -> Self {
        let f = detail + 1;
        let mut builder = Builder {
            radius,
            f,
            lookup: FnvHashMap::default(),
            vertices: Vec::new(),
            edges: FnvHashSet::default(),
            indices: Vec::new(),
        };
        for face in ICOSAHEDRON_FACES {
            builder.subdivide(face);
        }
        log::debug!(
            "[geometry] icosphere r={} detail={} verts={} edges={}",
            radius,
            detail,
            builder.vertices.len(),
            builder.indices.len() / 2
        );
        Self {
            vertices: builder.vertices,
            indices: builder.indices,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.indices.len() / 2
    }
}

struct Builder {
    radius: f32,
    f: u32,
    lookup: FnvHashMap<GridKey, u32>,
    vertices: Vec<LineVertex>,
    edges: FnvHashSet<(u32, u32)>,
    indices: Vec<u32>,
}

impl Builder {
    fn subdivide(&mut self, [a, b, c]: [u32; 3]) {
        let f = self.f;
        // v[i][j]: row i walks from edge AB towards C, j walks from A-side to B-side
        let mut rows: Vec<Vec<u32>> = Vec::with_capacity(f as usize + 1);
        for i in 0..=f {
            let row = (0..=f - i)
                .map(|j| self.vertex([(a, f - i - j), (b, j), (c, i)]))
                .collect();
            rows.push(row);
        }
        for i in 0..f as usize {
            let span = 2 * (f as usize - i) - 1;
            for j in 0..span {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [rows[i][k + 1], rows[i + 1][k], rows[i][k]]
                } else {
                    [rows[i][k + 1], rows[i + 1][k + 1], rows[i + 1][k]]
                };
                self.edge(tri[0], tri[1]);
                self.edge(tri[1], tri[2]);
                self.edge(tri[2], tri[0]);
            }
        }
    }

    fn vertex(&mut self, weights: [(u32, u32); 3]) -> u32 {
        let mut key: GridKey = [(u32::MAX, 0); 3];
        let mut n = 0;
        for (corner, w) in weights {
            if w > 0 {
                key[n] = (corner, w);
                n += 1;
            }
        }
        key.sort_unstable();
        if let Some(&idx) = self.lookup.get(&key) {
            return idx;
        }
        let mut p = Vec3::ZERO;
        for &(corner, w) in &key[..n] {
            p += Vec3::from(ICOSAHEDRON_VERTICES[corner as usize]) * w as f32;
        }
        let p = p.normalize() * self.radius;
        let idx = self.vertices.len() as u32;
        self.vertices.push(LineVertex {
            position: p.to_array(),
        });
        self.lookup.insert(key, idx);
        idx
    }

    fn edge(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        let e = (a.min(b), a.max(b));
        if self.edges.insert(e) {
            self.indices.extend_from_slice(&[e.0, e.1]);
        }
    }
}
