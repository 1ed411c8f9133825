// geometry.rs - Subdivided unit plane
//
// Vertex layout matches three.js PlaneGeometry: rows from the top edge,
// positions in [-0.5, 0.5], v = 1 on the top row, two triangles per cell.
// The subdivision lets the vertex shader bend the plane smoothly.

use crate::error::EngineError;

pub struct PlaneGeometry {
    pub positions: Vec<f32>, // xyz
    pub uvs: Vec<f32>,       // uv
    pub indices: Vec<u16>,
}

impl PlaneGeometry {
    pub fn new(segments_x: u32, segments_y: u32) -> Result<Self, EngineError> {
        let gx = segments_x.max(1) as usize;
        let gy = segments_y.max(1) as usize;
        let gx1 = gx + 1;
        let gy1 = gy + 1;

        if gx1 * gy1 > u16::MAX as usize + 1 {
            return Err(EngineError::GeometryTooDense { segments_x, segments_y });
        }

        let seg_w = 1.0 / gx as f32;
        let seg_h = 1.0 / gy as f32;

        let mut positions = Vec::with_capacity(gx1 * gy1 * 3);
        let mut uvs = Vec::with_capacity(gx1 * gy1 * 2);
        for iy in 0..gy1 {
            let y = iy as f32 * seg_h - 0.5;
            for ix in 0..gx1 {
                let x = ix as f32 * seg_w - 0.5;
                positions.extend_from_slice(&[x, -y, 0.0]);
                uvs.extend_from_slice(&[ix as f32 / gx as f32, 1.0 - iy as f32 / gy as f32]);
            }
        }

        let mut indices = Vec::with_capacity(gx * gy * 6);
        for iy in 0..gy {
            for ix in 0..gx {
                let a = (ix + gx1 * iy) as u16;
                let b = (ix + gx1 * (iy + 1)) as u16;
                let c = (ix + 1 + gx1 * (iy + 1)) as u16;
                let d = (ix + 1 + gx1 * iy) as u16;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Ok(Self { positions, uvs, indices })
    }

    #[cfg(test)]
    fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_density_counts() {
        let g = PlaneGeometry::new(100, 100).unwrap();
        assert_eq!(g.vertex_count(), 101 * 101);
        assert_eq!(g.uvs.len(), 101 * 101 * 2);
        assert_eq!(g.index_count(), 100 * 100 * 6);
        let max = *g.indices.iter().max().unwrap() as usize;
        assert_eq!(max, g.vertex_count() - 1);
    }

    #[test]
    fn corners_and_uvs() {
        let g = PlaneGeometry::new(2, 2).unwrap();
        // first vertex: top-left
        assert_eq!(&g.positions[0..3], &[-0.5, 0.5, 0.0]);
        assert_eq!(&g.uvs[0..2], &[0.0, 1.0]);
        // last vertex: bottom-right
        let n = g.vertex_count();
        assert_eq!(&g.positions[(n - 1) * 3..], &[0.5, -0.5, 0.0]);
        assert_eq!(&g.uvs[(n - 1) * 2..], &[1.0, 0.0]);
    }

    #[test]
    fn single_cell_winding() {
        let g = PlaneGeometry::new(1, 1).unwrap();
        assert_eq!(g.indices, vec![0, 2, 1, 2, 3, 1]);
    }

    #[test]
    fn rejects_index_overflow() {
        assert!(PlaneGeometry::new(255, 255).is_ok());
        assert!(matches!(
            PlaneGeometry::new(256, 256),
            Err(EngineError::GeometryTooDense { segments_x: 256, segments_y: 256 })
        ));
    }
}
