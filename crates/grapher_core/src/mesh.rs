use serde::{Deserialize, Serialize};

/// One sampled polytope: the image of a lattice hypercube (or a polyline step).
///
/// Vertices are kept in bit-index order, so vertex `i` is the image of the
/// hypercube corner whose `j`-th coordinate was stepped iff bit `j` of `i` is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshSegment {
    pub vertices: Vec<Vec<f64>>,
}

impl MeshSegment {
    pub fn new(vertices: Vec<Vec<f64>>) -> Self {
        Self { vertices }
    }

    pub fn line(a: Vec<f64>, b: Vec<f64>) -> Self {
        Self {
            vertices: vec![a, b],
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Dimension `d` of the hypercube this segment was sampled from (`2^d` vertices).
    /// `None` when the vertex count is not a power of two.
    pub fn cube_dimension(&self) -> Option<usize> {
        let n = self.vertices.len();
        if n.is_power_of_two() {
            Some(n.trailing_zeros() as usize)
        } else {
            None
        }
    }

    /// Vertices in drawing order.
    ///
    /// Bit-index order walks a quad as a "Z"; swapping the last two vertices gives
    /// its perimeter so the quad can be filled as a simple polygon. Other
    /// segment sizes are returned as stored.
    pub fn outline(&self) -> Vec<&[f64]> {
        let mut outline: Vec<&[f64]> = self.vertices.iter().map(Vec::as_slice).collect();
        if outline.len() == 4 {
            outline.swap(2, 3);
        }
        outline
    }
}

/// An ordered collection of mesh segments in a mapping's output space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub segments: Vec<MeshSegment>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// A polyline through `points`: one line segment per consecutive pair.
    pub fn polyline(points: &[Vec<f64>]) -> Self {
        let segments = points
            .windows(2)
            .map(|pair| MeshSegment::line(pair[0].clone(), pair[1].clone()))
            .collect();
        Self { segments }
    }

    pub fn push(&mut self, segment: MeshSegment) {
        self.segments.push(segment);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeshSegment> {
        self.segments.iter()
    }

    /// Dimension of the output space, taken from the first vertex.
    pub fn vertex_dimension(&self) -> usize {
        self.segments
            .iter()
            .flat_map(|segment| segment.vertices.first())
            .map(Vec::len)
            .next()
            .unwrap_or(0)
    }

    /// All vertex coordinates in one buffer, segment by segment.
    pub fn flat_vertices(&self) -> Vec<f64> {
        self.segments
            .iter()
            .flat_map(|segment| segment.vertices.iter())
            .flat_map(|vertex| vertex.iter().copied())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a MeshSegment;
    type IntoIter = std::slice::Iter<'a, MeshSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Mesh, MeshSegment};

    #[test]
    fn polyline_pairs_consecutive_points() {
        let points = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 0.0]];
        let mesh = Mesh::polyline(&points);
        assert_eq!(mesh.len(), 2);
        assert_eq!(
            mesh.segments[1],
            MeshSegment::line(vec![1.0, 1.0], vec![2.0, 0.0])
        );
        assert!(Mesh::polyline(&points[..1]).is_empty());
    }

    #[test]
    fn outline_reorders_quads_only() {
        let quad = MeshSegment::new(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
        ]);
        let outline = quad.outline();
        assert_eq!(outline[2], &[1.0, 1.0][..]);
        assert_eq!(outline[3], &[0.0, 1.0][..]);
        assert_eq!(quad.cube_dimension(), Some(2));

        let line = MeshSegment::line(vec![0.0], vec![1.0]);
        assert_eq!(line.outline(), vec![&[0.0][..], &[1.0][..]]);
        assert_eq!(line.cube_dimension(), Some(1));
        assert_eq!(MeshSegment::new(vec![vec![0.0]; 3]).cube_dimension(), None);
    }

    #[test]
    fn flat_vertices_concatenate_segments() {
        let mut mesh = Mesh::new();
        mesh.push(MeshSegment::line(vec![0.0, 1.0], vec![2.0, 3.0]));
        mesh.push(MeshSegment::line(vec![4.0, 5.0], vec![6.0, 7.0]));
        assert_eq!(mesh.vertex_dimension(), 2);
        assert_eq!(
            mesh.flat_vertices(),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
        );
        assert_eq!(Mesh::new().vertex_dimension(), 0);
    }
}
