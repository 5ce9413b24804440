use nalgebra::{Vector2, Vector3};

use super::SurfaceGeometry;

/// RGBA color with components in [0, 1]
pub type Rgba = [f32; 4];

/// How consecutive indices of a primitive are assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineLoop,
    QuadStrip,
}

/// Vertices referenced by a primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveIndices {
    /// `count` consecutive vertices starting at `first`
    Range { first: u32, count: u32 },
    /// Explicit vertex indices
    Elements(Vec<u32>),
}

/// A single draw command over the vertex arrays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive {
    pub mode: PrimitiveMode,
    pub indices: PrimitiveIndices,
}

impl Primitive {
    pub fn range(mode: PrimitiveMode, first: u32, count: u32) -> Self {
        Self {
            mode,
            indices: PrimitiveIndices::Range { first, count },
        }
    }

    pub fn elements(mode: PrimitiveMode, indices: Vec<u32>) -> Self {
        Self {
            mode,
            indices: PrimitiveIndices::Elements(indices),
        }
    }

    /// Number of vertex references
    pub fn len(&self) -> usize {
        match &self.indices {
            PrimitiveIndices::Range { count, .. } => *count as usize,
            PrimitiveIndices::Elements(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expanded vertex indices, in draw order
    pub fn index_list(&self) -> Vec<u32> {
        match &self.indices {
            PrimitiveIndices::Range { first, count } => (*first..*first + *count).collect(),
            PrimitiveIndices::Elements(indices) => indices.clone(),
        }
    }

    fn max_index(&self) -> Option<u32> {
        match &self.indices {
            PrimitiveIndices::Range { first, count } => count.checked_sub(1).map(|c| first + c),
            PrimitiveIndices::Elements(indices) => indices.iter().copied().max(),
        }
    }
}

/// Color assignment for a mesh
#[derive(Debug, Clone, PartialEq)]
pub enum ColorBinding {
    /// One color for the whole mesh
    Overall(Rgba),
    /// One color per vertex
    PerVertex(Vec<Rgba>),
}

/// Renderer-agnostic vertex data emitted for a display surface
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vector3<f64>>,
    pub normals: Vec<Vector3<f64>>,
    pub texcoords: Vec<Vector2<f64>>,
    pub colors: ColorBinding,
    pub primitives: Vec<Primitive>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Check that attribute arrays line up and every index is in range
    pub fn is_well_formed(&self) -> bool {
        let n = self.vertices.len();
        if self.normals.len() != n || self.texcoords.len() != n {
            return false;
        }
        if let ColorBinding::PerVertex(colors) = &self.colors {
            if colors.len() != n {
                return false;
            }
        }
        self.primitives
            .iter()
            .all(|p| p.max_index().is_none_or(|max| (max as usize) < n))
    }
}

/// Accumulates surface samples into a [`Mesh`]
pub(crate) struct MeshBuilder {
    vertices: Vec<Vector3<f64>>,
    normals: Vec<Vector3<f64>>,
    texcoords: Vec<Vector2<f64>>,
    colors: Option<Vec<Rgba>>,
    primitives: Vec<Primitive>,
}

impl MeshBuilder {
    /// With `texcoord_colors`, each vertex is colored (u, v, 0, 1).
    pub(crate) fn new(capacity: usize, texcoord_colors: bool) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            normals: Vec::with_capacity(capacity),
            texcoords: Vec::with_capacity(capacity),
            colors: texcoord_colors.then(|| Vec::with_capacity(capacity)),
            primitives: Vec::new(),
        }
    }

    /// Sample `surface` at `tc` and return the new vertex index
    pub(crate) fn push<S: SurfaceGeometry + ?Sized>(
        &mut self,
        surface: &S,
        tc: Vector2<f64>,
    ) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(surface.texcoord_to_world(&tc));
        self.normals.push(surface.texcoord_to_normal(&tc));
        self.texcoords.push(tc);
        if let Some(colors) = self.colors.as_mut() {
            colors.push([tc.x as f32, tc.y as f32, 0.0, 1.0]);
        }
        idx
    }

    pub(crate) fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub(crate) fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// `overall` is used only when texcoord colors were not requested.
    pub(crate) fn finish(self, overall: Rgba) -> Mesh {
        let colors = match self.colors {
            Some(per_vertex) => ColorBinding::PerVertex(per_vertex),
            None => ColorBinding::Overall(overall),
        };
        Mesh {
            vertices: self.vertices,
            normals: self.normals,
            texcoords: self.texcoords,
            colors,
            primitives: self.primitives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_range_indices() {
        let p = Primitive::range(PrimitiveMode::Points, 2, 3);
        assert_eq!(p.len(), 3);
        assert_eq!(p.index_list(), vec![2, 3, 4]);
        assert_eq!(p.max_index(), Some(4));
    }

    #[test]
    fn test_primitive_empty_range() {
        let p = Primitive::range(PrimitiveMode::Points, 0, 0);
        assert!(p.is_empty());
        assert_eq!(p.max_index(), None);
    }

    #[test]
    fn test_primitive_elements() {
        let p = Primitive::elements(PrimitiveMode::LineLoop, vec![1, 2, 3, 4]);
        assert_eq!(p.len(), 4);
        assert_eq!(p.index_list(), vec![1, 2, 3, 4]);
        assert_eq!(p.max_index(), Some(4));
    }

    #[test]
    fn test_mesh_well_formed_detects_bad_index() {
        let mut mesh = Mesh {
            vertices: vec![Vector3::zeros(); 2],
            normals: vec![Vector3::z(); 2],
            texcoords: vec![Vector2::zeros(); 2],
            colors: ColorBinding::Overall([1.0, 1.0, 1.0, 1.0]),
            primitives: vec![Primitive::range(PrimitiveMode::Points, 0, 2)],
        };
        assert!(mesh.is_well_formed());

        mesh.primitives
            .push(Primitive::elements(PrimitiveMode::Lines, vec![0, 2]));
        assert!(!mesh.is_well_formed());
    }

    #[test]
    fn test_mesh_well_formed_detects_color_mismatch() {
        let mesh = Mesh {
            vertices: vec![Vector3::zeros(); 2],
            normals: vec![Vector3::z(); 2],
            texcoords: vec![Vector2::zeros(); 2],
            colors: ColorBinding::PerVertex(vec![[0.0, 0.0, 0.0, 1.0]]),
            primitives: Vec::new(),
        };
        assert!(!mesh.is_well_formed());
    }
}
