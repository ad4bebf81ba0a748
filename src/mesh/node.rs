use nalgebra::Point3;

/// A point in 3D space, identified by its (1-based) id in the mesh file.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: usize,
    pub coords: Point3<f64>,
}

impl Node {
    pub fn new(id: usize, coords: Point3<f64>) -> Self {
        Self { id, coords }
    }

    pub fn from_coords(id: usize, x: f64, y: f64, z: f64) -> Self {
        Self::new(id, Point3::new(x, y, z))
    }

    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }
}
