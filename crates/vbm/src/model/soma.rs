//! Somas and their neuritic fields.

/// A signed 3D coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinates in wire order.
    pub fn coords(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i32; 3]> for Point {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// An axonal or dendritic terminal field.
///
/// Stored per axis as `(x1, x2)`, `(y1, y2)`, `(z1, z2)`. A field has no
/// identity of its own; it belongs to the soma list that holds it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Field {
    pub x1: i32,
    pub x2: i32,
    pub y1: i32,
    pub y2: i32,
    pub z1: i32,
    pub z2: i32,
}

impl Field {
    /// Creates a field from its six coordinates in wire order.
    pub const fn new(x1: i32, x2: i32, y1: i32, y2: i32, z1: i32, z2: i32) -> Self {
        Self { x1, x2, y1, y2, z1, z2 }
    }

    /// Returns the coordinates in wire order.
    pub fn coords(&self) -> [i32; 6] {
        [self.x1, self.x2, self.y1, self.y2, self.z1, self.z2]
    }
}

impl From<[i32; 6]> for Field {
    fn from([x1, x2, y1, y2, z1, z2]: [i32; 6]) -> Self {
        Self { x1, x2, y1, y2, z1, z2 }
    }
}

/// A neuron cell body with its axonal and dendritic fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Soma {
    /// Index into the model's type table.
    pub type_id: u8,
    /// Soma id (unique within a model, not verified by the codec).
    pub id: u64,
    pub position: Point,
    pub axonal: Vec<Field>,
    pub dendritic: Vec<Field>,
}

impl Soma {
    /// Creates a soma with no fields.
    pub fn new(type_id: u8, id: u64, position: Point) -> Self {
        Self {
            type_id,
            id,
            position,
            axonal: Vec::new(),
            dendritic: Vec::new(),
        }
    }

    /// Returns the number of axonal plus dendritic fields.
    pub fn field_count(&self) -> usize {
        self.axonal.len() + self.dendritic.len()
    }

    /// Iterates over axonal fields, then dendritic fields.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.axonal.iter().chain(self.dendritic.iter())
    }
}
