use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Neutral color of a point that has not been assigned to a cluster
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Independent uniform draw for each channel in [0, 1)
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Color {
            r: rng.gen::<f64>(),
            g: rng.gen::<f64>(),
            b: rng.gen::<f64>(),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Index of the centroid this point was last assigned to
    pub cluster: Option<usize>,
    pub color: Color,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            cluster: None,
            color: Color::WHITE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

impl Centroid {
    pub fn new(x: f64, y: f64, color: Color) -> Self {
        Self { x, y, color }
    }
}

/// Anything with a position on the plane
pub trait Position {
    fn xy(&self) -> (f64, f64);
}

impl Position for Point {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Position for Centroid {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Euclidean distance between two positions
pub fn distance<A: Position, B: Position>(a: &A, b: &B) -> f64 {
    let (ax, ay) = a.xy();
    let (bx, by) = b.xy();
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

/// Points in the order they were added. Only grows, except on `clear`.
#[derive(Clone, Debug, Default)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new unassigned point and return its index
    pub fn add(&mut self, x: f64, y: f64) -> usize {
        self.points.push(Point::new(x, y));
        self.points.len() - 1
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Point> {
        self.points.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Point> {
        self.points.iter_mut()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Drop every label and paint all points back to the neutral color
    pub fn erase_colors(&mut self) {
        for p in self.points.iter_mut() {
            p.cluster = None;
            p.color = Color::WHITE;
        }
    }

    pub fn labels(&self) -> Vec<Option<usize>> {
        self.points.iter().map(|p| p.cluster).collect()
    }
}

impl<'a> IntoIterator for &'a PointStore {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromIterator<(f64, f64)> for PointStore {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut store = PointStore::new();
        for (x, y) in iter {
            store.add(x, y);
        }
        store
    }
}
