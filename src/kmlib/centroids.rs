use crate::kmlib::{Centroid, ClusterError, Color, PointStore, Result};
use rand::Rng;

/// The k current cluster centers. Length is fixed once seeded.
#[derive(Clone, Debug)]
pub struct CentroidSet {
    centroids: Vec<Centroid>,
    /// Point indices the centroids were copied from
    source: Vec<usize>,
}

/// Draw `k` distinct indices from `0..n` by rejection: redraw whenever an index was already taken.
/// Caller guarantees `k <= n`.
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, k: usize, n: usize) -> Vec<usize> {
    debug_assert!(k <= n);
    let mut used = vec![false; n];
    let mut idx = Vec::with_capacity(k);
    while idx.len() < k {
        let i = rng.gen_range(0..n);
        if used[i] {
            continue;
        }
        used[i] = true;
        idx.push(i);
    }
    idx
}

impl CentroidSet {
    /// Copy k randomly chosen distinct points as the initial centroids
    pub fn seed<R: Rng + ?Sized>(k: usize, points: &PointStore, rng: &mut R) -> Result<Self> {
        check_k(k, points.len())?;
        let idx = sample_indices(rng, k, points.len());
        Self::from_indices(&idx, points, rng)
    }

    /// Build centroids from caller-chosen point indices. Each gets a fresh random color.
    pub fn from_indices<R: Rng + ?Sized>(
        indices: &[usize],
        points: &PointStore,
        rng: &mut R,
    ) -> Result<Self> {
        check_k(indices.len(), points.len())?;

        let mut used = vec![false; points.len()];
        for &i in indices {
            if i >= points.len() {
                return Err(ClusterError::InvalidState(format!(
                    "seed index {} out of range for {} points",
                    i,
                    points.len()
                )));
            }
            if used[i] {
                return Err(ClusterError::InvalidState(format!(
                    "seed index {} given twice",
                    i
                )));
            }
            used[i] = true;
        }

        let mut centroids: Vec<Centroid> = Vec::with_capacity(indices.len());
        for &i in indices {
            let p = &points.as_slice()[i];
            let mut color = Color::random(rng);
            // Colors tell clusters apart on screen
            while centroids.iter().any(|c| c.color == color) {
                color = Color::random(rng);
            }
            centroids.push(Centroid::new(p.x, p.y, color));
        }

        Ok(Self {
            centroids,
            source: indices.to_vec(),
        })
    }

    pub fn positions(&self) -> &[Centroid] {
        &self.centroids
    }

    pub fn get(&self, idx: usize) -> Option<&Centroid> {
        self.centroids.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Centroid> {
        self.centroids.iter()
    }

    /// Positions may change, the count may not
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Centroid> {
        self.centroids.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    pub fn source_indices(&self) -> &[usize] {
        &self.source
    }
}

/// Validate a requested cluster count against the number of points
pub fn check_k(k: usize, n: usize) -> Result<()> {
    if k == 0 {
        return Err(ClusterError::InvalidK);
    }
    if n < k {
        return Err(ClusterError::InsufficientPoints {
            requested: k,
            available: n,
        });
    }
    Ok(())
}
