use crate::kmlib::{CentroidSet, PointStore};

/// Mean position of the points labeled with `cluster`, or None when it has no members
pub fn cluster_mean(points: &PointStore, cluster: usize) -> Option<(f64, f64)> {
    let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
    for p in points.iter().filter(|p| p.cluster == Some(cluster)) {
        sx += p.x;
        sy += p.y;
        n += 1;
    }
    if n == 0 {
        return None;
    }
    Some((sx / n as f64, sy / n as f64))
}

/// Move every centroid to the mean of its members and return the drift:
/// the sum over centroids of |dx| + |dy|.
/// A centroid that lost all of its members stays where it was.
pub fn update(points: &PointStore, centroids: &mut CentroidSet) -> f64 {
    let mut drift = 0.0;
    for (idx, c) in centroids.iter_mut().enumerate() {
        match cluster_mean(points, idx) {
            Some((x, y)) => {
                drift += (x - c.x).abs() + (y - c.y).abs();
                c.x = x;
                c.y = y;
            }
            None => {
                debug!("cluster {} is empty, centroid kept at ({}, {})", idx, c.x, c.y);
            }
        }
    }
    drift
}
