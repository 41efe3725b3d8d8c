use crate::kmlib::{distance, CentroidSet, Point, PointStore, Position};
use ordered_float::OrderedFloat;

/// Index of the closest centroid. Lowest index wins on equal distance.
fn closest<P: Position>(p: &P, centroids: &CentroidSet) -> Option<usize> {
    centroids
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| OrderedFloat(distance(p, *c)))
        .map(|(idx, _)| idx)
}

/// Which cluster a location on the plane would fall in, without storing it
pub fn nearest(x: f64, y: f64, centroids: &CentroidSet) -> Option<usize> {
    closest(&Point::new(x, y), centroids)
}

/// Label every point with its closest centroid and take on that centroid's color.
/// Callers must not pass an empty centroid set.
pub fn assign(points: &mut PointStore, centroids: &CentroidSet) {
    debug_assert!(!centroids.is_empty(), "assign called without centroids");
    for p in points.iter_mut() {
        if let Some(idx) = closest(&*p, centroids) {
            p.cluster = Some(idx);
            p.color = centroids.positions()[idx].color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (PointStore, CentroidSet) {
        let points: PointStore = vec![(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)]
            .into_iter()
            .collect();
        let mut rng = StdRng::seed_from_u64(5);
        let centroids = CentroidSet::from_indices(&[0, 2], &points, &mut rng).unwrap();
        (points, centroids)
    }

    #[test]
    fn assigns_closest() {
        let (mut points, centroids) = setup();
        assign(&mut points, &centroids);
        assert_eq!(points.labels(), vec![Some(0), Some(0), Some(1), Some(1)]);
        assert_eq!(points.get(1).unwrap().color, centroids.get(0).unwrap().color);
        assert_eq!(points.get(3).unwrap().color, centroids.get(1).unwrap().color);
    }

    #[test]
    fn assign_is_idempotent() {
        let (mut points, centroids) = setup();
        assign(&mut points, &centroids);
        let first = points.labels();
        assign(&mut points, &centroids);
        assert_eq!(first, points.labels());
    }

    #[test]
    fn ties_go_to_lowest_index() {
        // (1, 0) sits exactly between the two seeds
        let points: PointStore = vec![(0.0, 0.0), (2.0, 0.0), (1.0, 0.0)]
            .into_iter()
            .collect();
        let mut rng = StdRng::seed_from_u64(0);
        let centroids = CentroidSet::from_indices(&[1, 0], &points, &mut rng).unwrap();
        let mut points = points;
        assign(&mut points, &centroids);
        assert_eq!(points.get(2).unwrap().cluster, Some(0));
    }

    #[test]
    fn nearest_classifies_without_storing() {
        let (points, centroids) = setup();
        assert_eq!(nearest(9.0, 9.0, &centroids), Some(1));
        assert_eq!(nearest(-1.0, 0.5, &centroids), Some(0));
        assert_eq!(points.labels(), vec![None; 4]);
    }
}
