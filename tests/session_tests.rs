use clickmeans::{ClusterError, ClusteringSession, KmParams, SessionState, StepOutcome};

fn four_points(params: KmParams) -> ClusteringSession {
    let mut s = ClusteringSession::new(&KmParams {
        seed: Some(7),
        ..params
    });
    for (x, y) in [(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)] {
        s.add_point(x, y);
    }
    s
}

fn centroid_xy(s: &ClusteringSession) -> Vec<(f64, f64)> {
    s.centroids()
        .unwrap()
        .iter()
        .map(|c| (c.x, c.y))
        .collect()
}

#[test]
fn two_clusters_inclusive_boundary() {
    let mut s = four_points(KmParams::default());
    s.seed_from_indices(&[0, 2]).unwrap();
    assert_eq!(centroid_xy(&s), vec![(0.0, 0.0), (10.0, 10.0)]);
    assert_eq!(s.state(), SessionState::Iterating);

    let out = s.step().unwrap();
    assert_eq!(out, StepOutcome::Converged { drift: 1.0 });
    assert_eq!(
        s.points().labels(),
        vec![Some(0), Some(0), Some(1), Some(1)]
    );
    assert_eq!(centroid_xy(&s), vec![(0.0, 0.5), (10.0, 10.5)]);
    assert_eq!(s.state(), SessionState::Converged);

    // completed: nothing moves
    assert_eq!(s.step().unwrap(), StepOutcome::NoOp);
    assert_eq!(centroid_xy(&s), vec![(0.0, 0.5), (10.0, 10.5)]);
    assert_eq!(s.iterations(), 1);
}

#[test]
fn two_clusters_exclusive_boundary() {
    let mut s = four_points(KmParams {
        exclusive: true,
        ..Default::default()
    });
    s.seed_from_indices(&[0, 2]).unwrap();

    // drift of exactly 1 is not below the threshold
    assert_eq!(s.step().unwrap(), StepOutcome::Iterating { drift: 1.0 });
    assert_eq!(s.state(), SessionState::Iterating);

    assert_eq!(s.step().unwrap(), StepOutcome::Converged { drift: 0.0 });
    assert_eq!(centroid_xy(&s), vec![(0.0, 0.5), (10.0, 10.5)]);
    assert!(s.step().unwrap().is_converged());
}

#[test]
fn reset_then_single_point() {
    let mut s = four_points(KmParams::default());
    s.request_k(2).unwrap();
    s.step().unwrap();

    s.reset();
    assert_eq!(s.state(), SessionState::Empty);
    assert!(s.points().is_empty());
    assert!(s.centroids().is_none());

    s.add_point(3.5, -2.0);
    s.request_k(1).unwrap();
    assert_eq!(centroid_xy(&s), vec![(3.5, -2.0)]);
    assert_eq!(s.points().labels(), vec![Some(0)]);
}

#[test]
fn too_many_clusters_leaves_state() {
    let mut s = four_points(KmParams::default());
    s.seed_from_indices(&[0, 2]).unwrap();
    let before = centroid_xy(&s);
    let labels = s.points().labels();

    match s.request_k(5) {
        Err(ClusterError::InsufficientPoints {
            requested,
            available,
        }) => {
            assert_eq!(requested, 5);
            assert_eq!(available, 4);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(centroid_xy(&s), before);
    assert_eq!(s.points().labels(), labels);
    assert_eq!(s.k(), 2);
    assert!(s.drift().is_infinite());
}

#[test]
fn request_k_on_empty_session() {
    let mut s = ClusteringSession::new(&KmParams::default());
    assert!(matches!(
        s.request_k(1),
        Err(ClusterError::InsufficientPoints { .. })
    ));
    assert!(matches!(s.request_k(0), Err(ClusterError::InvalidK)));
    assert_eq!(s.state(), SessionState::Empty);
}

#[test]
fn run_converges_separated_blobs() {
    let mut s = ClusteringSession::new(&KmParams {
        seed: Some(3),
        threshold: 0.0,
        ..Default::default()
    });
    for i in 0..5 {
        let d = i as f64 * 0.1;
        s.add_point(d, d);
        s.add_point(50.0 + d, 50.0 - d);
    }
    s.request_k(2).unwrap();
    let out = s.run(100).unwrap();
    assert!(out.is_converged());
    assert_eq!(s.drift(), 0.0);

    let labels = s.points().labels();
    // blobs are interleaved by insertion order
    for pair in labels.chunks(2) {
        assert_ne!(pair[0], pair[1]);
    }
    assert!(labels.iter().step_by(2).all(|l| *l == labels[0]));
}
