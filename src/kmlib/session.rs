use crate::kmlib::{
    assign, check_k, nearest, update, CentroidSet, ClusterError, EventSink, KmParams,
    PointStore, Result, SessionEvent,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SessionState {
    /// No points
    Empty,
    /// Points but no centroids yet
    Seeding,
    /// Centroids exist and drift is above the threshold
    Iterating,
    /// Drift met the threshold. Stays here until reset or re-seed.
    Converged,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// A step ran and centroids are still moving
    Iterating { drift: f64 },
    /// A step ran and brought the drift under the threshold
    Converged { drift: f64 },
    /// Already converged, nothing was done
    NoOp,
}

impl StepOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, StepOutcome::Converged { .. } | StepOutcome::NoOp)
    }
}

/// A whole session behind one lock. Hold it for an entire step.
pub type SharedSession<R = StdRng> = Arc<Mutex<ClusteringSession<R>>>;

/// Points, centroids and convergence tracking for one interactive k-means run
pub struct ClusteringSession<R = StdRng> {
    points: PointStore,
    centroids: Option<CentroidSet>,
    k: usize,
    drift: f64,
    iterations: usize,
    params: KmParams,
    rng: R,
    sink: Option<Box<dyn EventSink + Send>>,
}

impl ClusteringSession<StdRng> {
    /// Seeded from `params.seed` when set, otherwise from entropy
    pub fn new(params: &KmParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(params, rng)
    }

    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }
}

impl<R: Rng> ClusteringSession<R> {
    pub fn with_rng(params: &KmParams, rng: R) -> Self {
        Self {
            points: PointStore::new(),
            centroids: None,
            k: 0,
            drift: f64::INFINITY,
            iterations: 0,
            params: params.clone(),
            rng,
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn EventSink + Send>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn set_sink(&mut self, sink: Option<Box<dyn EventSink + Send>>) {
        self.sink = sink;
    }

    fn emit(&mut self, event: SessionEvent) {
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(&event);
        }
    }

    /// Add a point. Existing labels are not recomputed until the next step.
    pub fn add_point(&mut self, x: f64, y: f64) -> usize {
        let idx = self.points.add(x, y);
        trace!("point {} at ({}, {})", idx, x, y);
        idx
    }

    /// Choose k random points as centroids, unless k is unchanged and centroids already exist.
    /// Nothing changes when k is rejected.
    pub fn request_k(&mut self, k: usize) -> Result<()> {
        check_k(k, self.points.len())?;
        if self.centroids.is_some() && k == self.k {
            debug!("k={} unchanged, keeping centroids", k);
            return Ok(());
        }
        let set = CentroidSet::seed(k, &self.points, &mut self.rng)?;
        self.install(set);
        Ok(())
    }

    /// Seed from specific points instead of random ones
    pub fn seed_from_indices(&mut self, indices: &[usize]) -> Result<()> {
        let set = CentroidSet::from_indices(indices, &self.points, &mut self.rng)?;
        self.install(set);
        Ok(())
    }

    /// New centroids replace the old ones wholesale and points get their first coloring
    fn install(&mut self, set: CentroidSet) {
        debug!("seeding {} centroids from points {:?}", set.len(), set.source_indices());
        self.points.erase_colors();
        assign(&mut self.points, &set);
        self.k = set.len();
        self.drift = f64::INFINITY;
        self.iterations = 0;
        let event = SessionEvent::Seeded {
            k: set.len(),
            indices: set.source_indices().to_vec(),
            centroids: set.positions().to_vec(),
        };
        self.centroids = Some(set);
        self.emit(event);
    }

    /// One k-means iteration: assign, update, check drift
    pub fn step(&mut self) -> Result<StepOutcome> {
        let centroids = match self.centroids.as_mut() {
            Some(c) => c,
            None => {
                return Err(ClusterError::InvalidState(
                    "step requested before a cluster count was set".to_string(),
                ))
            }
        };

        if self.params.is_converged(self.drift) {
            debug!("already converged, nothing to do");
            return Ok(StepOutcome::NoOp);
        }

        assign(&mut self.points, centroids);
        let drift = update(&self.points, centroids);
        let snapshot = centroids.positions().to_vec();

        self.drift = drift;
        self.iterations += 1;
        trace!("iteration {} centroids {:?}", self.iterations, snapshot);
        self.emit(SessionEvent::Stepped {
            iteration: self.iterations,
            drift,
            centroids: snapshot,
        });

        if self.params.is_converged(drift) {
            self.emit(SessionEvent::Converged {
                iteration: self.iterations,
                drift,
            });
            Ok(StepOutcome::Converged { drift })
        } else {
            Ok(StepOutcome::Iterating { drift })
        }
    }

    /// Step until converged or `max_steps` steps have run. At least one step is attempted.
    pub fn run(&mut self, max_steps: usize) -> Result<StepOutcome> {
        let mut outcome = self.step()?;
        let mut taken = 1;
        while !outcome.is_converged() && taken < max_steps {
            outcome = self.step()?;
            taken += 1;
        }
        if !outcome.is_converged() {
            warn!(
                "stopped after {} steps without converging (drift {})",
                taken, self.drift
            );
        }
        Ok(outcome)
    }

    /// Drop every point and centroid
    pub fn reset(&mut self) {
        self.points.clear();
        self.centroids = None;
        self.k = 0;
        self.drift = f64::INFINITY;
        self.iterations = 0;
        self.emit(SessionEvent::Reset);
    }

    /// Cluster a location would join under the current centroids
    pub fn classify(&self, x: f64, y: f64) -> Option<usize> {
        self.centroids.as_ref().and_then(|c| nearest(x, y, c))
    }
}

impl<R> ClusteringSession<R> {
    pub fn state(&self) -> SessionState {
        match (&self.centroids, self.points.is_empty()) {
            (None, true) => SessionState::Empty,
            (None, false) => SessionState::Seeding,
            (Some(_), _) if self.params.is_converged(self.drift) => SessionState::Converged,
            (Some(_), _) => SessionState::Iterating,
        }
    }

    pub fn points(&self) -> &PointStore {
        &self.points
    }

    pub fn centroids(&self) -> Option<&CentroidSet> {
        self.centroids.as_ref()
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn drift(&self) -> f64 {
        self.drift
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn params(&self) -> &KmParams {
        &self.params
    }
}

impl<R> Debug for ClusteringSession<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusteringSession")
            .field("points", &self.points.len())
            .field("k", &self.k)
            .field("drift", &self.drift)
            .field("iterations", &self.iterations)
            .field("state", &self.state())
            // rng and sink are left out
            .finish()
    }
}
