mod assigner;
pub use crate::kmlib::assigner::{assign, nearest};

mod centroids;
pub use crate::kmlib::centroids::{check_k, sample_indices, CentroidSet};

mod cli;
pub use crate::kmlib::cli::{ArgParser, IOParams, KmParams};

mod errors;
pub use crate::kmlib::errors::{ClusterError, Result};

mod events;
pub use crate::kmlib::events::{ChannelSink, EventSink, LogSink, SessionEvent};

mod point;
pub use crate::kmlib::point::{distance, Centroid, Color, Point, PointStore, Position};

mod pointparser;
pub use crate::kmlib::pointparser::PointParser;

mod session;
pub use crate::kmlib::session::{ClusteringSession, SessionState, SharedSession, StepOutcome};

mod updater;
pub use crate::kmlib::updater::{cluster_mean, update};

mod writer;
pub use crate::kmlib::writer::{spawn_history_writer, AssignmentWriter, HistoryWriter};
