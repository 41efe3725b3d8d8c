#[macro_use]
extern crate log;

mod kmlib;
pub use self::{
    kmlib::assign, kmlib::check_k, kmlib::cluster_mean, kmlib::distance, kmlib::nearest,
    kmlib::sample_indices, kmlib::spawn_history_writer, kmlib::update, kmlib::ArgParser,
    kmlib::AssignmentWriter, kmlib::Centroid, kmlib::CentroidSet, kmlib::ChannelSink,
    kmlib::ClusterError, kmlib::ClusteringSession, kmlib::Color, kmlib::EventSink,
    kmlib::HistoryWriter, kmlib::IOParams, kmlib::KmParams, kmlib::LogSink, kmlib::Point,
    kmlib::PointParser, kmlib::PointStore, kmlib::Position, kmlib::Result, kmlib::SessionEvent,
    kmlib::SessionState, kmlib::SharedSession, kmlib::StepOutcome,
};
