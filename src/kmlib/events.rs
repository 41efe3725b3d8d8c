use crate::kmlib::Centroid;
use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

/// Things a session reports as it runs. Purely diagnostic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum SessionEvent {
    Seeded {
        k: usize,
        indices: Vec<usize>,
        centroids: Vec<Centroid>,
    },
    Stepped {
        iteration: usize,
        drift: f64,
        centroids: Vec<Centroid>,
    },
    Converged {
        iteration: usize,
        drift: f64,
    },
    Reset,
}

pub trait EventSink {
    fn emit(&mut self, event: &SessionEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&SessionEvent),
{
    fn emit(&mut self, event: &SessionEvent) {
        self(event)
    }
}

/// Writes events to the log
#[derive(Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Seeded { k, indices, .. } => {
                debug!("seeded {} centroids from points {:?}", k, indices)
            }
            SessionEvent::Stepped {
                iteration, drift, ..
            } => debug!("iteration {} drift {}", iteration, drift),
            SessionEvent::Converged { iteration, drift } => {
                info!("converged after {} iterations (drift {})", iteration, drift)
            }
            SessionEvent::Reset => debug!("session reset"),
        }
    }
}

/// Forwards events to another thread. `None` tells the receiver there is nothing more.
pub struct ChannelSink {
    sender: Sender<Option<SessionEvent>>,
}

impl ChannelSink {
    pub fn new(sender: Sender<Option<SessionEvent>>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: &SessionEvent) {
        if self.sender.send(Some(event.clone())).is_err() {
            warn!("event receiver hung up, dropping {:?}", event);
        }
    }
}
