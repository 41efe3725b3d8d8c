use crate::kmlib::{CentroidSet, PointStore, Result, SessionEvent};
use crossbeam_channel::Receiver;
use itertools::Itertools;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

/// Final assignments as TSV: one row per point, then one `#centroid` row per cluster
pub struct AssignmentWriter {
    writer: BufWriter<Box<dyn Write + Send>>,
}

impl AssignmentWriter {
    /// Write to `out_path`, or stdout when not given
    pub fn new(out_path: &Option<PathBuf>) -> Result<Self> {
        let inner: Box<dyn Write + Send> = match out_path {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(io::stdout()),
        };
        Ok(Self::from_writer(inner))
    }

    pub fn from_writer(inner: Box<dyn Write + Send>) -> Self {
        Self {
            writer: BufWriter::new(inner),
        }
    }

    pub fn write(&mut self, points: &PointStore, centroids: Option<&CentroidSet>) -> Result<()> {
        writeln!(self.writer, "#x\ty\tcluster\tr\tg\tb")?;
        for p in points.iter() {
            let cluster = p.cluster.map_or(".".to_string(), |c| c.to_string());
            let row = [
                p.x.to_string(),
                p.y.to_string(),
                cluster,
                format!("{:.3}", p.color.r),
                format!("{:.3}", p.color.g),
                format!("{:.3}", p.color.b),
            ];
            writeln!(self.writer, "{}", row.iter().join("\t"))?;
        }

        if let Some(set) = centroids {
            for (idx, c) in set.iter().enumerate() {
                writeln!(
                    self.writer,
                    "#centroid\t{}\t{}\t{}\t{:.3}\t{:.3}\t{:.3}",
                    idx, c.x, c.y, c.color.r, c.color.g, c.color.b
                )?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// One JSON object per line for every event a session emits
pub struct HistoryWriter<W: Write> {
    writer: BufWriter<W>,
    pub written: usize,
}

impl HistoryWriter<File> {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> HistoryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
            written: 0,
        }
    }

    pub fn write(&mut self, event: &SessionEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.written)
    }
}

/// Drain events on a separate thread until `None` arrives or every sender is gone.
/// Returns the number of events written.
pub fn spawn_history_writer<W>(
    mut writer: HistoryWriter<W>,
    receiver: Receiver<Option<SessionEvent>>,
) -> JoinHandle<Result<usize>>
where
    W: Write + Send + 'static,
{
    thread::spawn(move || {
        loop {
            match receiver.recv() {
                Ok(None) | Err(_) => break,
                Ok(Some(event)) => writer.write(&event)?,
            }
        }
        writer.finish()
    })
}
