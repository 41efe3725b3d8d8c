use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser, Clone, Debug)]
#[command(name = "clickmeans")]
#[command(about = "Step-by-step k-means over 2D points")]
#[command(version)]
pub struct ArgParser {
    #[command(flatten)]
    pub io: IOParams,

    #[command(flatten)]
    pub km: KmParams,
}

#[derive(clap::Args, Clone, Debug)]
pub struct IOParams {
    /// Points to cluster, one `x y` pair per line
    #[arg(short, long, help_heading = "I/O")]
    pub input: PathBuf,

    /// Output assignments TSV (default stdout)
    #[arg(short, long, help_heading = "I/O")]
    pub out: Option<PathBuf>,

    /// Write one JSON line per seeding/step event to this file
    #[arg(long, help_heading = "I/O")]
    pub history: Option<PathBuf>,

    /// Number of clusters
    #[arg(short, default_value_t = 2, help_heading = "Clustering")]
    pub k: usize,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

#[derive(clap::Args, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct KmParams {
    /// Drift (sum of absolute centroid coordinate moves) at which iteration stops
    #[arg(long, default_value_t = 1.0, help_heading = "Clustering")]
    pub threshold: f64,

    /// Require drift strictly below --threshold to converge
    #[arg(long, default_value_t = false, help_heading = "Clustering")]
    pub exclusive: bool,

    /// Random seed for centroid selection and colors (default from entropy)
    #[arg(long, help_heading = "Clustering")]
    pub seed: Option<u64>,

    /// Maximum number of steps to run
    #[arg(long, default_value_t = 100, help_heading = "Clustering")]
    pub max_steps: usize,
}

impl Default for KmParams {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            exclusive: false,
            seed: None,
            max_steps: 100,
        }
    }
}

impl KmParams {
    /// Whether a drift value ends iteration
    pub fn is_converged(&self, drift: f64) -> bool {
        if self.exclusive {
            drift < self.threshold
        } else {
            drift <= self.threshold
        }
    }

    pub fn validate(&self) -> bool {
        let mut is_ok = true;

        if !self.threshold.is_finite() || self.threshold < 0.0 {
            error!("--threshold must be a finite value >= 0");
            is_ok = false;
        }

        if self.exclusive && self.threshold == 0.0 {
            warn!("--exclusive with --threshold 0 can never converge");
        }

        if self.max_steps < 1 {
            error!("--max-steps must be at least 1");
            is_ok = false;
        }

        is_ok
    }
}

impl ArgParser {
    /// Validate command line arguments
    pub fn validate(&self) -> bool {
        let mut is_ok = true;

        is_ok &= validate_file(&self.io.input, "--input");

        if self.io.k < 1 {
            error!("-k must be at least 1");
            is_ok = false;
        }

        is_ok &= self.km.validate();

        is_ok
    }
}

/// Helper function to validate a file's existence and type
fn validate_file(path: &Path, label: &str) -> bool {
    if !path.exists() {
        error!("{} does not exist", label);
        return false;
    }
    if !path.is_file() {
        error!("{} is not a file", label);
        return false;
    }
    true
}
