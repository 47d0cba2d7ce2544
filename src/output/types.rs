// src/output/types.rs
//! Where rendered output goes and what came of sending it there.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    File(PathBuf),
    Stdout,
}

impl DeliveryTarget {
    /// A file when a path was given, stdout otherwise.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(DeliveryTarget::Stdout, DeliveryTarget::File)
    }
}

impl fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryTarget::File(path) => write!(f, "{}", path.display()),
            DeliveryTarget::Stdout => f.write_str("stdout"),
        }
    }
}

/// Rendered documents, each paired with its destination.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub deliveries: Vec<(DeliveryTarget, String)>,
}

impl OutputPlan {
    pub fn to_file_or_stdout(path: Option<PathBuf>, content: String) -> Self {
        Self {
            deliveries: vec![(DeliveryTarget::from_path(path), content)],
        }
    }
}

/// Bytes that reached their destination and one message per delivery that did not.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub bytes_written: usize,
    pub failures: Vec<String>,
}

impl OutputReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
