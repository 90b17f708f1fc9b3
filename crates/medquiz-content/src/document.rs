//! Per-partition document layout shared by every content backend.
//!
//! Each partition is a directory holding two JSON arrays:
//! `<partition>/medications.json` and `<partition>/scenarios.json`.

use std::fmt;

use medquiz_core::model::Partition;

/// The two documents each partition serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Medications,
    Scenarios,
}

impl DocumentKind {
    pub fn file_name(self) -> &'static str {
        match self {
            DocumentKind::Medications => "medications.json",
            DocumentKind::Scenarios => "scenarios.json",
        }
    }

    /// Relative path of this document for `partition`.
    pub fn path(self, partition: Partition) -> String {
        format!("{}/{}", partition.as_str(), self.file_name())
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Medications => write!(f, "medications"),
            DocumentKind::Scenarios => write!(f, "scenarios"),
        }
    }
}
