//! Storage folders recognized by the gateway

use serde::{Deserialize, Serialize};
use std::fmt;

/// The folders the gateway operates on
///
/// A folder is a path prefix in the backing store and nothing more; it has
/// no existence beyond the objects recorded under it. The set is closed:
/// everything else in a listing is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    /// Fresh submissions awaiting review
    Pending,
    /// Submissions promoted by a sync call
    Approved,
    /// Submissions turned down by review
    Rejected,
}

impl Folder {
    /// All recognized folders
    pub const ALL: [Folder; 3] = [Folder::Pending, Folder::Approved, Folder::Rejected];

    /// Path prefix for this folder
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse a folder from a path string, tolerating a trailing slash
    pub fn parse(path: &str) -> Option<Folder> {
        match path.trim_end_matches('/') {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
