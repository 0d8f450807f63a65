use serde::Deserialize;

/// A recursive tree listing as returned by GitHub's Git Trees API.
/// `GET /repos/{owner}/{repo}/git/trees/{commit}?recursive=1`
///
/// A response is only accepted once it deserializes into this shape;
/// anything else is rejected at the client layer as unrecognized.
#[derive(Debug, Deserialize)]
pub struct TreeListing {
    pub sha: String,
    pub url: String,
    pub tree: Vec<PathEntry>,
}

/// A single entry in the flat listing: a slash-delimited path plus the
/// kind of object it names.
#[derive(Debug, Clone, Deserialize)]
pub struct PathEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// The VCS object kind of a listing entry. Only blobs classify nodes as
/// files; everything else (trees, submodule commits) is a directory marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
    #[serde(other)]
    Other,
}

impl PathEntry {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}
