pub mod builder;
pub mod listing;
pub mod node;
pub mod outcome;

pub use builder::build;
pub use listing::{EntryKind, PathEntry, TreeListing};
pub use node::{NodeKind, TreeNode};
pub use outcome::RunOutcome;
