use crate::node::TreeNode;

/// Uniform result of one fetch-build-write run.
///
/// Every failure the orchestrator can encounter is folded into this record
/// instead of propagating as a raw fault: `status_code` carries the HTTP
/// status when one applies and `0` otherwise, and `message` is the
/// human-readable description handed to the reporting layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
    pub result: Option<TreeNode>,
}

impl RunOutcome {
    pub fn ok(result: Option<TreeNode>) -> Self {
        Self {
            success: true,
            message: "OK".to_owned(),
            status_code: 0,
            result,
        }
    }

    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status_code,
            result: None,
        }
    }
}
