use serde::Serialize;

/// Review status codes reported by the homework service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Parse a raw status code. Returns `None` for anything outside the closed set.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Static mapping from status code to the verdict sentence sent to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictTable {
    approved: &'static str,
    reviewing: &'static str,
    rejected: &'static str,
}

impl VerdictTable {
    pub fn new() -> Self {
        Self {
            approved: "The work has been reviewed: the reviewer liked everything. Hooray!",
            reviewing: "The work has been taken for review by the reviewer.",
            rejected: "The work has been reviewed: the reviewer has remarks.",
        }
    }

    pub fn verdict(&self, status: HomeworkStatus) -> &'static str {
        match status {
            HomeworkStatus::Approved => self.approved,
            HomeworkStatus::Reviewing => self.reviewing,
            HomeworkStatus::Rejected => self.rejected,
        }
    }

    /// Whether `sentence` is one of the table's verdicts.
    pub fn contains(&self, sentence: &str) -> bool {
        [self.approved, self.reviewing, self.rejected].contains(&sentence)
    }
}

impl Default for VerdictTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Record substituted for an empty `homeworks` list when placeholder
/// injection is enabled.
pub fn placeholder_record() -> serde_json::Value {
    serde_json::json!({
        "id": 124,
        "status": HomeworkStatus::Rejected,
        "homework_name": "username__hw_python_oop.zip",
        "reviewer_comment": "Code does not follow PEP8, please fix",
        "date_updated": "2020-02-13T16:42:47Z",
        "lesson_name": "Final project"
    })
}
