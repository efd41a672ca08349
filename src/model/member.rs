use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/50";

const COMPLETED_STATUSES: [&str; 2] = ["concluído", "done"];

#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u64,
    pub name: String,
    pub avatar: String,
}

impl TeamMember {
    pub fn new(id: u64, name: impl ToString, avatar: Option<impl ToString>) -> Self {
        Self {
            id,
            name: name.to_string(),
            avatar: avatar
                .map(|a| a.to_string())
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string()),
        }
    }
}

/// Counts of a member's tasks split by completion.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TaskSummary {
    pub total: usize,
    pub open: usize,
    pub completed: usize,
}

impl TaskSummary {
    pub fn from_statuses<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let (total, completed) = statuses.into_iter().fold((0, 0), |(total, done), status| {
            let status = status.to_lowercase();
            let is_done = COMPLETED_STATUSES.contains(&status.as_str());
            (total + 1, done + usize::from(is_done))
        });
        Self {
            total,
            open: total - completed,
            completed,
        }
    }
}
