use crate::clickup::client::{ClickUpClient, Result};
use crate::error::FetchError;
use crate::model::{TaskSummary, TeamMember};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
struct TeamResponse {
    #[serde(default)]
    team: Option<TeamBody>,
}

#[derive(Debug, Deserialize)]
struct TeamBody {
    #[serde(default)]
    members: Option<Vec<MemberBody>>,
}

#[derive(Debug, Deserialize)]
struct MemberBody {
    user: UserBody,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: u64,
    username: Option<String>,
    #[serde(rename = "profilePicture", default)]
    profile_picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserTasks {
    #[serde(default)]
    tasks: Vec<StatusOnly>,
}

#[derive(Debug, Deserialize)]
struct StatusOnly {
    #[serde(default)]
    status: Option<StatusBody>,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    #[serde(default)]
    status: String,
}

pub trait ClickUpTeam {
    async fn team_members(&self, team_id: &str) -> Result<Vec<TeamMember>>;
    async fn user_task_summary(&self, user_id: u64) -> Result<TaskSummary>;
}

impl ClickUpTeam for ClickUpClient {
    async fn team_members(&self, team_id: &str) -> Result<Vec<TeamMember>> {
        let path = format!("team/{team_id}");
        let response: TeamResponse = self.get_json(&path, &[]).await?;
        let Some(members) = response.team.and_then(|team| team.members) else {
            return Err(FetchError::InvalidPayload {
                url: self.url(&path),
                reason: "response has no team members; check the token and team_id".to_string(),
            });
        };

        let members = members
            .into_iter()
            .map(|member| {
                let user = member.user;
                let name = user.username.unwrap_or_else(|| user.id.to_string());
                TeamMember::new(user.id, name, user.profile_picture)
            })
            .collect::<Vec<_>>();
        info!(target: "gamify::fetch", team = %team_id, members = members.len(), "fetched team members");
        Ok(members)
    }

    async fn user_task_summary(&self, user_id: u64) -> Result<TaskSummary> {
        let path = format!("user/{user_id}/task");
        let query = [("include_closed", "true".to_string())];
        let response: UserTasks = self.get_json(&path, &query).await?;
        Ok(TaskSummary::from_statuses(
            response
                .tasks
                .iter()
                .map(|t| t.status.as_ref().map_or("", |s| s.status.as_str())),
        ))
    }
}
