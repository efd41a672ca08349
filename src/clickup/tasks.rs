use crate::clickup::client::{ClickUpClient, Result};
use crate::model::{epoch_millis, RawTask};
use futures::future;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

/// Called with the zero-based page number before each page is requested.
pub type PageProgress<'a> = Box<dyn FnMut(u32) + Send + 'a>;

#[derive(Debug, Deserialize)]
struct TaskPage {
    #[serde(default)]
    tasks: Vec<Value>,
    #[serde(default)]
    last_page: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ApiTask {
    id: String,
    name: String,
    #[serde(default)]
    assignees: Vec<ApiUser>,
    #[serde(default)]
    tags: Vec<ApiTag>,
    #[serde(default, deserialize_with = "epoch_millis")]
    date_closed: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiTag {
    name: String,
}

impl From<ApiTask> for RawTask {
    fn from(task: ApiTask) -> Self {
        Self {
            id: task.id,
            name: task.name,
            tags: task.tags.into_iter().map(|t| t.name).collect(),
            assignees: task
                .assignees
                .into_iter()
                .filter_map(|a| a.username)
                .collect(),
            date_closed: task.date_closed,
        }
    }
}

pub trait ClickUpTasks {
    async fn fetch_closed_tasks<'a>(
        &self,
        list_id: &str,
        status: &str,
        cb: PageProgress<'a>,
    ) -> Result<Vec<RawTask>>;

    async fn fetch_lists<'a, F>(
        &self,
        list_ids: &[String],
        status: &str,
        progress: F,
    ) -> Result<Vec<RawTask>>
    where
        F: Fn(&str) -> PageProgress<'a>;
}

impl ClickUpTasks for ClickUpClient {
    async fn fetch_closed_tasks<'a>(
        &self,
        list_id: &str,
        status: &str,
        mut cb: PageProgress<'a>,
    ) -> Result<Vec<RawTask>> {
        let path = format!("list/{list_id}/task");
        let mut page = 0;
        let mut tasks = vec![];

        loop {
            cb(page);
            let query = [
                ("statuses[]", status.to_string()),
                ("include_closed", "true".to_string()),
                ("page", page.to_string()),
            ];
            let task_page: TaskPage = self.get_json(&path, &query).await?;
            if task_page.tasks.is_empty() {
                break;
            }
            for (index, task) in task_page.tasks.into_iter().enumerate() {
                match serde_json::from_value::<ApiTask>(task) {
                    Ok(task) => tasks.push(RawTask::from(task)),
                    Err(err) => warn!(
                        target: "gamify::fetch",
                        list = %list_id,
                        page,
                        index,
                        error = %err,
                        "skipped malformed task"
                    ),
                }
            }
            if task_page.last_page.unwrap_or(false) {
                break;
            }
            page += 1;
        }

        info!(target: "gamify::fetch", list = %list_id, tasks = tasks.len(), pages = page + 1, "fetched list");
        Ok(tasks)
    }

    async fn fetch_lists<'a, F>(
        &self,
        list_ids: &[String],
        status: &str,
        progress: F,
    ) -> Result<Vec<RawTask>>
    where
        F: Fn(&str) -> PageProgress<'a>,
    {
        let fetched = future::join_all(
            list_ids
                .iter()
                .map(|list_id| self.fetch_closed_tasks(list_id, status, progress(list_id))),
        )
        .await;

        let mut tasks = vec![];
        for list in fetched {
            tasks.extend(list?);
        }
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_task_maps_usernames_tags_and_close_date() {
        let task: ApiTask = serde_json::from_value(json!({
            "id": "86a1",
            "name": "Gravar vídeo",
            "assignees": [{"id": 1, "username": "ana"}, {"id": 2, "username": null}],
            "tags": [{"name": "Vídeo", "tag_fg": "#fff"}],
            "date_closed": "1741995000000",
            "status": {"status": "concluído"}
        }))
        .unwrap();

        let raw = RawTask::from(task);
        assert_eq!(raw.assignees, ["ana"]);
        assert_eq!(raw.tags, ["Vídeo"]);
        assert_eq!(raw.date_closed, Some(1_741_995_000_000));
    }
}
