use crate::error::ReportError;
use crate::model::{TaskSummary, TeamMember};
use crate::report::markdown::table;

/// Team overview printed by the `members` command.
pub fn members_table(members: &[(TeamMember, TaskSummary)]) -> Result<String, ReportError> {
    if members.is_empty() {
        return Ok("No team members found.".to_string());
    }
    let rows = members
        .iter()
        .map(|(member, summary)| {
            vec![
                member.name.clone(),
                member.id.to_string(),
                summary.total.to_string(),
                summary.open.to_string(),
                summary.completed.to_string(),
                format!("![]({} =32x)", member.avatar),
            ]
        })
        .collect::<Vec<_>>();
    table(&["Member", "ID", "Tasks", "Open", "Completed", "Avatar"], rows)
}
