use crate::analyze::{AggregateRow, Dashboard, DashboardState, IndividualPanel, MetricCard};
use crate::error::{ReportError, Result};
use crate::model::store;
use markdown_builder::Markdown;
use markdown_table::{Heading, HeadingAlignment, MarkdownTable};
use std::fmt;
use std::path::Path;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];
const PROGRESS_WIDTH: usize = 20;

pub trait MarkdownReport {
    fn render(&self) -> std::result::Result<String, ReportError>;
    fn report_create(&self, path: &Path) -> Result<()>;
}

impl MarkdownReport for Dashboard {
    fn render(&self) -> std::result::Result<String, ReportError> {
        let mut doc = Markdown::new();

        doc.header1("Gamified Productivity Dashboard");
        doc.block(format!(
            "*Points earned from ClickUp deliveries* · Period: **{}** · Area: **{}**",
            self.view.period, self.view.area
        ));

        match &self.state {
            DashboardState::InvalidPeriod(err) => {
                doc.paragraph(format!("⚠️ The selected period cannot be applied: {err}."));
            }
            DashboardState::EmptyDataWarning => {
                doc.paragraph("No completed tasks match the selected filters.");
            }
            DashboardState::Ready => {
                doc.add_cards(&self.cards())?;
                doc.add_podium(self.podium());
                doc.add_ranking(&self.aggregation.ranking)?;
                doc.header2("Individual Panels");
                for panel in self.panels() {
                    doc.add_panel(&panel, self.monthly_goal)?;
                }
            }
        }

        Ok(doc.render())
    }

    fn report_create(&self, path: &Path) -> Result<()> {
        let rendered = self.render()?;
        store::write_atomic(path, rendered.as_bytes())
    }
}

/// Text emitted as is. `Paragraph` re-wraps long lines, which breaks table rows.
#[derive(Clone, Debug)]
struct Block(String);

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.ends_with('\n') {
            write!(f, "{}", self.0)
        } else {
            writeln!(f, "{}", self.0)
        }
    }
}

trait MarkdownExt {
    fn block(&mut self, text: String) -> &mut Self;
    fn add_cards(&mut self, cards: &[MetricCard]) -> std::result::Result<(), ReportError>;
    fn add_podium(&mut self, podium: &[AggregateRow]);
    fn add_ranking(&mut self, ranking: &[AggregateRow]) -> std::result::Result<(), ReportError>;
    fn add_panel(
        &mut self,
        panel: &IndividualPanel,
        goal: u32,
    ) -> std::result::Result<(), ReportError>;
}

impl MarkdownExt for Markdown {
    fn block(&mut self, text: String) -> &mut Self {
        self.elements.push(Box::new(Block(text)));
        self
    }

    fn add_cards(&mut self, cards: &[MetricCard]) -> std::result::Result<(), ReportError> {
        self.header2("Overview");
        let rows = cards
            .iter()
            .map(|card| vec![card.label.to_string(), card.value.clone(), card.delta.clone()])
            .collect::<Vec<_>>();
        self.block(table(&["Metric", "Value", "vs previous period"], rows)?);
        Ok(())
    }

    fn add_podium(&mut self, podium: &[AggregateRow]) {
        self.header2("Highlights");
        let lines = podium
            .iter()
            .zip(MEDALS)
            .map(|(row, medal)| {
                format!(
                    "{medal} **{}**: {} points · {} tasks",
                    row.responsavel, row.pontos, row.tarefas
                )
            })
            .collect::<Vec<_>>();
        self.block(lines.join("  \n"));
    }

    fn add_ranking(&mut self, ranking: &[AggregateRow]) -> std::result::Result<(), ReportError> {
        self.header2("Full Ranking");
        let rows = ranking
            .iter()
            .enumerate()
            .map(|(position, row)| {
                vec![
                    format!("{}", position + 1),
                    row.responsavel.clone(),
                    row.pontos.to_string(),
                    row.tarefas.to_string(),
                ]
            })
            .collect::<Vec<_>>();
        self.block(table(&["#", "Contributor", "Points", "Tasks"], rows)?);
        Ok(())
    }

    fn add_panel(
        &mut self,
        panel: &IndividualPanel,
        goal: u32,
    ) -> std::result::Result<(), ReportError> {
        self.header3(format!("👤 {}", panel.responsavel));
        self.block(format!(
            "🎯 **{}** points · 📌 **{}** tasks  \nMonthly goal ({goal} pts): `{}`",
            panel.pontos,
            panel.tarefas,
            progress_bar(panel.progress)
        ));

        let rows = panel
            .tasks
            .iter()
            .map(|task| {
                vec![
                    task.data.map_or("-".to_string(), |d| d.format("%d.%m.%Y").to_string()),
                    task.titulo.clone(),
                    task.tags.join(", "),
                    task.pontos.to_string(),
                ]
            })
            .collect::<Vec<_>>();
        if !rows.is_empty() {
            self.block(table(&["Date", "Task", "Tags", "Points"], rows)?);
        }
        Ok(())
    }
}

pub(crate) fn table(headings: &[&str], rows: Vec<Vec<String>>) -> std::result::Result<String, ReportError> {
    let headings = headings
        .iter()
        .enumerate()
        .map(|(index, heading)| {
            let alignment = if index == 0 {
                None
            } else {
                Some(HeadingAlignment::Center)
            };
            Heading::new(heading.to_string(), alignment)
        })
        .collect::<Vec<_>>();
    let mut md_table = MarkdownTable::new(rows);
    md_table.with_headings(headings);
    md_table
        .as_markdown()
        .map_err(|err| ReportError::Table(format!("{err:?}")))
}

fn progress_bar(progress: f64) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * PROGRESS_WIDTH as f64).round() as usize;
    format!(
        "{}{} {:.0}%",
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled),
        progress * 100.0
    )
}
