use crate::model::ScoredRecord;
use itertools::Itertools;
use std::collections::BTreeMap;

pub const PODIUM_SIZE: usize = 3;

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct AggregateRow {
    pub responsavel: String,
    pub pontos: u64,
    pub tarefas: usize,
}

impl AggregateRow {
    pub fn new(responsavel: impl ToString, pontos: u64, tarefas: usize) -> Self {
        Self {
            responsavel: responsavel.to_string(),
            pontos,
            tarefas,
        }
    }
}

/// Per-assignee totals, highest score first. Groups are formed in assignee
/// name order and the sort is stable, so ties keep that order.
pub fn rollup(records: &[&ScoredRecord]) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<&str, (u64, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.responsavel.as_str()).or_default();
        entry.0 += u64::from(record.pontos);
        entry.1 += 1;
    }
    let mut ranking = groups
        .into_iter()
        .map(|(name, (pontos, tarefas))| AggregateRow::new(name, pontos, tarefas))
        .collect::<Vec<_>>();
    ranking.sort_by(|a, b| b.pontos.cmp(&a.pontos));
    ranking
}

pub fn podium(ranking: &[AggregateRow]) -> &[AggregateRow] {
    &ranking[..ranking.len().min(PODIUM_SIZE)]
}

/// Headline numbers of a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub total_points: u64,
    pub tasks: usize,
    pub contributors: usize,
}

impl Metrics {
    pub fn from_records(records: &[&ScoredRecord]) -> Self {
        let (total_points, tasks) = records.iter().fold((0u64, 0usize), |(points, tasks), r| {
            (points + u64::from(r.pontos), tasks + 1)
        });
        let contributors = records.iter().map(|r| &r.responsavel).unique().count();
        Self {
            total_points,
            tasks,
            contributors,
        }
    }

    /// Mean points per task; undefined for an empty set.
    pub fn average_points(&self) -> Option<f64> {
        if self.tasks == 0 {
            None
        } else {
            Some(self.total_points as f64 / self.tasks as f64)
        }
    }
}
