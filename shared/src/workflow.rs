//! Tailoring workflow view model
//!
//! The production sequence of a tailoring order is owned by the backend. The
//! client reads it, derives progress and time-efficiency figures, and can only
//! ask for one transition: "the current step is done". Whether that
//! transition is legal is decided by the server.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::round2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    pub id: String,
    pub name: String,
    /// Position in the sequence, ascending
    #[serde(default)]
    pub sequence: u32,
    #[serde(default)]
    pub status: StepStatus,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub actual_minutes: Option<u32>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl WorkflowStep {
    /// `estimated / actual * 100`; above 100 means faster than planned
    pub fn efficiency(&self) -> Option<Decimal> {
        efficiency(self.estimated_minutes?, self.actual_minutes?)
    }

    /// Minutes spent so far on a running step
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        match self.status {
            StepStatus::InProgress => self
                .started_at
                .map(|started| (now - started).num_minutes().max(0)),
            StepStatus::Completed => self.actual_minutes.map(i64::from),
            StepStatus::Pending => None,
        }
    }
}

fn efficiency(estimated: u32, actual: u32) -> Option<Decimal> {
    if actual == 0 {
        return None;
    }
    Some(round2(
        Decimal::from(estimated) / Decimal::from(actual) * Decimal::ONE_HUNDRED,
    ))
}

/// `PATCH /tailoring/workflow/:id` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StepTransition {
    pub step_id: String,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TailoringWorkflow {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

impl TailoringWorkflow {
    pub fn new(order_id: impl Into<String>, mut steps: Vec<WorkflowStep>) -> Self {
        steps.sort_by_key(|step| step.sequence);
        Self {
            order_id: Some(order_id.into()),
            steps,
        }
    }

    /// Steps in sequence order, whatever order the server sent them in
    pub fn ordered_steps(&self) -> Vec<&WorkflowStep> {
        let mut steps: Vec<&WorkflowStep> = self.steps.iter().collect();
        steps.sort_by_key(|step| step.sequence);
        steps
    }

    /// First in-progress step, else the first pending one
    pub fn current_step(&self) -> Option<&WorkflowStep> {
        let steps = self.ordered_steps();
        steps
            .iter()
            .find(|step| step.status == StepStatus::InProgress)
            .or_else(|| steps.iter().find(|step| step.status == StepStatus::Pending))
            .copied()
    }

    pub fn completed_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count()
    }

    /// Completed steps over all steps, 0 for an empty workflow
    pub fn progress_percent(&self) -> Decimal {
        if self.steps.is_empty() {
            return Decimal::ZERO;
        }
        round2(
            Decimal::from(self.completed_count() as u64) / Decimal::from(self.steps.len() as u64)
                * Decimal::ONE_HUNDRED,
        )
    }

    pub fn is_complete(&self) -> bool {
        !self.steps.is_empty() && self.completed_count() == self.steps.len()
    }

    /// Efficiency over every step that has both an estimate and an actual time
    pub fn overall_efficiency(&self) -> Option<Decimal> {
        let (estimated, actual) = self
            .steps
            .iter()
            .filter_map(|step| Some((step.estimated_minutes?, step.actual_minutes?)))
            .fold((0u32, 0u32), |(e, a), (step_e, step_a)| {
                (e.saturating_add(step_e), a.saturating_add(step_a))
            });
        efficiency(estimated, actual)
    }

    pub fn total_estimated_minutes(&self) -> u32 {
        self.steps
            .iter()
            .filter_map(|step| step.estimated_minutes)
            .sum()
    }

    /// Estimated minutes still ahead (current step included)
    pub fn remaining_estimated_minutes(&self) -> u32 {
        self.steps
            .iter()
            .filter(|step| step.status != StepStatus::Completed)
            .filter_map(|step| step.estimated_minutes)
            .sum()
    }

    /// Request marking the current step complete, `None` when nothing is left
    pub fn complete_current_request(&self) -> Option<StepTransition> {
        self.current_step().map(|step| StepTransition {
            step_id: step.id.clone(),
            status: StepStatus::Completed,
        })
    }
}
