//! Derived fields kept consistent with their underlying detail lists.

use serde::Serialize;
use time::Date;

use crate::domain::{
    DocumentStatus, PaymentStatus, PcccMaterial, Project, StockStatus, Task,
};

/// Mean task progress, rounded half up. An empty task list is 0%.
pub fn compute_project_progress(tasks: &[Task]) -> u8 {
    rounded_mean(tasks.iter().map(|t| t.progress))
}

pub(crate) fn rounded_mean(values: impl IntoIterator<Item = u8>) -> u8 {
    let (total, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(total, count), v| (total + u64::from(v), count + 1));
    if count == 0 {
        return 0;
    }
    // round(total / count) for non-negative values, in integers
    let rounded = (2 * total + count) / (2 * count);
    rounded.min(100) as u8
}

/// Expired (inspection date on or before `today`) beats Low Stock
/// (`available <= min`) beats Good.
pub fn compute_material_status(material: &PcccMaterial, today: Date) -> StockStatus {
    if material.is_expired(today) {
        StockStatus::Expired
    } else if material.is_low_stock() {
        StockStatus::LowStock
    } else {
        StockStatus::Good
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub paid_stages: usize,
    pub overdue_stages: usize,
    /// Sum of Pending and Overdue stage amounts.
    pub pending_amount: f64,
}

pub fn financial_summary(project: &Project) -> FinancialSummary {
    let count = |status: PaymentStatus| {
        project
            .financials
            .iter()
            .filter(|stage| stage.status == status)
            .count()
    };

    FinancialSummary {
        paid_stages: count(PaymentStatus::Paid),
        overdue_stages: count(PaymentStatus::Overdue),
        pending_amount: project
            .financials
            .iter()
            .filter(|stage| stage.is_outstanding())
            .map(|stage| stage.amount)
            .sum(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub total: usize,
    /// Documents that are Approved or Completed.
    pub approved: usize,
    pub drafts: Vec<String>,
}

pub fn document_summary(project: &Project) -> DocumentSummary {
    let approved = project
        .documents
        .iter()
        .filter(|doc| matches!(doc.status, DocumentStatus::Approved | DocumentStatus::Completed))
        .count();
    let drafts = project
        .documents
        .iter()
        .filter(|doc| doc.status == DocumentStatus::Draft)
        .map(|doc| doc.name.clone())
        .collect();

    DocumentSummary {
        total: project.documents.len(),
        approved,
        drafts,
    }
}

/// Tasks ordered by start date. Ties and unparsable dates keep their input
/// order relative to each other; unparsable dates sort last.
pub fn timeline(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|task| {
        crate::dates::parse_date(&task.start_date).map_or((1, Date::MIN), |date| (0, date))
    });
    sorted
}
