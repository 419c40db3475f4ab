use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use time::Date;

use super::{MaterialId, ProjectId};
use crate::{aggregation, dates};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum PcccCategory {
    Pipe,
    Sprinkler,
    Valve,
    Cabinet,
    Alarm,
    Extinguisher,
}

/// Derived stock classification. Precedence: `Expired` > `LowStock` > `Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum StockStatus {
    Good,
    #[serde(rename = "Low Stock")]
    #[strum(serialize = "Low Stock")]
    LowStock,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum AllocationState {
    Issued,
    Installed,
}

/// Quantity of a warehouse item handed out to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub project_id: ProjectId,
    pub project_name: String,
    pub quantity: u32,
    pub status: AllocationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_date: Option<String>,
}

/// A fire-safety inventory record.
///
/// Invariant: `available_quantity <= total_quantity`. `status` is derived and
/// must be refreshed whenever quantities or the expiry date change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PcccMaterial {
    pub id: MaterialId,
    pub name: String,
    pub category: PcccCategory,
    #[serde(default)]
    pub spec: String,
    pub total_quantity: u32,
    pub available_quantity: u32,
    pub min_stock_level: u32,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_expiry: Option<String>,
    pub status: StockStatus,
    #[serde(default)]
    pub allocated_to: Vec<Allocation>,
}

impl PcccMaterial {
    pub fn new(
        id: impl Into<MaterialId>,
        name: impl Into<String>,
        category: PcccCategory,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            spec: String::new(),
            total_quantity: 0,
            available_quantity: 0,
            min_stock_level: 0,
            unit: unit.into(),
            inspection_expiry: None,
            status: StockStatus::Good,
            allocated_to: Vec::new(),
        }
    }

    pub fn with_quantities(mut self, total: u32, available: u32, min_stock: u32) -> Self {
        self.total_quantity = total;
        self.available_quantity = available;
        self.min_stock_level = min_stock;
        self
    }

    pub fn with_expiry(mut self, expiry: impl Into<String>) -> Self {
        self.inspection_expiry = Some(expiry.into());
        self
    }

    pub fn with_spec(mut self, spec: impl Into<String>) -> Self {
        self.spec = spec.into();
        self
    }

    pub fn expiry(&self) -> Option<Date> {
        self.inspection_expiry.as_deref().and_then(dates::parse_date)
    }

    /// Inspection lapses at the start of the expiry day.
    pub fn is_expired(&self, today: Date) -> bool {
        self.expiry().is_some_and(|expiry| expiry <= today)
    }

    pub fn is_low_stock(&self) -> bool {
        self.available_quantity <= self.min_stock_level
    }

    /// Clamp `available_quantity` into range and recompute `status`.
    pub fn normalize(&mut self, today: Date) {
        self.available_quantity = self.available_quantity.min(self.total_quantity);
        self.refresh_status(today);
    }

    pub fn refresh_status(&mut self, today: Date) {
        self.status = aggregation::compute_material_status(self, today);
    }

    /// Quantity issued to projects but not yet installed.
    pub fn issued_not_installed(&self) -> u32 {
        self.allocated_to
            .iter()
            .filter(|a| a.status == AllocationState::Issued)
            .map(|a| a.quantity)
            .sum()
    }
}
