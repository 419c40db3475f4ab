use async_trait::async_trait;
use buildtrack_core::{
    domain::PcccMaterial,
    inventory::{ImportBatch, MaterialFilter, RawRow, WarehouseStats},
};
use time::Date;

use crate::domain::InventoryError;

/// Result of a stock adjustment request.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustOutcome {
    pub material: PcccMaterial,
    /// False when the adjustment hit a bound and nothing was written.
    pub changed: bool,
}

/// PCCC warehouse use cases.
#[async_trait]
pub trait InventoryService: Send + Sync + 'static {
    /// Matching materials with `status` recomputed for `today`.
    async fn list_materials(
        &self,
        filter: &MaterialFilter,
        today: Date,
    ) -> Result<Vec<PcccMaterial>, InventoryError>;

    /// Insert or replace a material, clamping quantities and recomputing status.
    async fn save_material(
        &self,
        material: PcccMaterial,
        today: Date,
    ) -> Result<PcccMaterial, InventoryError>;

    async fn delete_material(&self, material_id: &str) -> Result<(), InventoryError>;

    async fn adjust_stock(
        &self,
        material_id: &str,
        delta: i64,
        today: Date,
    ) -> Result<AdjustOutcome, InventoryError>;

    async fn warehouse_stats(&self, today: Date) -> Result<WarehouseStats, InventoryError>;

    /// Parse rows without persisting anything.
    fn preview_import(&self, rows: &[RawRow], today: Date) -> ImportBatch;

    /// Persist a previewed batch. Returns the number of stored records.
    async fn confirm_import(
        &self,
        records: Vec<PcccMaterial>,
        today: Date,
    ) -> Result<usize, InventoryError>;
}
