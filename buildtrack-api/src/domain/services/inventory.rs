use std::sync::Arc;

use async_trait::async_trait;
use buildtrack_core::{
    domain::PcccMaterial,
    inventory::{
        adjust_available, parse_import_batch, ImportBatch, MaterialFilter, RawRow,
        StockAdjustment, WarehouseStats,
    },
};
use time::{Date, OffsetDateTime};

use crate::domain::{
    ports::{
        inbound::{AdjustOutcome, InventoryService},
        outbound::{delete_record, find_record, load_all, save_record, RecordStore},
    },
    InventoryError,
};

pub struct InventoryServiceImpl<S> {
    store: Arc<S>,
}

impl<S: RecordStore> InventoryServiceImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn load(&self, material_id: &str) -> Result<PcccMaterial, InventoryError> {
        find_record::<PcccMaterial>(&*self.store, material_id)
            .await?
            .ok_or_else(|| InventoryError::MaterialNotFound(material_id.to_string()))
    }
}

#[async_trait]
impl<S: RecordStore> InventoryService for InventoryServiceImpl<S> {
    async fn list_materials(
        &self,
        filter: &MaterialFilter,
        today: Date,
    ) -> Result<Vec<PcccMaterial>, InventoryError> {
        let materials: Vec<PcccMaterial> = load_all(&*self.store).await?;
        Ok(materials
            .into_iter()
            .filter(|m| filter.matches(m))
            .map(|mut m| {
                m.refresh_status(today);
                m
            })
            .collect())
    }

    async fn save_material(
        &self,
        mut material: PcccMaterial,
        today: Date,
    ) -> Result<PcccMaterial, InventoryError> {
        material.normalize(today);
        save_record(&*self.store, &material).await?;
        Ok(material)
    }

    async fn delete_material(&self, material_id: &str) -> Result<(), InventoryError> {
        self.load(material_id).await?;
        delete_record::<PcccMaterial>(&*self.store, material_id).await?;
        Ok(())
    }

    async fn adjust_stock(
        &self,
        material_id: &str,
        delta: i64,
        today: Date,
    ) -> Result<AdjustOutcome, InventoryError> {
        let material = self.load(material_id).await?;

        match adjust_available(&material, delta, today) {
            StockAdjustment::Applied(updated) => {
                tracing::debug!(
                    material_id,
                    from = material.available_quantity,
                    to = updated.available_quantity,
                    status = %updated.status,
                    "Adjusted stock"
                );
                save_record(&*self.store, &updated).await?;
                Ok(AdjustOutcome {
                    material: updated,
                    changed: true,
                })
            }
            StockAdjustment::NoOp => Ok(AdjustOutcome {
                material,
                changed: false,
            }),
        }
    }

    async fn warehouse_stats(&self, today: Date) -> Result<WarehouseStats, InventoryError> {
        let materials: Vec<PcccMaterial> = load_all(&*self.store).await?;
        Ok(WarehouseStats::from_materials(&materials, today))
    }

    fn preview_import(&self, rows: &[RawRow], today: Date) -> ImportBatch {
        let prefix = format!(
            "pccc-import-{}",
            OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
        );
        parse_import_batch(rows, today, &prefix)
    }

    async fn confirm_import(
        &self,
        records: Vec<PcccMaterial>,
        today: Date,
    ) -> Result<usize, InventoryError> {
        if records.is_empty() {
            return Err(InventoryError::EmptyImport);
        }

        let count = records.len();
        for mut material in records {
            material.normalize(today);
            save_record(&*self.store, &material).await?;
        }
        tracing::info!(count, "Imported PCCC materials");
        Ok(count)
    }
}
