//! In-memory inventory ledger with an append-only change history.
//!
//! Every successful mutation records a `StockHistoryEntry`; failed
//! mutations leave both the stock level and the history untouched.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::models::enums::StockChangeReason;
use crate::models::{InventoryEntry, StockHistoryEntry};

/// Outcome of a single stock mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockChange {
    pub pharmacy_id: u32,
    pub medication_id: u32,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub change_amount: i64,
    pub changed_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    levels: BTreeMap<(u32, u32), i64>,
    history: Vec<StockHistoryEntry>,
}

fn validate_positive(value: i64, name: &str) -> Result<()> {
    if value <= 0 {
        return Err(EngineError::Validation(format!("{name} must be > 0")));
    }
    Ok(())
}

fn validate_non_negative(value: i64, name: &str) -> Result<()> {
    if value < 0 {
        return Err(EngineError::Validation(format!("{name} must be >= 0")));
    }
    Ok(())
}

fn overflow() -> EngineError {
    EngineError::Validation("Stock quantity out of range".into())
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the ledger from existing stock levels without recording history.
    /// Later duplicates of a (pharmacy, medication) pair win.
    pub fn from_entries(entries: &[InventoryEntry]) -> Self {
        let levels = entries
            .iter()
            .map(|e| ((e.pharmacy_id, e.medication_id), e.quantity))
            .collect();
        Self {
            levels,
            history: Vec::new(),
        }
    }

    pub fn quantity(&self, pharmacy_id: u32, medication_id: u32) -> Option<i64> {
        self.levels.get(&(pharmacy_id, medication_id)).copied()
    }

    pub fn entries(&self) -> Vec<InventoryEntry> {
        self.levels
            .iter()
            .map(|(&(pharmacy_id, medication_id), &quantity)| InventoryEntry {
                pharmacy_id,
                medication_id,
                quantity,
            })
            .collect()
    }

    pub fn history(&self) -> &[StockHistoryEntry] {
        &self.history
    }

    fn apply(
        &mut self,
        pharmacy_id: u32,
        medication_id: u32,
        new_quantity: i64,
        reason: StockChangeReason,
        now: NaiveDateTime,
    ) -> Result<StockChange> {
        let previous = self.quantity(pharmacy_id, medication_id).unwrap_or(0);
        let change_amount = new_quantity.checked_sub(previous).ok_or_else(overflow)?;
        self.levels.insert((pharmacy_id, medication_id), new_quantity);
        self.history.push(StockHistoryEntry {
            id: Uuid::new_v4(),
            pharmacy_id,
            medication_id,
            old_quantity: previous,
            new_quantity,
            changed_at: now,
            reason,
        });
        tracing::debug!(
            pharmacy_id,
            medication_id,
            previous,
            new_quantity,
            reason = reason.as_str(),
            "Stock changed"
        );
        Ok(StockChange {
            pharmacy_id,
            medication_id,
            previous_quantity: previous,
            new_quantity,
            change_amount,
            changed_at: now,
        })
    }

    /// Add stock, creating the entry at zero when it does not exist.
    pub fn add_stock(
        &mut self,
        pharmacy_id: u32,
        medication_id: u32,
        quantity: i64,
        now: NaiveDateTime,
    ) -> Result<StockChange> {
        validate_positive(quantity, "quantity")?;
        let current = self.quantity(pharmacy_id, medication_id).unwrap_or(0);
        let total = current.checked_add(quantity).ok_or_else(overflow)?;
        self.apply(pharmacy_id, medication_id, total, StockChangeReason::Add, now)
    }

    /// Overwrite the stock level, creating the entry when missing.
    pub fn update_stock(
        &mut self,
        pharmacy_id: u32,
        medication_id: u32,
        new_quantity: i64,
        now: NaiveDateTime,
    ) -> Result<StockChange> {
        validate_non_negative(new_quantity, "new_quantity")?;
        self.apply(
            pharmacy_id,
            medication_id,
            new_quantity,
            StockChangeReason::Update,
            now,
        )
    }

    pub fn remove_stock(
        &mut self,
        pharmacy_id: u32,
        medication_id: u32,
        quantity: i64,
        now: NaiveDateTime,
    ) -> Result<StockChange> {
        validate_positive(quantity, "quantity")?;
        let current = self
            .quantity(pharmacy_id, medication_id)
            .ok_or_else(|| EngineError::NotFound {
                entity_type: "inventory".into(),
                id: format!("{pharmacy_id}/{medication_id}"),
            })?;
        let remaining = current.checked_sub(quantity).ok_or_else(overflow)?;
        if remaining < 0 {
            return Err(EngineError::Validation(
                "Cannot remove more stock than available".into(),
            ));
        }
        self.apply(
            pharmacy_id,
            medication_id,
            remaining,
            StockChangeReason::Remove,
            now,
        )
    }
}
