//! Beacon directory: the single source of truth for beacon identity

use std::collections::HashMap;

use crate::core::{BeaconDescriptor, Point};
use crate::utils::config::{BeaconRow, ConfigError};

/// Immutable lookup table from device id to beacon descriptor.
///
/// Indices are dense `0..len()` and ids are unique; both are enforced
/// at construction so the rest of the pipeline can index slot arrays
/// directly.
#[derive(Debug, Clone, PartialEq)]
pub struct BeaconDirectory {
    beacons: Vec<BeaconDescriptor>,
    by_id: HashMap<String, usize>,
}

impl BeaconDirectory {
    /// Validate configuration rows and build the directory
    pub fn from_rows(rows: Vec<BeaconRow>) -> Result<Self, ConfigError> {
        if rows.is_empty() {
            return Err(ConfigError::EmptyDirectory);
        }

        let count = rows.len();
        let mut slots: Vec<Option<BeaconDescriptor>> = vec![None; count];
        let mut by_id = HashMap::with_capacity(count);

        for row in rows {
            for (field, value) in [
                ("x", row.x),
                ("y", row.y),
                ("reference_rssi_at_1m", row.reference_rssi_at_1m),
                ("path_loss_exponent", row.path_loss_exponent),
            ] {
                if !value.is_finite() {
                    return Err(ConfigError::NonFinite { id: row.id, field });
                }
            }
            if row.path_loss_exponent <= 0.0 {
                return Err(ConfigError::InvalidPathLoss {
                    id: row.id,
                    value: row.path_loss_exponent,
                });
            }
            if row.index >= count {
                // some lower index is necessarily absent
                let missing = (0..count).find(|i| slots[*i].is_none()).unwrap_or(0);
                return Err(ConfigError::IndexGap { count, missing });
            }
            if slots[row.index].is_some() {
                return Err(ConfigError::DuplicateIndex { index: row.index });
            }
            if let Some(&first) = by_id.get(&row.id) {
                return Err(ConfigError::DuplicateId {
                    id: row.id,
                    first,
                    second: row.index,
                });
            }

            by_id.insert(row.id.clone(), row.index);
            slots[row.index] = Some(BeaconDescriptor {
                id: row.id,
                index: row.index,
                position: Point::new(row.x, row.y),
                reference_rssi_at_1m: row.reference_rssi_at_1m,
                path_loss_exponent: row.path_loss_exponent,
            });
        }

        // count rows fit count slots without duplicates, so every slot is filled
        let beacons = slots.into_iter().flatten().collect();
        Ok(Self { beacons, by_id })
    }

    /// Exact-match lookup of a device id
    pub fn resolve(&self, device_id: &str) -> Option<usize> {
        self.by_id.get(device_id).copied()
    }

    pub fn get(&self, index: usize) -> Option<&BeaconDescriptor> {
        self.beacons.get(index)
    }

    pub fn len(&self) -> usize {
        self.beacons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beacons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BeaconDescriptor> {
        self.beacons.iter()
    }

    /// Convert back to configuration rows, ordered by index
    pub fn rows(&self) -> Vec<BeaconRow> {
        self.beacons
            .iter()
            .map(|b| BeaconRow {
                index: b.index,
                id: b.id.clone(),
                x: b.position.x,
                y: b.position.y,
                reference_rssi_at_1m: b.reference_rssi_at_1m,
                path_loss_exponent: b.path_loss_exponent,
            })
            .collect()
    }
}
