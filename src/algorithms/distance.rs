//! RSSI to distance conversion
//!
//! Both supported curves are empirical fits. Per-beacon constants come from
//! the directory and the ratio-fit coefficients from system configuration.
//! Every estimate is clamped into a positive finite range so the
//! trilateration system stays defined.

use serde::{Deserialize, Serialize};

use crate::core::BeaconDescriptor;

/// Coefficients of the piecewise ratio fit, used when `rssi/tx_power >= 1`:
/// `scale * ratio^exponent + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioFit {
    pub scale: f64,
    pub exponent: f64,
    pub offset: f64,
}

impl Default for RatioFit {
    fn default() -> Self {
        Self {
            scale: 0.89976,
            exponent: 7.7095,
            offset: 0.111,
        }
    }
}

/// Calibration curve selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceModel {
    /// `10 ^ ((ref_rssi_1m - rssi) / (10 * n))`
    #[default]
    LogDistance,
    /// `ratio^10` below 1, the [`RatioFit`] curve otherwise, with
    /// `ratio = rssi / tx_power` and tx power taken from the 1 m reference
    PiecewiseRatio,
}

impl DistanceModel {
    /// Unclamped model output in meters
    pub fn raw_distance(
        &self,
        fit: &RatioFit,
        rssi: f64,
        reference_rssi_at_1m: f64,
        path_loss_exponent: f64,
    ) -> f64 {
        match self {
            DistanceModel::LogDistance => {
                10f64.powf((reference_rssi_at_1m - rssi) / (10.0 * path_loss_exponent))
            }
            DistanceModel::PiecewiseRatio => {
                let ratio = rssi / reference_rssi_at_1m;
                if ratio < 1.0 {
                    ratio.powi(10)
                } else {
                    fit.scale * ratio.powf(fit.exponent) + fit.offset
                }
            }
        }
    }
}

/// Pure RSSI to meters converter with output clamping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceEstimator {
    pub model: DistanceModel,
    pub ratio_fit: RatioFit,
    pub min_distance_m: f64,
    pub max_distance_m: f64,
}

impl Default for DistanceEstimator {
    fn default() -> Self {
        Self {
            model: DistanceModel::LogDistance,
            ratio_fit: RatioFit::default(),
            min_distance_m: 0.01,
            max_distance_m: 1000.0,
        }
    }
}

impl DistanceEstimator {
    pub fn new(model: DistanceModel, min_distance_m: f64, max_distance_m: f64) -> Self {
        Self {
            model,
            ratio_fit: RatioFit::default(),
            min_distance_m,
            max_distance_m,
        }
    }

    pub fn with_ratio_fit(mut self, ratio_fit: RatioFit) -> Self {
        self.ratio_fit = ratio_fit;
        self
    }

    /// Distance in meters; always finite and within `[min, max]`
    pub fn distance(&self, rssi: f64, reference_rssi_at_1m: f64, path_loss_exponent: f64) -> f64 {
        let raw = self.model.raw_distance(
            &self.ratio_fit,
            rssi,
            reference_rssi_at_1m,
            path_loss_exponent,
        );
        self.clamp(raw)
    }

    /// Distance to a directory beacon using its calibration constants
    pub fn distance_to(&self, rssi: f64, beacon: &BeaconDescriptor) -> f64 {
        self.distance(rssi, beacon.reference_rssi_at_1m, beacon.path_loss_exponent)
    }

    fn clamp(&self, raw: f64) -> f64 {
        if raw.is_nan() || raw <= self.min_distance_m {
            self.min_distance_m
        } else if raw >= self.max_distance_m {
            // also catches +inf
            self.max_distance_m
        } else {
            raw
        }
    }
}
