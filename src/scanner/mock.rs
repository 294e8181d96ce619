//! Scripted scan source for testing and offline replay

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::core::Point;
use crate::scanner::{ScanError, ScanEvent, ScanResult, ScanSource};
use crate::utils::BeaconDirectory;

/// Parameters for synthesizing advertisements around a known position
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub target: Point,
    pub start_ms: u64,
    /// Gap between consecutive advertisement rounds
    pub period_ms: u64,
    pub rounds: usize,
    /// Uniform noise added to every reading, +/- dB
    pub jitter_db: f64,
    pub seed: u64,
    pub device_name: String,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            target: Point::new(0.0, 0.0),
            start_ms: 0,
            period_ms: 100,
            rounds: 20,
            jitter_db: 0.0,
            seed: 7,
            device_name: "Beacon".to_string(),
        }
    }
}

/// Event queue that plays back whatever was loaded into it
pub struct MockScanner {
    queue: VecDeque<ScanEvent>,
    scanning: bool,
    delivered: usize,
}

impl MockScanner {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            scanning: true,
            delivered: 0,
        }
    }

    pub fn from_events(events: impl IntoIterator<Item = ScanEvent>) -> Self {
        let mut scanner = Self::new();
        scanner.queue.extend(events);
        scanner
    }

    /// Load one JSON event per line. Blank lines are ignored; malformed
    /// lines are reported back and skipped.
    pub fn from_jsonl(content: &str) -> (Self, Vec<ScanError>) {
        let mut events = Vec::new();
        let mut errors = Vec::new();

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<ScanEvent>(line) {
                Ok(event) => events.push(event),
                Err(source) => {
                    warn!(line = i + 1, error = %source, "skipping malformed scan event");
                    errors.push(ScanError::Malformed { line: i + 1, source });
                }
            }
        }

        (Self::from_events(events), errors)
    }

    /// Readings each directory beacon would report from `params.target`,
    /// inverted through the log-distance model with the beacon's own
    /// calibration, one round per `period_ms`
    pub fn simulate(directory: &BeaconDirectory, params: &SimulationParams) -> Self {
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut scanner = Self::new();

        for round in 0..params.rounds {
            let timestamp_ms = params.start_ms + round as u64 * params.period_ms;
            for beacon in directory.iter() {
                let distance = params.target.distance_to(&beacon.position).max(0.01);
                let ideal = beacon.reference_rssi_at_1m
                    - 10.0 * beacon.path_loss_exponent * distance.log10();
                let noise = if params.jitter_db > 0.0 {
                    rng.gen_range(-params.jitter_db..=params.jitter_db)
                } else {
                    0.0
                };
                let rssi = (ideal + noise).round().clamp(i16::MIN as f64, 0.0) as i16;
                scanner.push(
                    ScanEvent::new(beacon.id.clone(), rssi, timestamp_ms)
                        .with_name(params.device_name.clone()),
                );
            }
        }
        scanner
    }

    pub fn push(&mut self, event: ScanEvent) {
        self.queue.push_back(event);
    }

    pub fn queued_event_count(&self) -> usize {
        self.queue.len()
    }

    pub fn delivered_event_count(&self) -> usize {
        self.delivered
    }
}

impl Default for MockScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSource for MockScanner {
    fn next_event(&mut self) -> ScanResult<Option<ScanEvent>> {
        if !self.scanning {
            return Err(ScanError::Stopped);
        }
        let event = self.queue.pop_front();
        if event.is_some() {
            self.delivered += 1;
        }
        Ok(event)
    }

    fn is_scanning(&self) -> bool {
        self.scanning
    }

    fn stop(&mut self) {
        self.scanning = false;
    }
}
