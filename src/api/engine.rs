//! Ingest orchestrator
//!
//! `LocatorEngine` owns the signal table and the proximity voter behind a
//! single mutex, so each scan event is applied atomically: identity
//! resolution, smoothing, staleness sweep, trilateration and voting all
//! happen inside one critical section. Results are copied into a separate
//! read-mostly snapshot that presentation code can poll without contending
//! with ingest, and listeners are notified after both locks are released.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::algorithms::{
    select_candidates, Candidate, DistanceEstimator, EpochResult, ProximityVoter,
    TrilaterationSolver,
};
use crate::api::callback::{CallbackHandle, CallbackRegistry};
use crate::api::types::{BeaconReading, EngineStats, IngestOutcome, PositionUpdate};
use crate::core::PositionEstimate;
use crate::scanner::{NameFilter, ScanError, ScanEvent, ScanSource};
use crate::processing::SignalTable;
use crate::utils::{BeaconDirectory, ConfigError, ConfigurationManager, SystemConfig};

/// State mutated by every scan event
struct IngestState {
    table: SignalTable,
    voter: ProximityVoter,
    stats: EngineStats,
}

/// Snapshot served to readers
#[derive(Default)]
struct Published {
    position: Option<PositionEstimate>,
    closest_beacon: Option<i32>,
    last_epoch: Option<EpochResult>,
    readings: Vec<BeaconReading>,
    stats: EngineStats,
}

/// Notifications gathered under the lock and delivered after it
#[derive(Default)]
struct Pending {
    position: Option<PositionEstimate>,
    epoch: Option<EpochResult>,
}

pub struct LocatorEngine {
    config: SystemConfig,
    directory: BeaconDirectory,
    filter: NameFilter,
    estimator: DistanceEstimator,
    solver: TrilaterationSolver,
    state: Mutex<IngestState>,
    published: RwLock<Published>,
    callbacks: Mutex<CallbackRegistry>,
    clock_origin: Instant,
}

impl LocatorEngine {
    pub fn new(config: SystemConfig, directory: BeaconDirectory) -> Result<Self, ConfigError> {
        config.validate()?;

        let estimator = DistanceEstimator::new(
            config.distance_model,
            config.min_distance_m,
            config.max_distance_m,
        )
        .with_ratio_fit(config.ratio_fit);
        let state = IngestState {
            table: SignalTable::new(
                directory.len(),
                config.smoothing_window,
                config.stale_timeout_ms,
            ),
            voter: ProximityVoter::new(config.epoch_ms),
            stats: EngineStats::default(),
        };

        let engine = Self {
            filter: NameFilter::new(config.name_filters.iter().cloned()),
            solver: TrilaterationSolver::new(config.degenerate_epsilon),
            estimator,
            state: Mutex::new(state),
            published: RwLock::new(Published::default()),
            callbacks: Mutex::new(CallbackRegistry::new()),
            clock_origin: Instant::now(),
            config,
            directory,
        };
        {
            let state = engine.state.lock();
            engine.published.write().readings = engine.readings(&state.table);
        }
        Ok(engine)
    }

    pub fn from_manager(manager: ConfigurationManager) -> Result<Self, ConfigError> {
        let (config, directory) = manager.into_parts();
        Self::new(config, directory)
    }

    /// Milliseconds since the engine was created; the clock live scan
    /// adapters and the epoch timer should stamp with
    pub fn now_ms(&self) -> u64 {
        self.clock_origin.elapsed().as_millis() as u64
    }

    /// Feed one scan event through the pipeline.
    ///
    /// Never fails: unknown devices, sparse data and degenerate geometry
    /// are reported in the outcome and leave published values untouched.
    pub fn ingest(&self, event: &ScanEvent) -> IngestOutcome {
        let mut pending = Pending::default();
        let outcome = self.ingest_locked(event, &mut pending);
        self.notify(pending);
        outcome
    }

    fn ingest_locked(&self, event: &ScanEvent, pending: &mut Pending) -> IngestOutcome {
        let mut state = self.state.lock();
        state.stats.events_seen += 1;

        if !self.filter.admits(event.device_name.as_deref()) {
            debug!(device = %event.device_id, "name filter rejected device");
            state.stats.filtered += 1;
            self.published.write().stats = state.stats;
            return IngestOutcome::Filtered;
        }

        let Some(index) = self.directory.resolve(&event.device_id) else {
            debug!(device = %event.device_id, "ignoring unknown device");
            state.stats.unknown_device += 1;
            self.published.write().stats = state.stats;
            return IngestOutcome::UnknownDevice;
        };

        let now = event.timestamp_ms;
        let smoothed_rssi = state
            .table
            .update(index, f64::from(event.rssi_dbm), now)
            .unwrap_or(f64::from(event.rssi_dbm));
        state.stats.accepted += 1;

        let demoted = state.table.sweep_stale(now);
        state.stats.stale_demotions += demoted.len() as u64;

        let position = self.try_position(&mut state, now);
        if let PositionUpdate::Published(estimate) = position {
            pending.position = Some(estimate);
        }

        let epoch = self.advance_voter(&mut state, now);
        if let Some(strongest) = state.table.strongest() {
            state.voter.vote(strongest, now);
        }
        pending.epoch = epoch;

        self.publish(&state, pending);

        IngestOutcome::Accepted {
            beacon: index,
            smoothed_rssi,
            position,
            epoch,
        }
    }

    /// Timer-driven step: age out silent beacons and close an elapsed epoch
    /// even when no scan events are arriving
    pub fn tick(&self, now_ms: u64) -> Option<EpochResult> {
        let mut pending = Pending::default();
        {
            let mut state = self.state.lock();
            let demoted = state.table.sweep_stale(now_ms);
            state.stats.stale_demotions += demoted.len() as u64;
            pending.epoch = self.advance_voter(&mut state, now_ms);
            self.publish(&state, &pending);
        }
        let epoch = pending.epoch;
        self.notify(pending);
        epoch
    }

    /// Drain a scan source until it has nothing pending or stops.
    ///
    /// Returns the number of events ingested. Malformed input is skipped.
    pub fn run(&self, source: &mut dyn ScanSource) -> usize {
        let mut ingested = 0;
        loop {
            match source.next_event() {
                Ok(Some(event)) => {
                    self.ingest(&event);
                    ingested += 1;
                }
                Ok(None) | Err(ScanError::Stopped) => break,
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "skipping scan event");
                }
                Err(e) => {
                    warn!(error = %e, "scan source failed");
                    break;
                }
            }
        }
        ingested
    }

    fn try_position(&self, state: &mut IngestState, now: u64) -> PositionUpdate {
        let fresh = state.table.fresh_indices();
        if fresh.len() < self.config.min_fresh_beacons {
            state.stats.insufficient_beacons += 1;
            return PositionUpdate::InsufficientBeacons { fresh: fresh.len() };
        }

        let candidates: Vec<Candidate> = fresh
            .into_iter()
            .filter_map(|index| {
                let beacon = self.directory.get(index)?;
                let rssi = state.table.slot(index)?.rssi();
                Some(Candidate {
                    index,
                    distance: self.estimator.distance_to(rssi, beacon),
                    position: beacon.position,
                })
            })
            .collect();

        let available = candidates.len();
        let Some(picked) = select_candidates(candidates) else {
            state.stats.insufficient_beacons += 1;
            return PositionUpdate::InsufficientBeacons { fresh: available };
        };

        match self.solver.solve(&picked.map(|c| c.circle())) {
            Ok(point) => {
                state.stats.positions_published += 1;
                PositionUpdate::Published(PositionEstimate {
                    x: point.x,
                    y: point.y,
                    computed_at_ms: now,
                    beacons: picked.map(|c| c.index),
                })
            }
            Err(e) => {
                state.stats.indeterminate_solves += 1;
                warn!(
                    beacons = ?picked.map(|c| c.index),
                    error = %e,
                    "keeping previous position"
                );
                PositionUpdate::Indeterminate
            }
        }
    }

    fn advance_voter(&self, state: &mut IngestState, now: u64) -> Option<EpochResult> {
        let result = state.voter.close_epoch(now)?;
        state.stats.epochs_closed += 1;
        Some(result)
    }

    fn publish(&self, state: &IngestState, pending: &Pending) {
        let readings = self.readings(&state.table);
        let mut published = self.published.write();
        if let Some(estimate) = pending.position {
            info!(x = estimate.x, y = estimate.y, beacons = ?estimate.beacons, "position updated");
            published.position = Some(estimate);
        }
        if let Some(epoch) = pending.epoch {
            info!(closest = epoch.closest, votes = epoch.votes, "closest beacon updated");
            published.closest_beacon = Some(epoch.closest);
            published.last_epoch = Some(epoch);
        }
        published.readings = readings;
        published.stats = state.stats;
    }

    fn readings(&self, table: &SignalTable) -> Vec<BeaconReading> {
        table
            .snapshot()
            .into_iter()
            .filter_map(|slot| {
                let beacon = self.directory.get(slot.index)?;
                Some(BeaconReading {
                    index: slot.index,
                    id: beacon.id.clone(),
                    smoothed_rssi: slot.rssi,
                    distance_m: slot
                        .fresh
                        .then(|| self.estimator.distance_to(slot.rssi, beacon)),
                    fresh: slot.fresh,
                    last_seen_ms: slot.last_seen_ms,
                })
            })
            .collect()
    }

    fn notify(&self, pending: Pending) {
        if pending.position.is_none() && pending.epoch.is_none() {
            return;
        }
        let (position_listeners, proximity_listeners) = {
            let callbacks = self.callbacks.lock();
            (callbacks.position_listeners(), callbacks.proximity_listeners())
        };
        if let Some(estimate) = pending.position {
            for listener in &position_listeners {
                listener(&estimate);
            }
        }
        if let Some(epoch) = pending.epoch {
            for listener in &proximity_listeners {
                listener(&epoch);
            }
        }
    }

    pub fn current_position(&self) -> Option<PositionEstimate> {
        self.published.read().position
    }

    /// Last epoch winner; `Some(NO_DATA)` after an epoch without votes
    pub fn current_closest_beacon(&self) -> Option<i32> {
        self.published.read().closest_beacon
    }

    pub fn last_epoch(&self) -> Option<EpochResult> {
        self.published.read().last_epoch
    }

    pub fn beacon_readings(&self) -> Vec<BeaconReading> {
        self.published.read().readings.clone()
    }

    pub fn stats(&self) -> EngineStats {
        self.published.read().stats
    }

    pub fn directory(&self) -> &BeaconDirectory {
        &self.directory
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Listeners run on the ingesting thread after locks are released
    pub fn register_position_callback<F>(&self, callback: F) -> CallbackHandle
    where
        F: Fn(&PositionEstimate) + Send + Sync + 'static,
    {
        self.callbacks.lock().register_position(Arc::new(callback))
    }

    pub fn register_proximity_callback<F>(&self, callback: F) -> CallbackHandle
    where
        F: Fn(&EpochResult) + Send + Sync + 'static,
    {
        self.callbacks.lock().register_proximity(Arc::new(callback))
    }

    pub fn unregister_callback(&self, handle: CallbackHandle) -> bool {
        self.callbacks.lock().unregister(handle)
    }

    /// Run `tick` on a background thread every `period`, stamped with `now_ms`.
    ///
    /// Ticks and scan events share one timeline, so only use the timer with
    /// sources that stamp `timestamp_ms` from this engine's `now_ms`. Events
    /// on any other clock are either all aged out or never close an epoch;
    /// drive `tick` by hand for those.
    pub fn spawn_epoch_timer(self: &Arc<Self>, period: Duration) -> EpochTimer {
        let stop = Arc::new(AtomicBool::new(false));
        let engine = Arc::clone(self);
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Acquire) {
                thread::sleep(period);
                engine.tick(engine.now_ms());
            }
        });
        EpochTimer {
            stop,
            handle: Some(handle),
        }
    }
}

/// Handle to a running epoch timer; stops and joins the thread on drop
pub struct EpochTimer {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl EpochTimer {
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("epoch timer thread panicked");
            }
        }
    }
}

impl Drop for EpochTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NO_DATA;
    use crate::utils::BeaconRow;
    use approx::assert_relative_eq;
    use std::sync::atomic::AtomicUsize;

    const A: &str = "DC:0D:30:10:4E:F2";
    const B: &str = "DC:0D:30:10:4F:57";
    const C: &str = "DC:0D:30:10:4F:3D";
    const D: &str = "DD:60:03:00:02:C0";

    fn row(index: usize, id: &str, x: f64, y: f64) -> BeaconRow {
        BeaconRow {
            index,
            id: id.to_string(),
            x,
            y,
            reference_rssi_at_1m: -59.0,
            path_loss_exponent: 2.0,
        }
    }

    fn engine_with(rows: Vec<BeaconRow>, config: SystemConfig) -> LocatorEngine {
        LocatorEngine::new(config, BeaconDirectory::from_rows(rows).unwrap()).unwrap()
    }

    fn triangle_engine() -> LocatorEngine {
        engine_with(
            vec![row(0, A, 0.0, 0.0), row(1, B, 0.0, 10.0), row(2, C, 10.0, 0.0)],
            SystemConfig::default(),
        )
    }

    fn beacon(id: &str, rssi: i16, t: u64) -> ScanEvent {
        ScanEvent::new(id, rssi, t).with_name("FSC-Beacon")
    }

    /// Integer RSSI the log-distance model maps to `distance` at -59 dBm / n=2
    fn rssi_for(distance: f64) -> i16 {
        (-59.0 - 20.0 * distance.log10()).round() as i16
    }

    #[test]
    fn test_three_beacons_publish_position_near_center() {
        let engine = triangle_engine();
        // (5, 5) is 7.07 m from each corner of this layout
        let rssi = rssi_for(50f64.sqrt());
        for round in 0..3u64 {
            for id in [A, B, C] {
                engine.ingest(&beacon(id, rssi, round * 100));
            }
        }

        let position = engine.current_position().expect("position published");
        assert!((position.x - 5.0).abs() < 0.5);
        assert!((position.y - 5.0).abs() < 0.5);
        assert_eq!(position.computed_at_ms, 200);
    }

    #[test]
    fn test_two_beacons_never_publish_position() {
        let engine = triangle_engine();
        for t in (0..5000).step_by(50) {
            let outcome = engine.ingest(&beacon(if t % 100 == 0 { A } else { B }, -65, t));
            assert!(outcome.published_position().is_none());
        }
        assert_eq!(engine.current_position(), None);
        let outcome = engine.ingest(&beacon(A, -65, 5000));
        assert!(matches!(
            outcome,
            IngestOutcome::Accepted {
                position: PositionUpdate::InsufficientBeacons { fresh: 2 },
                ..
            }
        ));
        assert_eq!(engine.stats().positions_published, 0);
        assert!(engine.stats().insufficient_beacons > 0);
    }

    #[test]
    fn test_epoch_vote_resists_late_switch() {
        let engine = triangle_engine();
        let winners = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&winners);
        engine.register_proximity_callback(move |epoch| sink.lock().push(epoch.closest));

        // A strongest for 900 ms
        for t in (0..900).step_by(50) {
            engine.ingest(&beacon(A, -50, t));
        }
        // then B stronger for 200 ms, crossing the 1000 ms boundary
        for t in (900..1100).step_by(50) {
            engine.ingest(&beacon(B, -40, t));
        }

        assert_eq!(winners.lock().first().copied(), Some(0));
        assert_eq!(engine.last_epoch().unwrap().epoch_started_ms, 0);
        assert_eq!(engine.current_closest_beacon(), Some(0));
    }

    #[test]
    fn test_unknown_and_unnamed_devices_are_discarded() {
        let engine = triangle_engine();
        assert_eq!(
            engine.ingest(&beacon("AA:BB:CC:DD:EE:FF", -40, 0)),
            IngestOutcome::UnknownDevice
        );
        assert_eq!(
            engine.ingest(&ScanEvent::new(A, -40, 0).with_name("Headphones")),
            IngestOutcome::Filtered
        );
        assert_eq!(engine.ingest(&ScanEvent::new(A, -40, 0)), IngestOutcome::Filtered);

        let stats = engine.stats();
        assert_eq!(stats.events_seen, 3);
        assert_eq!(stats.unknown_device, 1);
        assert_eq!(stats.filtered, 2);
        assert_eq!(stats.accepted, 0);
        assert!(engine.beacon_readings().iter().all(|r| !r.fresh));
    }

    #[test]
    fn test_collinear_beacons_keep_previous_estimate() {
        let engine = engine_with(
            vec![
                row(0, A, 0.0, 0.0),
                row(1, B, 0.0, 10.0),
                row(2, C, 10.0, 0.0),
                row(3, D, 20.0, 0.0),
            ],
            SystemConfig::default(),
        );
        let rssi = rssi_for(50f64.sqrt());
        for id in [A, B, C] {
            engine.ingest(&beacon(id, rssi, 0));
        }
        for id in [A, C, D] {
            engine.ingest(&beacon(id, rssi, 2000));
        }
        let before = engine.current_position().unwrap();
        assert_eq!(before.computed_at_ms, 2000);

        // B goes stale, leaving A, C and D, which lie on the x axis
        for id in [A, C, D] {
            engine.ingest(&beacon(id, rssi, 4000));
        }

        assert!(!engine.beacon_readings()[1].fresh);
        assert!(engine.stats().indeterminate_solves > 0);
        assert_eq!(engine.current_position(), Some(before));
    }

    #[test]
    fn test_closest_three_of_four_are_used() {
        let engine = engine_with(
            vec![
                row(0, A, 0.0, 0.0),
                row(1, B, 0.0, 10.0),
                row(2, C, 10.0, 0.0),
                row(3, D, 100.0, 100.0),
            ],
            SystemConfig::default(),
        );
        let near = rssi_for(50f64.sqrt());
        let far = rssi_for(95f64.hypot(95.0));
        for t in [0, 100] {
            engine.ingest(&beacon(D, far, t));
            for id in [A, B, C] {
                engine.ingest(&beacon(id, near, t));
            }
        }

        let position = engine.current_position().unwrap();
        assert_eq!(position.beacons.iter().filter(|&&i| i == 3).count(), 0);
        assert_relative_eq!(position.x, 5.0, epsilon = 1e-6);
        assert_relative_eq!(position.y, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_silent_beacons_go_stale_on_tick() {
        let engine = triangle_engine();
        for id in [A, B, C] {
            engine.ingest(&beacon(id, -70, 0));
        }
        assert!(engine.current_position().is_some());

        engine.tick(3001);
        let readings = engine.beacon_readings();
        assert!(readings.iter().all(|r| !r.fresh && r.distance_m.is_none()));
        assert_eq!(engine.stats().stale_demotions, 3);
        // the estimate is retained, not cleared
        assert!(engine.current_position().is_some());
    }

    #[test]
    fn test_tick_reports_no_data_for_quiet_epoch() {
        let engine = triangle_engine();
        engine.ingest(&beacon(A, -60, 0));
        assert_eq!(engine.tick(1000).map(|e| e.closest), Some(0));
        assert_eq!(engine.tick(2000).map(|e| e.closest), Some(NO_DATA));
        assert_eq!(engine.current_closest_beacon(), Some(NO_DATA));
    }

    #[test]
    fn test_position_callback_fires_once_per_fix() {
        let engine = triangle_engine();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let handle = engine.register_position_callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for id in [A, B, C] {
            engine.ingest(&beacon(id, -70, 0));
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(engine.unregister_callback(handle));
        engine.ingest(&beacon(A, -70, 10));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_readings_expose_smoothed_rssi_and_distance() {
        let engine = triangle_engine();
        engine.ingest(&beacon(B, -79, 0));
        engine.ingest(&beacon(B, -79, 10));

        let reading = &engine.beacon_readings()[1];
        assert_eq!(reading.id, B);
        assert_relative_eq!(reading.smoothed_rssi, -79.0);
        assert_relative_eq!(reading.distance_m.unwrap(), 10.0, epsilon = 1e-9);
        assert_eq!(reading.last_seen_ms, Some(10));
    }

    #[test]
    fn test_concurrent_ingest_loses_no_updates() {
        let engine = Arc::new(triangle_engine());
        let workers: Vec<_> = [A, B, C, "unknown"]
            .into_iter()
            .map(|id| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    for t in 0..250u64 {
                        engine.ingest(&beacon(id, -65, t));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let stats = engine.stats();
        assert_eq!(stats.events_seen, 1000);
        assert_eq!(stats.accepted, 750);
        assert_eq!(stats.unknown_device, 250);
    }

    #[test]
    fn test_run_drains_source() {
        let engine = triangle_engine();
        let mut source = crate::scanner::MockScanner::from_events(vec![
            beacon(A, -60, 0),
            beacon(B, -60, 10),
        ]);
        assert_eq!(engine.run(&mut source), 2);
        assert_eq!(engine.stats().accepted, 2);
    }

    #[test]
    fn test_epoch_timer_closes_epochs_and_ages_out_beacons() {
        let config = SystemConfig {
            epoch_ms: 20,
            stale_timeout_ms: 40,
            ..SystemConfig::default()
        };
        let engine = Arc::new(engine_with(
            vec![row(0, A, 0.0, 0.0), row(1, B, 0.0, 10.0), row(2, C, 10.0, 0.0)],
            config,
        ));
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&delivered);
        engine.register_proximity_callback(move |epoch| {
            sink.lock().push((*epoch, thread::current().id()));
        });

        engine.ingest(&beacon(A, -60, engine.now_ms()));
        let timer = engine.spawn_epoch_timer(Duration::from_millis(5));
        for _ in 0..200 {
            if delivered.lock().len() >= 2 && !engine.beacon_readings()[0].fresh {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        timer.stop();

        let delivered = delivered.lock();
        let (first, origin) = delivered.first().copied().expect("timer closed an epoch");
        assert_eq!(first.closest, 0);
        assert_eq!(first.votes, 1);
        assert_ne!(origin, thread::current().id());
        assert!(delivered.iter().skip(1).all(|(epoch, _)| epoch.closest == NO_DATA));
        assert!(!engine.beacon_readings()[0].fresh);
        assert_eq!(engine.stats().stale_demotions, 1);
    }

    #[test]
    fn test_late_event_keeps_beacon_fresh() {
        let engine = triangle_engine();
        engine.ingest(&beacon(A, -60, 5000));
        // delivered late from another scan callback
        engine.ingest(&beacon(A, -62, 100));
        engine.ingest(&beacon(B, -60, 5000));

        let reading = &engine.beacon_readings()[0];
        assert!(reading.fresh);
        assert_eq!(reading.last_seen_ms, Some(5000));
        assert_eq!(engine.stats().stale_demotions, 0);
    }

    #[test]
    fn test_epoch_timer_stops_cleanly() {
        let engine = Arc::new(triangle_engine());
        let timer = engine.spawn_epoch_timer(Duration::from_millis(5));
        thread::sleep(Duration::from_millis(20));
        timer.stop();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SystemConfig {
            smoothing_window: 0,
            ..SystemConfig::default()
        };
        let directory = BeaconDirectory::from_rows(vec![row(0, A, 0.0, 0.0)]).unwrap();
        assert!(LocatorEngine::new(config, directory).is_err());
    }
}
