use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use nalgebra::Vector3;

use rotorlink::{
    DroneChannels, ImageFrame, LinkConfig, MemoryTopic, Pose, Publication, ShutdownToken,
    Signal, SimControl, Subscription, VelocityCommand, IMAGE_CHANNEL, LAND_CHANNEL,
    POSE_CHANNEL, TAKEOFF_CHANNEL, VELOCITY_CHANNEL,
};

/// Vehicle tick period. Pose and image frames are emitted once per
/// tick.
pub const VEHICLE_TICK: Duration = Duration::from_millis(5);

/// Altitude gained or lost per vehicle tick [m].
pub const CLIMB_RATE: f64 = 0.05;

/// Altitude the vehicle settles at after takeoff [m].
pub const HOVER_ALTITUDE: f64 = 1.5;

/// Link configuration tightened for test runs: fast polling and a
/// short per-attempt timeout so cancelled waits resolve quickly.
pub fn fast_config() -> LinkConfig {
    LinkConfig {
        poll_rate_hz: 200.0,
        wait_timeout_s: 0.05,
        settle_delay_s: 0.05,
        ..Default::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Paused,
    Unpaused,
}

/// `SimControl` double that records every pause transition.
#[derive(Clone, Default)]
pub struct RecordingSim {
    events: Arc<Mutex<Vec<SimEvent>>>,
    paused: Arc<AtomicBool>,
}

impl RecordingSim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<SimEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl SimControl for RecordingSim {
    fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
        self.events.lock().unwrap().push(SimEvent::Paused);
    }

    fn unpause(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.events.lock().unwrap().push(SimEvent::Unpaused);
    }
}

/// The five in-memory topics a test vehicle hangs off.
pub struct TestBus {
    pub image: MemoryTopic<ImageFrame>,
    pub pose: MemoryTopic<Pose>,
    pub velocity: MemoryTopic<VelocityCommand>,
    pub takeoff: MemoryTopic<Signal>,
    pub land: MemoryTopic<Signal>,
}

impl Default for TestBus {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBus {
    pub fn new() -> Self {
        Self {
            image: MemoryTopic::new(IMAGE_CHANNEL),
            pose: MemoryTopic::new(POSE_CHANNEL),
            velocity: MemoryTopic::new(VELOCITY_CHANNEL),
            takeoff: MemoryTopic::new(TAKEOFF_CHANNEL),
            land: MemoryTopic::new(LAND_CHANNEL),
        }
    }

    /// Channel handles for the facade side of the bus.
    pub fn channels(&self) -> DroneChannels {
        DroneChannels {
            image: Box::new(self.image.subscribe()),
            pose: Box::new(self.pose.subscribe()),
            velocity: Box::new(self.velocity.publisher()),
            takeoff: Box::new(self.takeoff.publisher()),
            land: Box::new(self.land.publisher()),
        }
    }
}

/// Scripted stand-in for the simulator-side drone plugin.
///
/// Subscribes to all three command topics, streams pose and image
/// frames every tick, and ramps its altitude toward a target that
/// takeoff and land signals move. The frozen variant acknowledges
/// signals but never leaves the ground, for exercising cancellation.
pub struct SimulatedVehicle {
    stop: ShutdownToken,
    handle: Option<JoinHandle<()>>,
    takeoff_signals: Arc<AtomicUsize>,
    land_signals: Arc<AtomicUsize>,
    velocity_commands: Arc<Mutex<Vec<VelocityCommand>>>,
}

impl SimulatedVehicle {
    pub fn spawn(bus: &TestBus) -> Self {
        Self::spawn_inner(bus, true)
    }

    pub fn spawn_frozen(bus: &TestBus) -> Self {
        Self::spawn_inner(bus, false)
    }

    fn spawn_inner(bus: &TestBus, responsive: bool) -> Self {
        let takeoff_rx = bus.takeoff.subscribe();
        let land_rx = bus.land.subscribe();
        let velocity_rx = bus.velocity.subscribe();
        let pose_tx = bus.pose.publisher();
        let image_tx = bus.image.publisher();

        let stop = ShutdownToken::new();
        let thread_stop = stop.clone();

        let takeoff_signals = Arc::new(AtomicUsize::new(0));
        let land_signals = Arc::new(AtomicUsize::new(0));
        let velocity_commands = Arc::new(Mutex::new(Vec::new()));

        let takeoff_count = Arc::clone(&takeoff_signals);
        let land_count = Arc::clone(&land_signals);
        let commands = Arc::clone(&velocity_commands);

        let handle = thread::spawn(move || {
            let mut altitude: f64 = 0.0;
            let mut target: f64 = 0.0;

            while !thread_stop.is_triggered() {
                while takeoff_rx.wait_for_message(Duration::ZERO).is_ok() {
                    takeoff_count.fetch_add(1, Ordering::SeqCst);
                    if responsive {
                        target = HOVER_ALTITUDE;
                    }
                }
                while land_rx.wait_for_message(Duration::ZERO).is_ok() {
                    land_count.fetch_add(1, Ordering::SeqCst);
                    if responsive {
                        target = 0.0;
                    }
                }
                while let Ok(command) = velocity_rx.wait_for_message(Duration::ZERO) {
                    commands.lock().unwrap().push(command);
                }

                if (target - altitude).abs() <= CLIMB_RATE {
                    altitude = target;
                } else if target > altitude {
                    altitude += CLIMB_RATE;
                } else {
                    altitude -= CLIMB_RATE;
                }

                let _ = pose_tx.publish(Pose::at_position(Vector3::new(0.0, 0.0, altitude)));
                let _ = image_tx.publish(ImageFrame {
                    width: 4,
                    height: 4,
                    data: vec![0u8; 64],
                });

                thread::sleep(VEHICLE_TICK);
            }
        });

        Self {
            stop,
            handle: Some(handle),
            takeoff_signals,
            land_signals,
            velocity_commands,
        }
    }

    pub fn takeoff_signal_count(&self) -> usize {
        self.takeoff_signals.load(Ordering::SeqCst)
    }

    pub fn land_signal_count(&self) -> usize {
        self.land_signals.load(Ordering::SeqCst)
    }

    pub fn velocity_commands(&self) -> Vec<VelocityCommand> {
        self.velocity_commands.lock().unwrap().clone()
    }
}

impl Drop for SimulatedVehicle {
    fn drop(&mut self) {
        self.stop.trigger();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
