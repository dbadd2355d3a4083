// Sensor module - readings from the pressure plate and their hand-off
//
// A plate driver delivers either raw corner pressures or an already computed
// CoP position. Both travel through the same SPSC queue so the sensor thread
// never touches the analyzer.
//
// Module organization:
// - mod.rs: SensorReading
// - queue: SensorQueue (rtrb ring buffer) and drain_into

use serde::{Deserialize, Serialize};

use crate::cop::{CopPoint, PressureSample};

pub mod queue;

pub use queue::{drain_into, SensorQueue, SensorQueueChannels, DEFAULT_QUEUE_CAPACITY};

/// One sample from either sensor entry point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorReading {
    /// Raw pressures from the four corner sensors
    Pressure { time: f64, sample: PressureSample },
    /// CoP position computed upstream
    Cop(CopPoint),
}
