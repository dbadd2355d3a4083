// SensorQueue - lock-free hand-off from the sensor thread to the analyzer
//
// Wraps a single rtrb SPSC ring buffer. The sensor thread owns the producer
// and pushes readings as they arrive; the analysis side owns the consumer and
// drains it into a StreamingAnalyzer at its own pace.
//
// Reading flow:
// 1. Sensor thread pushes SensorReading into the producer
// 2. Analysis side calls drain_into with the consumer
// 3. Each reading goes through StreamingAnalyzer::add_reading_framed
// 4. Emitted FeatureFrames are returned in arrival order
//
// A full queue rejects the push; the sensor thread decides whether to drop
// or retry. Readings are never reordered.

use rtrb::{Consumer, Producer};

use super::SensorReading;
use crate::analysis::{FeatureFrame, StreamingAnalyzer};

/// Default capacity: 10 s of readings at 100 Hz
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Split queue ends for the sensor and analysis threads
pub struct SensorQueueChannels {
    /// Producer end, owned by the sensor thread
    pub producer: Producer<SensorReading>,
    /// Consumer end, owned by the analysis thread
    pub consumer: Consumer<SensorReading>,
}

/// Lock-free SPSC queue for sensor readings
///
/// # Thread Safety
/// - Lock-free: No mutex locks in push or pop
/// - Each end is `Send` and can be moved to its own thread
///
/// # Example
/// ```ignore
/// let SensorQueueChannels { mut producer, mut consumer } = SensorQueue::new(256);
///
/// // In sensor thread:
/// producer.push(SensorReading::Cop(point)).ok();
///
/// // In analysis thread:
/// for frame in drain_into(&mut consumer, &mut analyzer) {
///     display(frame.features);
/// }
/// ```
pub struct SensorQueue;

impl SensorQueue {
    /// Create a queue holding up to `capacity` pending readings
    ///
    /// # Panics
    /// Panics if capacity is 0
    #[allow(clippy::new_ret_no_self)]
    pub fn new(capacity: usize) -> SensorQueueChannels {
        assert!(capacity > 0, "capacity must be greater than 0");

        let (producer, consumer) = rtrb::RingBuffer::new(capacity);
        SensorQueueChannels { producer, consumer }
    }
}

/// Feed every pending reading to the analyzer
///
/// # Returns
/// The frames emitted while draining, oldest first
pub fn drain_into(
    consumer: &mut Consumer<SensorReading>,
    analyzer: &mut StreamingAnalyzer,
) -> Vec<FeatureFrame> {
    let mut frames = Vec::new();
    let mut drained = 0usize;

    while let Ok(reading) = consumer.pop() {
        drained += 1;
        if let Some(frame) = analyzer.add_reading_framed(reading) {
            frames.push(frame);
        }
    }

    if drained > 0 {
        log::trace!(
            "[SensorQueue] Drained {} readings, {} frames emitted",
            drained,
            frames.len()
        );
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalyzerConfig, WindowConfig};
    use crate::cop::{CopPoint, PressureSample};
    use std::thread;

    fn small_analyzer() -> StreamingAnalyzer {
        StreamingAnalyzer::new(AnalyzerConfig {
            window: WindowConfig {
                window_size: 10,
                slide_step: 5,
            },
            ..AnalyzerConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Producer<SensorReading>>();
        assert_send::<Consumer<SensorReading>>();
        assert_send::<SensorQueueChannels>();
    }

    #[test]
    fn test_empty_queue_drains_nothing() {
        let mut channels = SensorQueue::new(8);
        let mut analyzer = small_analyzer();
        assert!(drain_into(&mut channels.consumer, &mut analyzer).is_empty());
        assert_eq!(analyzer.window_info().sample_count, 0);
    }

    #[test]
    fn test_full_queue_rejects_push() {
        let mut channels = SensorQueue::new(2);
        let reading = SensorReading::Cop(CopPoint::new(0.0, 1.0, 1.0));
        assert!(channels.producer.push(reading).is_ok());
        assert!(channels.producer.push(reading).is_ok());
        assert!(
            channels.producer.push(reading).is_err(),
            "Third push should fail on a full queue"
        );
    }

    #[test]
    fn test_drain_preserves_order_and_cadence() {
        let mut channels = SensorQueue::new(32);
        let mut analyzer = small_analyzer();

        for i in 0..20 {
            let reading = if i % 2 == 0 {
                SensorReading::Cop(CopPoint::new(i as f64 * 0.01, i as f64, 0.0))
            } else {
                SensorReading::Pressure {
                    time: i as f64 * 0.01,
                    sample: PressureSample::new(1.0, 2.0, 3.0, 4.0),
                }
            };
            channels.producer.push(reading).unwrap();
        }

        let frames = drain_into(&mut channels.consumer, &mut analyzer);
        let counts: Vec<u64> = frames.iter().map(|f| f.sample_count).collect();
        assert_eq!(counts, vec![10, 15, 20]);
        assert!((frames[2].end_time - 0.19).abs() < 1e-12);
    }

    #[test]
    fn test_producer_thread() {
        let SensorQueueChannels {
            mut producer,
            mut consumer,
        } = SensorQueue::new(DEFAULT_QUEUE_CAPACITY);

        let sensor = thread::spawn(move || {
            for i in 0..100 {
                let angle = i as f64 * 0.1;
                let reading =
                    SensorReading::Cop(CopPoint::new(i as f64 * 0.01, angle.cos(), angle.sin()));
                producer.push(reading).expect("queue large enough");
            }
        });
        sensor.join().unwrap();

        let mut analyzer = small_analyzer();
        let frames = drain_into(&mut consumer, &mut analyzer);
        // First fill at 10, then every 5 samples up to 100
        assert_eq!(frames.len(), 19);
        assert_eq!(analyzer.window_info().sample_count, 100);
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than 0")]
    fn test_zero_capacity_panics() {
        SensorQueue::new(0);
    }
}
