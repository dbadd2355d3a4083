// Postural Sway Core - CoP stability analysis
// Streaming and batch postural-stability features from a four-sensor plate

// Module declarations
pub mod analysis;
pub mod config;
pub mod cop;
pub mod error;
pub mod recording;
pub mod sensor;

// Re-exports for convenience
pub use analysis::features::{names, FeatureMap, WindowMetrics};
pub use analysis::{FeatureFrame, SessionAnalyzer, SessionParameters, StreamingAnalyzer, WindowInfo};
pub use config::{AnalyzerConfig, FeatureConfig, PlateGeometry, WindowConfig};
pub use cop::{CopCalculator, CopPoint, PressureSample};
pub use error::{AnalysisError, ErrorCode};
pub use recording::TrialRecording;
pub use sensor::{drain_into, SensorQueue, SensorReading};
