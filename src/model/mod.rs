// Topic model abstraction: what gets configured, and the seam where a
// modeling library accepts it.

pub mod recording;
pub mod settings;
pub mod specs;
pub mod traits;

pub use recording::{ModelState, RecordingBackend, RecordingModel};
pub use settings::{LibraryLogging, ModelSettings, ThetaColumnsNaming, NUM_PROCESSORS};
pub use specs::{RegularizerKind, RegularizerSpec, ScoreKind, ScoreSpec};
pub use traits::{ModelBackend, TopicModel};
