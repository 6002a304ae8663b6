pub mod error;
pub mod observation;
pub mod station;

pub use error::ObservationError;
pub use observation::{Field, Observation, ProductCode, FIELD_COUNT};
pub use station::Station;
