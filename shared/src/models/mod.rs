//! Domain models for Bloom Climate

mod location;
mod provenance;
mod series;

pub use location::*;
pub use provenance::*;
pub use series::*;
