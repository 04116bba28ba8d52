//! Local state owned by the orchestrators.
//!
//! - [`SetStore`]: sets known locally, appended after each successful import
//! - [`InFlight`]: single-flight flag guarding an import or export trigger

mod in_flight;
mod store;

pub use in_flight::{InFlight, InFlightGuard};
pub use store::SetStore;
