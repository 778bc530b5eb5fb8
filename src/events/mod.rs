//! Round event emission.
//!
//! The round never talks to a renderer or a mixer. It returns
//! [`RoundEvent`]s, and the engine forwards them to whoever subscribed
//! through an [`EventRegistry`].

mod event;
mod registry;

pub use event::{RoundEvent, RoundEvents};
pub use registry::{EventRegistry, ObserverId};
