//! The bed entity and its lifecycle state machine.
//! 床位实体及其生命周期状态机。

pub mod model;
pub mod transition;

pub use model::{Bed, BedId, BedState, occupancy_is_consistent};
pub use transition::Transition;
