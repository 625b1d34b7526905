//! Ports (trait boundaries) between the learning core and its drivers.
//!
//! Learners are driven by the training pipeline through [`Learner`]; data
//! collection hooks into training through [`Observer`]. Both are owned by the
//! domain and implemented by the algorithms and observers respectively.

pub mod learner;
pub mod observer;

pub use learner::Learner;
pub use observer::{NoopObserver, Observer};
