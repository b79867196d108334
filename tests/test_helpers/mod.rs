//! Shared clock support for integration tests.

mod clock;

pub use clock::ManualClock;
