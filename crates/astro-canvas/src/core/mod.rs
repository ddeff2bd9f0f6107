pub mod frame;
pub mod once;
pub mod rng;
