pub mod runner;
pub mod scene;
