mod demo;

pub use demo::{DemoOptions, run_demo};
