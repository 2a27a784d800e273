//! frame-runner: run a prebuilt numerical analysis library on a frame model.
//!
//! The analysis itself lives in a native shared library that exports
//! `void run_demo(const char* path)`. This crate resolves the model file,
//! optionally checks it, loads the library at runtime and calls the entry
//! point with the model's absolute path.
//!
//! # Example
//!
//! ```ignore
//! use frame_runner::{Config, Runner};
//!
//! // build/libnumerical_analysis_library.so, <exe dir>/models/car.frame
//! let runner = Runner::from_config(Config::default())?;
//! let run = runner.demo("car.frame")?;
//! println!("{} -> {}", run.entry_point, run.model_path.display());
//! ```
//!
//! # Layout
//!
//! The defaults mirror the demo tree:
//!
//! ```text
//! <working dir>/build/libnumerical_analysis_library.so
//! <base dir>/models/car.frame
//! ```
//!
//! Both are configurable through [`Config`], see `frame-runner.example.yaml`.

pub mod config;
pub mod error;
pub mod frame;
pub mod native;
pub mod paths;
pub mod runner;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, RunnerError};
pub use frame::Frame;
pub use native::{ComputationModule, EntrySignature, ModuleLoader, NativeLoader, NativeModule};
pub use runner::{demo, DemoRun, Runner};
pub use validation::ValidationMode;
