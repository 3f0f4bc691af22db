//! Instrumented, paced sorting engine.
//!
//! Six classic algorithms run as cooperative step sequences over a shared
//! [`SequenceModel`]. Every comparison and mutation is counted, pushed to a
//! [`Renderer`], and followed by a [`Pacer`] suspension so the host can
//! present the frame before the next action happens.

pub mod algorithms;
pub mod controller;
pub mod counters;
pub mod pacer;
pub mod renderer;
pub mod sequence;

pub use algorithms::StepContext;
pub use controller::{ControllerConfig, ControllerError, MAX_SIZE, RunController, StartOutcome};
pub use counters::Counters;
pub use pacer::Pacer;
pub use renderer::{NullRenderer, Renderer};
pub use sequence::SequenceModel;
