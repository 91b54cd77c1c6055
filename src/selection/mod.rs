// Host and file selection
pub mod controller;
pub mod model;

pub use controller::{Decision, SelectionController, StepResult};
pub use model::{FileEntry, Host, SelectionSet, Stage};
