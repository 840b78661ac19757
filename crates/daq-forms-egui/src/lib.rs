//! egui front end for `daq-forms`.
//!
//! Widgets draw the headless form models and write user edits back into
//! them; panels compose those widgets into scan tabs with a Run button. The
//! `daq-forms-gui` binary wires everything to a logging plan consumer.

pub mod app;
pub mod demo;
pub mod panels;
pub mod queue;
pub mod widgets;

pub use app::FormsApp;
