//! Filesystem output for derivatives.
pub mod figures;

pub use figures::FigureStore;
