pub mod attempt;
pub mod dataset;
pub mod upload;
