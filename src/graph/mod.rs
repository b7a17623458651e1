pub mod builder;
pub mod assemble;
pub mod timeline;
pub mod cycle;
pub mod conflicts;
pub mod critical_path;

pub use assemble::ProjectGraph;
