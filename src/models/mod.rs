pub mod raw;
pub mod task;
pub mod dependency;
pub mod conflict;
pub mod schedule;

pub use raw::*;
pub use task::*;
pub use dependency::*;
pub use conflict::*;
pub use schedule::*;
