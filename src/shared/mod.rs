pub mod errors;
pub mod formatting;
pub mod shutdown;
pub mod time;

pub use errors::*;
pub use formatting::*;
pub use time::*;
