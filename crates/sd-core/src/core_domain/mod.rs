mod classifier;
mod error;
mod label;
mod ports;
mod round;
mod scoring;
mod selector;
mod session;
mod timer;
mod types;

pub use classifier::*;
pub use error::*;
pub use label::*;
pub use ports::*;
pub use round::*;
pub use scoring::*;
pub use selector::*;
pub use session::*;
pub use timer::*;
pub use types::*;
