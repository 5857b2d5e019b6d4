//! Currency conversion engine and the two-field synchronizer built on it.
mod event;
mod field;
mod format;
mod rates;
mod state;
mod synchronizer;
mod types;

pub use event::*;
pub use field::*;
pub use format::*;
pub use rates::*;
pub use state::*;
pub use synchronizer::*;
pub use types::*;
