mod controller;
mod outcome;
mod ports;
mod view;

pub use controller::{Action, Controller};
pub use outcome::*;
pub use ports::*;
pub use view::{MemoryView, OUTPUT_HISTORY_LIMIT, ViewState};
