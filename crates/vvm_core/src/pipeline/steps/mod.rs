//! Assembly pipeline step implementations.

mod captions;
mod mux;
mod probe;

pub use captions::CaptionsStep;
pub use mux::MuxStep;
pub use probe::ProbeStep;
