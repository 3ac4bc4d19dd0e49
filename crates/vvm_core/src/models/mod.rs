//! Data models shared across the assembly pipeline.

mod inputs;
mod script;

pub use inputs::AssemblyInputs;
pub use script::Script;
