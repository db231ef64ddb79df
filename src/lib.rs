pub use error::RomError;
pub use machine::Machine;
pub use state::{FrameBuffer, State};

pub mod constants;
mod decode;
mod error;
mod machine;
mod opcode;
mod ops;
pub mod state;
