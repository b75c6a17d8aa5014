pub mod capture;
mod command_line;
pub mod exchange;
pub mod playback;

pub use command_line::*;
