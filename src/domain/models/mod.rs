mod action;
mod capture;
mod event;
mod exchange;
mod playback;
mod session;
mod status;
mod turn;

pub use action::*;
pub use capture::*;
pub use event::*;
pub use exchange::*;
pub use playback::*;
pub use session::*;
pub use status::*;
pub use turn::*;
