mod app_state;
pub mod events;
mod orchestrator;
mod scroll;
mod session_state;
mod transcript_list;

pub use app_state::*;
pub use orchestrator::*;
pub use scroll::*;
pub use session_state::*;
pub use transcript_list::*;
