/// Commands the presentation layer sends to the orchestrator.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Starts a new call. Ignored while a call is in progress.
    Start(),
    /// Ends the current capture early instead of waiting for the timeout.
    StopCapture(),
    /// Ends the chat immediately, from any state.
    Reset(),
}
