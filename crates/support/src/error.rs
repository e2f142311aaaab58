#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    Transport(String),
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::Transport(msg) => write!(f, "support message not delivered: {msg}"),
        }
    }
}

impl std::error::Error for SendError {}

/// A submission rejected before anything was sent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubmitError {
    FormClosed,
    SendInFlight,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::FormClosed => write!(f, "support form is not open"),
            SubmitError::SendInFlight => write!(f, "a support message is already being sent"),
        }
    }
}

impl std::error::Error for SubmitError {}
