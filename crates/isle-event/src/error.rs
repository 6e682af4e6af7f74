use thiserror::Error;

/// Construction errors for exchange events.
///
/// These are programming errors, not runtime conditions: detection never
/// produces an invalid participant set, so a failing constructor means the
/// caller built the event by hand and got it wrong.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("exchange requires at least 2 participants, got {got}")]
    TooFewParticipants { got: usize },

    #[error("rotation length mismatch: {participants} participants, {values} values")]
    RotationMismatch { participants: usize, values: usize },
}
