//! Commands for the turn processing context.

use uuid::Uuid;

/// Command to process one inbound narrative turn.
#[derive(Debug, Clone)]
pub struct ProcessTurn {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Raw inbound turn document.
    pub payload: Vec<u8>,
}
