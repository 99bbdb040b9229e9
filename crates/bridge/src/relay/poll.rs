//! Interpretation of `dequeue_request` answers.

use crate::{
    error::{RelayError, Result},
    handlers::validate_call_spec,
    protocol::{PollOutcome, decode_call_spec, status},
    transport::ServerResponse,
};

/// Classify a `dequeue_request` answer.
///
/// An `Err` means the server answered with something that is not a usable call; the
/// relay drops it and polls again.
pub fn classify(response: &ServerResponse) -> Result<PollOutcome> {
    match response.status {
        status::TOO_MANY_REQUESTS => Ok(PollOutcome::RedundantListener),
        status::REQUEST_TIMEOUT => Ok(PollOutcome::Timeout),
        200..=299 => {
            let spec = decode_call_spec(&response.body)?;
            validate_call_spec(&spec)?;
            Ok(PollOutcome::Call(spec))
        }
        other => Err(RelayError::invalid_call(format!(
            "dequeue_request answered {other}: {}",
            response.body.trim()
        ))),
    }
}
