use super::normalize::DecodeError;
use super::params::RequestParams;
use super::response::Payload;
use crate::domain::{ActionKind, ValidationError};

/// Wire mapping of one remote action.
///
/// `encode` adds the action-specific parameters; `action`, `pub_id`,
/// `source` and `sig` are handled by the client. `decode` receives a payload
/// that already passed the error checks.
pub trait Action {
    const KIND: ActionKind;

    type Response;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError>;

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError>;
}
