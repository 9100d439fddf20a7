use serde::{Deserialize, Serialize};

use crate::{constants::messages, OutOfGas};

/// Result type of host operations and of contract execution.
pub type HostResult<T> = Result<T, HostError>;

/// Error raised by a host operation or by the executor running a frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The frame's gas meter is exhausted. Aborts the frame.
    #[error("out of gas")]
    OutOfGas,
    /// A named failure of business logic, e.g. an insufficient balance.
    #[error("{0}")]
    Failed(String),
    /// An unexpected fault inside the host. The message is logged but never reported to
    /// contracts.
    #[error("internal fault: {0}")]
    Internal(String),
}

impl HostError {
    /// Creates an application error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Creates an internal fault.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns `true` if this is [`HostError::OutOfGas`].
    pub const fn is_out_of_gas(&self) -> bool {
        matches!(self, Self::OutOfGas)
    }
}

impl From<OutOfGas> for HostError {
    fn from(_: OutOfGas) -> Self {
        Self::OutOfGas
    }
}

/// The failure of a call or deploy, as reported across the dispatcher boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The invoked frame ran out of gas. The whole gas limit is reported as used.
    #[error("out of gas")]
    OutOfGas,
    /// An unexpected fault was caught at the boundary.
    #[error("internal fault")]
    InternalFault,
    /// An application error.
    #[error("{0}")]
    Other(String),
}

impl DispatchError {
    /// The status code of this failure.
    pub const fn status(&self) -> CallStatus {
        match self {
            Self::OutOfGas => CallStatus::OutOfGas,
            Self::InternalFault => CallStatus::InternalFault,
            Self::Other(_) => CallStatus::Other,
        }
    }

    pub(crate) fn code_is_empty() -> Self {
        Self::Other(messages::CODE_IS_EMPTY.into())
    }

    pub(crate) fn already_deployed() -> Self {
        Self::Other(messages::CONTRACT_ALREADY_DEPLOYED.into())
    }

    pub(crate) fn call_depth_exceeded() -> Self {
        Self::Other(messages::CALL_DEPTH_EXCEEDED.into())
    }
}

impl From<HostError> for DispatchError {
    fn from(value: HostError) -> Self {
        match value {
            HostError::OutOfGas => Self::OutOfGas,
            HostError::Failed(message) => Self::Other(message),
            HostError::Internal(_) => Self::InternalFault,
        }
    }
}

/// Status of a call or deploy.
#[repr(u8)]
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum CallStatus {
    /// The invocation succeeded and its effects were committed.
    #[default]
    #[display("ok")]
    Ok = 0,
    /// An unexpected fault was caught at the boundary.
    #[display("internal fault")]
    InternalFault = 1,
    /// The invocation ran out of gas.
    #[display("out of gas")]
    OutOfGas = 2,
    /// The invocation failed with an application error.
    #[display("other")]
    Other = 3,
}

impl CallStatus {
    /// Returns `true` if the status is [`CallStatus::Ok`].
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_maps_to_dispatch_error() {
        assert_eq!(DispatchError::from(HostError::OutOfGas), DispatchError::OutOfGas);
        assert_eq!(
            DispatchError::from(HostError::failed("insufficient balance")),
            DispatchError::Other("insufficient balance".into())
        );
        // internal details never cross the boundary
        let fault = DispatchError::from(HostError::internal("db handle closed"));
        assert_eq!(fault, DispatchError::InternalFault);
        assert_eq!(fault.to_string(), "internal fault");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(DispatchError::OutOfGas.status() as u8, 2);
        assert_eq!(DispatchError::InternalFault.status() as u8, 1);
        assert_eq!(DispatchError::code_is_empty().status(), CallStatus::Other);
        assert_eq!(CallStatus::default(), CallStatus::Ok);
        assert_eq!(CallStatus::OutOfGas.to_string(), "out of gas");
    }
}
