use core::fmt::Debug;

use alloy_primitives::{Address, Bytes};
use auto_impl::auto_impl;

use crate::{unpack_arguments, Arguments, HostApi, HostResult};

/// The entry point of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EntryPoint<'a> {
    /// A named method.
    #[display("{_0}")]
    Method(&'a str),
    /// The constructor run by a deployment.
    #[display("deploy")]
    Constructor,
}

/// Everything an [`Executor`] needs to run one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// The code to run.
    pub code: &'a [u8],
    /// The entry point.
    pub entry: EntryPoint<'a>,
    /// The packed arguments, passed through untruncated.
    pub args: &'a [u8],
    /// Opaque caller-supplied context. Empty for deployments and top-level invocations.
    pub invocation_context: &'a [u8],
    /// The contract the code runs as.
    pub contract: Address,
    /// The gas limit of the frame's meter.
    pub gas_limit: u64,
    /// Whether the executor runs in debug mode.
    pub is_debug: bool,
}

impl<'a> Invocation<'a> {
    /// Unpacks the arguments.
    pub fn arguments(&self) -> Arguments {
        unpack_arguments(self.args)
    }

    /// The invoked method, or `None` for a constructor.
    pub const fn method(&self) -> Option<&'a str> {
        match self.entry {
            EntryPoint::Method(method) => Some(method),
            EntryPoint::Constructor => None,
        }
    }
}

/// Runs contract code.
///
/// The executor is opaque to the dispatcher: it receives the frame's [`HostApi`] and charges
/// its own execution cost through [`HostApi::consume_gas`]. The gas used by the frame is read
/// from the meter afterwards. Returning [`HostError::OutOfGas`](crate::HostError::OutOfGas),
/// or returning anything once the meter is poisoned, fails the frame with out-of-gas.
#[auto_impl(&, Box, Arc)]
pub trait Executor: Debug {
    /// Runs `invocation` against `api`, returning the output data.
    fn execute(
        &self,
        api: &mut HostApi<'_>,
        invocation: &Invocation<'_>,
    ) -> HostResult<Option<Bytes>>;
}
