//! Call/deploy dispatcher.
//!
//! A nested invocation moves through `requested -> code resolved -> child derived -> executed`
//! and ends either committed or discarded:
//!
//! 1. A call resolves the code of its target and fails with "code is empty" if there is none. A
//!    deploy derives its target address on the caller's meter and fails with "contract is
//!    already deployed" if the address holds code. Neither failure derives a child.
//! 2. A child [`HostEnv`] is derived for the target, carrying the attached value.
//! 3. The [`Executor`] runs against the child with a fresh [`GasMeter`] bounded by the
//!    caller-supplied limit. Faults and panics are caught here.
//! 4. The child is committed into its parent on success and dropped otherwise.
//! 5. The outcome is recorded in the caller's [`ActionRecorder`] and returned with the gas used.

use core::{any::Any, panic::AssertUnwindSafe};
use std::panic;

use alloy_primitives::{Address, Bytes, U256};
use tracing::{debug, error, warn};

use crate::{
    pack_arguments, Action, ActionRecorder, ActionResult, CallStatus, DispatchError, EntryPoint,
    Executor, GasMeter, HostApi, HostConfig, HostEnv, HostError, Invocation,
};

/// The result of a call or deploy.
///
/// A failed top-level outcome may leave effects in the root environment, such as the code
/// registered by [`Dispatcher::deploy`]. The root must be dropped rather than committed then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    /// The invoked contract.
    pub contract: Address,
    /// The gas used by the invocation. The whole limit if it ran out of gas.
    pub gas_used: u64,
    /// The encoded, bounded [`ActionResult`] of the invocation.
    pub action_result: Bytes,
    /// The output data, or the failure.
    pub result: Result<Option<Bytes>, DispatchError>,
}

impl CallOutcome {
    fn new(
        contract: Address,
        action_result: &ActionResult,
        result: Result<Option<Bytes>, DispatchError>,
    ) -> Self {
        Self {
            contract,
            gas_used: action_result.gas_used,
            action_result: action_result.to_bytes(),
            result,
        }
    }

    /// The status of the invocation.
    pub fn status(&self) -> CallStatus {
        match &self.result {
            Ok(_) => CallStatus::Ok,
            Err(err) => err.status(),
        }
    }

    /// Returns `true` if the invocation succeeded.
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Decodes [`action_result`](Self::action_result).
    pub fn decode_action_result(&self) -> Result<ActionResult, prost::DecodeError> {
        ActionResult::from_bytes(&self.action_result)
    }
}

/// Runs top-level invocations.
///
/// Neither entry point commits the root environment: the embedder commits it when the outcome
/// succeeded and discards it otherwise.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<E> {
    executor: E,
    config: HostConfig,
}

impl<E: Executor> Dispatcher<E> {
    /// Creates a dispatcher running code with `executor`.
    pub const fn new(executor: E, config: HostConfig) -> Self {
        Self { executor, config }
    }

    /// The executor.
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// The configuration.
    pub const fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Calls `method` of the code deployed at `contract` with a meter bounded by `gas_limit`.
    ///
    /// `host` must be the root environment of `contract`.
    pub fn execute(
        &self,
        host: &mut dyn HostEnv,
        contract: Address,
        method: &str,
        args: &[Option<Bytes>],
        gas_limit: u64,
    ) -> CallOutcome {
        let args = pack_arguments(args);
        let action = Action::function_call(method, &args, U256::ZERO, gas_limit);
        debug!(contract = %contract, method, gas_limit, "Executing");

        let Some(code) = host.get_code(contract) else {
            return rejected(contract, action, gas_limit, DispatchError::code_is_empty()).0;
        };
        let invocation = Invocation {
            code: &code,
            entry: EntryPoint::Method(method),
            args: &args,
            invocation_context: &[],
            contract,
            gas_limit,
            is_debug: self.config.is_debug,
        };
        let (result, gas_used, recorder) =
            run_frame(host, &self.executor, &self.config, 0, &invocation);
        finished(contract, action, gas_limit, gas_used, recorder, result).0
    }

    /// Registers `code` at `contract` and runs its constructor with a meter bounded by
    /// `gas_limit`.
    ///
    /// `host` must be the root environment of `contract`.
    pub fn deploy(
        &self,
        host: &mut dyn HostEnv,
        contract: Address,
        code: &[u8],
        args: &[Option<Bytes>],
        gas_limit: u64,
    ) -> CallOutcome {
        let args = pack_arguments(args);
        let action = Action::deploy_contract(code, &args, &[], U256::ZERO, gas_limit);
        debug!(contract = %contract, gas_limit, "Deploying");

        if host.contract_code_hash(contract).is_some() {
            return rejected(contract, action, gas_limit, DispatchError::already_deployed()).0;
        }
        host.deploy(code);
        let invocation = Invocation {
            code,
            entry: EntryPoint::Constructor,
            args: &args,
            invocation_context: &[],
            contract,
            gas_limit,
            is_debug: self.config.is_debug,
        };
        let (result, gas_used, recorder) =
            run_frame(host, &self.executor, &self.config, 0, &invocation);
        finished(contract, action, gas_limit, gas_used, recorder, result).0
    }
}

/// Nested call issued by the frame behind `api`.
pub(crate) fn call(
    api: &mut HostApi<'_>,
    contract: Address,
    method: &str,
    args: &[u8],
    amount: U256,
    invocation_context: &[u8],
    gas_limit: u64,
) -> CallOutcome {
    let action = Action::function_call(method, args, amount, gas_limit);
    debug!(contract = %contract, method, gas_limit, depth = api.depth + 1, "Dispatching call");

    let Some(code) = api.host.get_code(contract) else {
        return reject(api, contract, action, gas_limit, DispatchError::code_is_empty());
    };
    let invocation = Invocation {
        code: &code,
        entry: EntryPoint::Method(method),
        args,
        invocation_context,
        contract,
        gas_limit,
        is_debug: api.config.is_debug,
    };
    enter(api, action, amount, &invocation)
}

/// Nested deploy of `code` at the already derived `contract`.
pub(crate) fn deploy(
    api: &mut HostApi<'_>,
    contract: Address,
    code: &[u8],
    args: &[u8],
    nonce: &[u8],
    amount: U256,
    gas_limit: u64,
) -> CallOutcome {
    let action = Action::deploy_contract(code, args, nonce, amount, gas_limit);
    debug!(contract = %contract, gas_limit, depth = api.depth + 1, "Dispatching deploy");

    if api.host.contract_code_hash(contract).is_some() {
        return reject(api, contract, action, gas_limit, DispatchError::already_deployed());
    }
    let invocation = Invocation {
        code,
        entry: EntryPoint::Constructor,
        args,
        invocation_context: &[],
        contract,
        gas_limit,
        is_debug: api.config.is_debug,
    };
    enter(api, action, amount, &invocation)
}

/// Derives the child environment, runs the invocation in it and commits it on success.
fn enter(
    api: &mut HostApi<'_>,
    action: Action,
    amount: U256,
    invocation: &Invocation<'_>,
) -> CallOutcome {
    let contract = invocation.contract;
    let gas_limit = invocation.gas_limit;
    if api.depth >= api.config.max_call_depth {
        return reject(api, contract, action, gas_limit, DispatchError::call_depth_exceeded());
    }

    let is_deploy = invocation.entry == EntryPoint::Constructor;
    let executed = match api.host.create_sub_env(contract, amount, is_deploy) {
        Ok(mut child) => {
            if is_deploy {
                child.deploy(invocation.code);
            }
            let (mut result, gas_used, recorder) =
                run_frame(&mut *child, api.executor, api.config, api.depth + 1, invocation);
            if result.is_ok() {
                if let Err(err) = child.commit() {
                    warn!(contract = %contract, %err, "Failed to commit sub environment");
                    result = Err(err.into());
                }
            }
            Ok((result, gas_used, recorder))
        }
        Err(err) => Err(err),
    };
    let (result, gas_used, recorder) = match executed {
        Ok(executed) => executed,
        Err(err) => {
            log_fault(contract, &err);
            return reject(api, contract, action, gas_limit, err.into());
        }
    };

    let (outcome, action_result) =
        finished(contract, action, gas_limit, gas_used, recorder, result);
    debug!(
        contract = %contract,
        gas_used = outcome.gas_used,
        status = %outcome.status(),
        "Sub invocation returned"
    );
    api.recorder.record(action_result);
    outcome
}

/// Runs one frame and returns its result, the gas it used and its recorder.
///
/// A poisoned meter overrides whatever the executor returned.
fn run_frame(
    host: &mut dyn HostEnv,
    executor: &dyn Executor,
    config: &HostConfig,
    depth: usize,
    invocation: &Invocation<'_>,
) -> (Result<Option<Bytes>, DispatchError>, u64, ActionRecorder) {
    let mut api =
        HostApi::nested(host, executor, config, GasMeter::new(invocation.gas_limit), depth);
    let executed =
        panic::catch_unwind(AssertUnwindSafe(|| executor.execute(&mut api, invocation)));
    let (meter, recorder) = api.into_parts();

    let result = match executed {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(err)) => {
            log_fault(invocation.contract, &err);
            Err(err.into())
        }
        Err(payload) => {
            error!(
                contract = %invocation.contract,
                fault = panic_message(&*payload),
                "Executor panicked"
            );
            Err(DispatchError::InternalFault)
        }
    };
    let result = if meter.is_exhausted() { Err(DispatchError::OutOfGas) } else { result };
    (result, meter.gas_consumed(), recorder)
}

fn log_fault(contract: Address, err: &HostError) {
    if let HostError::Internal(fault) = err {
        error!(contract = %contract, %fault, "Internal fault");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Builds the outcome of a frame and its bounded action result.
fn finished(
    contract: Address,
    action: Action,
    gas_limit: u64,
    gas_used: u64,
    recorder: ActionRecorder,
    result: Result<Option<Bytes>, DispatchError>,
) -> (CallOutcome, ActionResult) {
    let action_result = recorder.finish(action, gas_limit, gas_used, &result);
    (CallOutcome::new(contract, &action_result, result), action_result)
}

/// Outcome of an invocation that failed before any child was derived. No gas is used.
fn rejected(
    contract: Address,
    action: Action,
    gas_limit: u64,
    error: DispatchError,
) -> (CallOutcome, ActionResult) {
    debug!(contract = %contract, %error, "Rejected");
    finished(contract, action, gas_limit, 0, ActionRecorder::new(), Err(error))
}

/// Same as [`rejected`], recording the result in the calling frame.
fn reject(
    api: &mut HostApi<'_>,
    contract: Address,
    action: Action,
    gas_limit: u64,
    error: DispatchError,
) -> CallOutcome {
    let (outcome, action_result) = rejected(contract, action, gas_limit, error);
    api.recorder.record(action_result);
    outcome
}
