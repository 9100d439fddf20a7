use core::fmt;

use alloy_primitives::{Address, Bytes, B256, U256};

use crate::{
    constants::messages, dispatch, unpack_arguments, Action, ActionRecorder, ActionResult,
    CallOutcome, DispatchError, Executor, GasMeter, HostConfig, HostEnv, HostError, HostResult,
    Metered,
};

/// The boundary surface a running frame sees.
///
/// A `HostApi` pairs the frame's [`HostEnv`] with the frame's own [`GasMeter`] and
/// [`ActionRecorder`]. Every operation fails fast once the meter is poisoned and reports the gas
/// it consumed.
pub struct HostApi<'a> {
    pub(crate) host: &'a mut dyn HostEnv,
    pub(crate) executor: &'a dyn Executor,
    pub(crate) config: &'a HostConfig,
    pub(crate) meter: GasMeter,
    pub(crate) recorder: ActionRecorder,
    pub(crate) depth: usize,
}

impl fmt::Debug for HostApi<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostApi")
            .field("executor", &self.executor)
            .field("meter", &self.meter)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

impl<'a> HostApi<'a> {
    /// Creates the surface of a top-level frame.
    pub fn new(
        host: &'a mut dyn HostEnv,
        executor: &'a dyn Executor,
        config: &'a HostConfig,
        meter: GasMeter,
    ) -> Self {
        Self::nested(host, executor, config, meter, 0)
    }

    pub(crate) fn nested(
        host: &'a mut dyn HostEnv,
        executor: &'a dyn Executor,
        config: &'a HostConfig,
        meter: GasMeter,
        depth: usize,
    ) -> Self {
        Self { host, executor, config, meter, recorder: ActionRecorder::new(), depth }
    }

    /// The nesting depth of the frame. Top-level frames are at depth 0.
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The configuration of the boundary.
    pub const fn config(&self) -> &HostConfig {
        self.config
    }

    /// The frame's meter.
    pub const fn meter(&self) -> &GasMeter {
        &self.meter
    }

    /// The sub-results recorded by the frame so far.
    pub fn sub_results(&self) -> &[ActionResult] {
        self.recorder.sub_results()
    }

    pub(crate) fn into_parts(self) -> (GasMeter, ActionRecorder) {
        (self.meter, self.recorder)
    }

    fn metered<T>(
        &mut self,
        op: impl FnOnce(&mut dyn HostEnv, &mut GasMeter) -> HostResult<T>,
    ) -> HostResult<Metered<T>> {
        self.meter.check()?;
        let before = self.meter.gas_consumed();
        let value = op(&mut *self.host, &mut self.meter)?;
        Ok(Metered { value, gas_used: self.meter.gas_consumed().saturating_sub(before) })
    }

    /// Records a host operation as a sub-action. Nothing is recorded when the frame ran out of
    /// gas, since the whole frame fails.
    fn record<T>(&mut self, action: Action, result: &HostResult<Metered<T>>) {
        let (success, error, gas_used) = match result {
            Ok(metered) => (true, String::new(), metered.gas_used),
            Err(HostError::OutOfGas) => return,
            Err(err) => (false, DispatchError::from(err.clone()).to_string(), 0),
        };
        self.recorder.record(ActionResult {
            input_action: Some(action),
            success,
            error,
            gas_used,
            ..Default::default()
        });
    }

    /// Charges `gas` to the frame.
    pub fn consume_gas(&mut self, gas: u64) -> HostResult<()> {
        self.meter.consume(gas)?;
        Ok(())
    }

    /// Overwrites the gas limit of the frame's meter.
    pub fn set_remaining_gas(&mut self, gas_limit: u64) {
        self.meter.set_remaining_gas(gas_limit);
    }

    /// The gas consumed by the frame so far.
    pub const fn gas_consumed(&self) -> u64 {
        self.meter.gas_consumed()
    }

    /// See [`HostEnv::set_storage`].
    pub fn set_storage(&mut self, key: &[u8], value: &[u8]) -> HostResult<Metered<()>> {
        self.metered(|host, meter| host.set_storage(meter, key, value))
    }

    /// See [`HostEnv::get_storage`].
    pub fn get_storage(&mut self, key: &[u8]) -> HostResult<Metered<Option<Bytes>>> {
        self.metered(|host, meter| host.get_storage(meter, key))
    }

    /// See [`HostEnv::remove_storage`].
    pub fn remove_storage(&mut self, key: &[u8]) -> HostResult<Metered<()>> {
        self.metered(|host, meter| host.remove_storage(meter, key))
    }

    /// See [`HostEnv::block_number`].
    pub fn block_number(&mut self) -> HostResult<Metered<u64>> {
        self.metered(|host, meter| host.block_number(meter))
    }

    /// See [`HostEnv::block_timestamp`].
    pub fn block_timestamp(&mut self) -> HostResult<Metered<i64>> {
        self.metered(|host, meter| host.block_timestamp(meter))
    }

    /// See [`HostEnv::block_seed`].
    pub fn block_seed(&mut self) -> HostResult<Metered<Bytes>> {
        self.metered(|host, meter| host.block_seed(meter))
    }

    /// See [`HostEnv::epoch`].
    pub fn epoch(&mut self) -> HostResult<Metered<u16>> {
        self.metered(|host, meter| host.epoch(meter))
    }

    /// See [`HostEnv::min_fee_per_gas`].
    pub fn min_fee_per_gas(&mut self) -> HostResult<Metered<U256>> {
        self.metered(|host, meter| host.min_fee_per_gas(meter))
    }

    /// See [`HostEnv::network_size`].
    pub fn network_size(&mut self) -> HostResult<Metered<u64>> {
        self.metered(|host, meter| host.network_size(meter))
    }

    /// See [`HostEnv::balance`].
    pub fn balance(&mut self, address: Address) -> HostResult<Metered<U256>> {
        self.metered(|host, meter| host.balance(meter, address))
    }

    /// Sends `amount` to `to`, recording a transfer sub-action.
    pub fn send(&mut self, to: Address, amount: U256) -> HostResult<Metered<()>> {
        let result = self.metered(|host, meter| host.send(meter, to, amount));
        self.record(Action::transfer(to, amount), &result);
        result
    }

    /// Debits `amount` from the current contract.
    pub fn deduct_balance(&mut self, amount: U256) -> HostResult<Metered<()>> {
        self.metered(|host, meter| host.sub_balance(meter, amount))
    }

    /// See [`HostEnv::add_balance`].
    pub fn add_balance(&mut self, address: Address, amount: U256) -> HostResult<Metered<()>> {
        self.metered(|host, meter| host.add_balance(meter, address, amount))
    }

    /// See [`HostEnv::identity_state`].
    pub fn identity_state(&mut self, address: Address) -> HostResult<Metered<u8>> {
        self.metered(|host, meter| host.identity_state(meter, address))
    }

    /// Reads the identity of `address`, recording a read-identity sub-action.
    pub fn identity(&mut self, address: Address) -> HostResult<Metered<Option<Bytes>>> {
        let result = self.metered(|host, meter| host.identity(meter, address));
        self.record(Action::read_identity(address), &result);
        result
    }

    /// See [`HostEnv::caller`].
    pub fn caller(&mut self) -> HostResult<Metered<Address>> {
        self.metered(|host, meter| host.caller(meter))
    }

    /// See [`HostEnv::original_caller`].
    pub fn original_caller(&mut self) -> HostResult<Metered<Address>> {
        self.metered(|host, meter| host.original_caller(meter))
    }

    /// See [`HostEnv::contract_address`].
    pub fn contract_address(&mut self) -> HostResult<Metered<Address>> {
        self.metered(|host, meter| host.contract_address(meter))
    }

    /// See [`HostEnv::contract_code`].
    pub fn contract_code(&mut self, address: Address) -> HostResult<Metered<Option<Bytes>>> {
        self.metered(|host, meter| host.contract_code(meter, address))
    }

    /// See [`HostEnv::own_code`].
    pub fn own_code(&mut self) -> HostResult<Metered<Option<Bytes>>> {
        self.metered(|host, meter| host.own_code(meter))
    }

    /// See [`HostEnv::code_hash`].
    pub fn code_hash(&mut self) -> HostResult<Metered<Option<B256>>> {
        self.metered(|host, meter| host.code_hash(meter))
    }

    /// See [`HostEnv::contract_addr`].
    pub fn contract_addr(
        &mut self,
        code: &[u8],
        args: &[u8],
        nonce: &[u8],
    ) -> HostResult<Metered<Address>> {
        self.metered(|host, meter| host.contract_addr(meter, code, args, nonce))
    }

    /// See [`HostEnv::contract_addr_by_hash`].
    pub fn contract_addr_by_hash(
        &mut self,
        code_hash: B256,
        args: &[u8],
        nonce: &[u8],
    ) -> HostResult<Metered<Address>> {
        self.metered(|host, meter| host.contract_addr_by_hash(meter, code_hash, args, nonce))
    }

    /// Emits an event whose arguments are packed with the argument codec.
    pub fn event(&mut self, name: &str, packed_args: &[u8]) -> HostResult<Metered<()>> {
        let args = unpack_arguments(packed_args);
        self.metered(|host, meter| host.event(meter, name, &args))
    }

    /// Reads `key` from the storage of `address`, recording a read-contract-data sub-action.
    pub fn read_contract_data(
        &mut self,
        address: Address,
        key: &[u8],
    ) -> HostResult<Metered<Option<Bytes>>> {
        let result = self.metered(|host, meter| host.read_contract_data(meter, address, key));
        self.record(Action::read_contract_data(address, key), &result);
        result
    }

    /// See [`HostEnv::pay_amount`].
    pub fn pay_amount(&mut self) -> HostResult<Metered<U256>> {
        self.metered(|host, meter| host.pay_amount(meter))
    }

    /// See [`HostEnv::keccak256`].
    pub fn keccak256(&mut self, data: &[u8]) -> HostResult<Metered<B256>> {
        self.metered(|host, meter| host.keccak256(meter, data))
    }

    /// See [`HostEnv::block_header`].
    pub fn block_header(&mut self, height: u64) -> HostResult<Metered<Option<Bytes>>> {
        self.metered(|host, meter| host.block_header(meter, height))
    }

    /// See [`HostEnv::global_state`].
    pub fn global_state(&mut self) -> HostResult<Metered<Bytes>> {
        self.metered(|host, meter| host.global_state(meter))
    }

    /// Whether the host runs in debug mode.
    pub fn is_debug(&self) -> bool {
        self.host.is_debug()
    }

    /// Commits the frame's environment and drops its transient state.
    ///
    /// Only the top-level frame may commit. A nested frame's effects reach its parent when the
    /// dispatcher commits it after a successful return.
    pub fn commit(&mut self) -> HostResult<()> {
        if self.depth > 0 {
            return Err(HostError::failed(messages::NESTED_COMMIT));
        }
        self.host.commit()?;
        self.host.clear();
        Ok(())
    }

    /// Calls `method` on `contract` with a fresh meter bounded by `gas_limit`.
    ///
    /// The returned outcome carries the gas used by the callee, which the caller deducts from
    /// its own budget. A failing callee is an `Ok` outcome with a failed result; only running
    /// out of gas in this frame is an error.
    pub fn call(
        &mut self,
        contract: Address,
        method: &str,
        args: &[u8],
        amount: U256,
        invocation_context: &[u8],
        gas_limit: u64,
    ) -> HostResult<CallOutcome> {
        self.meter.check()?;
        Ok(dispatch::call(self, contract, method, args, amount, invocation_context, gas_limit))
    }

    /// Deploys `code` with constructor `args` and a fresh meter bounded by `gas_limit`.
    ///
    /// The contract address is derived and charged on this frame's meter, so running out of gas
    /// there is an error of this frame.
    pub fn deploy(
        &mut self,
        code: &[u8],
        args: &[u8],
        nonce: &[u8],
        amount: U256,
        gas_limit: u64,
    ) -> HostResult<CallOutcome> {
        let contract = self.contract_addr(code, args, nonce)?.into_value();
        Ok(dispatch::deploy(self, contract, code, args, nonce, amount, gas_limit))
    }
}
