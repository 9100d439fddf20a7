use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use auto_impl::auto_impl;

use crate::{GasMeter, HostResult};

/// The blockchain-state capabilities available to a running contract.
///
/// One environment exists per frame. Every metered operation attributes its gas to the
/// [`GasMeter`] of the calling frame and fails with [`HostError::OutOfGas`] once that meter is
/// poisoned. A value-less storage entry reads as `None`, never as an error.
///
/// Child environments are derived with [`create_sub_env`](Self::create_sub_env) and borrow
/// their parent mutably for their whole lifetime. Their effects stay invisible to the parent
/// until [`commit`](Self::commit); dropping a child discards them.
///
/// [`HostError::OutOfGas`]: crate::HostError::OutOfGas
#[auto_impl(&mut, Box)]
pub trait HostEnv {
    /// Writes `value` under `key` in the storage of the current contract.
    fn set_storage(&mut self, meter: &mut GasMeter, key: &[u8], value: &[u8]) -> HostResult<()>;

    /// Reads `key` from the storage of the current contract.
    fn get_storage(&self, meter: &mut GasMeter, key: &[u8]) -> HostResult<Option<Bytes>>;

    /// Removes `key` from the storage of the current contract.
    fn remove_storage(&mut self, meter: &mut GasMeter, key: &[u8]) -> HostResult<()>;

    /// The current block number.
    fn block_number(&self, meter: &mut GasMeter) -> HostResult<u64>;

    /// The current block timestamp.
    fn block_timestamp(&self, meter: &mut GasMeter) -> HostResult<i64>;

    /// The seed of the current block.
    fn block_seed(&self, meter: &mut GasMeter) -> HostResult<Bytes>;

    /// The current epoch.
    fn epoch(&self, meter: &mut GasMeter) -> HostResult<u16>;

    /// The minimal fee per gas of the current block.
    fn min_fee_per_gas(&self, meter: &mut GasMeter) -> HostResult<U256>;

    /// The number of validated identities in the network.
    fn network_size(&self, meter: &mut GasMeter) -> HostResult<u64>;

    /// The balance of `address`.
    fn balance(&self, meter: &mut GasMeter, address: Address) -> HostResult<U256>;

    /// Moves `amount` from the current contract to `to`.
    fn send(&mut self, meter: &mut GasMeter, to: Address, amount: U256) -> HostResult<()>;

    /// Debits `amount` from the current contract.
    fn sub_balance(&mut self, meter: &mut GasMeter, amount: U256) -> HostResult<()>;

    /// Credits `amount` to `address`.
    fn add_balance(&mut self, meter: &mut GasMeter, address: Address, amount: U256)
        -> HostResult<()>;

    /// The identity state of `address`, as a state byte.
    fn identity_state(&self, meter: &mut GasMeter, address: Address) -> HostResult<u8>;

    /// The encoded identity of `address`.
    fn identity(&self, meter: &mut GasMeter, address: Address) -> HostResult<Option<Bytes>>;

    /// The address that invoked the current frame.
    fn caller(&self, meter: &mut GasMeter) -> HostResult<Address>;

    /// The address that started the top-level invocation.
    fn original_caller(&self, meter: &mut GasMeter) -> HostResult<Address>;

    /// The address of the current contract.
    fn contract_address(&self, meter: &mut GasMeter) -> HostResult<Address>;

    /// The code deployed at `address`.
    fn contract_code(&self, meter: &mut GasMeter, address: Address) -> HostResult<Option<Bytes>>;

    /// The code of the current contract.
    fn own_code(&self, meter: &mut GasMeter) -> HostResult<Option<Bytes>>;

    /// The code hash of the current contract.
    fn code_hash(&self, meter: &mut GasMeter) -> HostResult<Option<B256>>;

    /// The address a deployment of `code` with `args` and `nonce` lands at.
    fn contract_addr(
        &self,
        meter: &mut GasMeter,
        code: &[u8],
        args: &[u8],
        nonce: &[u8],
    ) -> HostResult<Address>;

    /// Same as [`contract_addr`](Self::contract_addr) for code known by its hash.
    fn contract_addr_by_hash(
        &self,
        meter: &mut GasMeter,
        code_hash: B256,
        args: &[u8],
        nonce: &[u8],
    ) -> HostResult<Address>;

    /// Emits an event of the current contract.
    fn event(&mut self, meter: &mut GasMeter, name: &str, args: &[Option<Bytes>])
        -> HostResult<()>;

    /// Reads `key` from the storage of another contract.
    fn read_contract_data(
        &self,
        meter: &mut GasMeter,
        address: Address,
        key: &[u8],
    ) -> HostResult<Option<Bytes>>;

    /// The value attached to the current frame.
    fn pay_amount(&self, meter: &mut GasMeter) -> HostResult<U256>;

    /// Hashes `data` with keccak256.
    fn keccak256(&self, meter: &mut GasMeter, data: &[u8]) -> HostResult<B256>;

    /// The encoded header of the block at `height`, if known.
    fn block_header(&self, meter: &mut GasMeter, height: u64) -> HostResult<Option<Bytes>>;

    /// The encoded global chain state.
    fn global_state(&self, meter: &mut GasMeter) -> HostResult<Bytes>;

    /// Derives the environment of a nested call or deploy targeting `contract`.
    ///
    /// A non-zero `pay_amount` is moved from the current contract to `contract` inside the
    /// child, so it is undone together with the child's other effects. Deriving never mutates
    /// `self`.
    fn create_sub_env(
        &mut self,
        contract: Address,
        pay_amount: U256,
        is_deploy: bool,
    ) -> HostResult<Box<dyn HostEnv + '_>>;

    /// The code at `address`, without metering. Empty code reads as `None`.
    fn get_code(&self, address: Address) -> Option<Bytes>;

    /// The hash of the code at `address`, without metering. `None` if nothing is deployed there.
    fn contract_code_hash(&self, address: Address) -> Option<B256>;

    /// Registers `code` as the code of the current contract.
    fn deploy(&mut self, code: &[u8]);

    /// Folds the effects of this environment into its parent.
    fn commit(&mut self) -> HostResult<()>;

    /// Drops call-scoped transient state.
    fn clear(&mut self);

    /// Whether execution runs in debug mode.
    fn is_debug(&self) -> bool;
}

/// A value returned by a metered operation together with the gas it cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metered<T> {
    /// The value.
    pub value: T,
    /// The gas consumed by the operation.
    pub gas_used: u64,
}

impl<T> Metered<T> {
    /// Unwraps the value.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Derives the address of a contract deployed with `code_hash`, `args` and `nonce`.
///
/// It is the last 20 bytes of `keccak256(code_hash ++ args ++ nonce)`.
pub fn derive_contract_address(code_hash: B256, args: &[u8], nonce: &[u8]) -> Address {
    let mut preimage = Vec::with_capacity(B256::len_bytes() + args.len() + nonce.len());
    preimage.extend_from_slice(code_hash.as_slice());
    preimage.extend_from_slice(args);
    preimage.extend_from_slice(nonce);
    Address::from_word(keccak256(preimage))
}
