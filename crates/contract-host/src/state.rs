//! In-memory host state.
//!
//! [`MemoryDb`] is a flat backing store. [`MemoryHostEnv`] implements [`HostEnv`] on top of any
//! [`StateLayer`]: it buffers its writes in a [`ChangeSet`] overlaid on its parent and folds
//! them into the parent on [`commit`](HostEnv::commit). Nested environments are
//! `MemoryHostEnv`s whose parent is another `MemoryHostEnv`, so a chain of frames is a chain of
//! overlays ending at the database.

use core::mem;

use alloy_primitives::{keccak256, map::HashMap, Address, Bytes, B256, U256};
use tracing::trace;

use crate::{
    constants::{limits::MAX_STORAGE_KEY_LEN, messages},
    derive_contract_address, GasMeter, GasSchedule, HostConfig, HostEnv, HostError, HostResult,
};

/// A readable state that can absorb the changes of a child environment.
pub trait StateLayer: core::fmt::Debug {
    /// The storage value of `key` in `contract`.
    fn read_storage(&self, contract: Address, key: &[u8]) -> Option<Bytes>;

    /// The balance of `address`.
    fn read_balance(&self, address: Address) -> U256;

    /// The code at `address`.
    fn read_code(&self, address: Address) -> Option<Bytes>;

    /// The identity of `address`.
    fn read_identity(&self, address: Address) -> Option<Identity>;

    /// The chain context.
    fn chain(&self) -> &ChainEnv;

    /// Applies `changes` on top of this layer.
    fn absorb(&mut self, changes: ChangeSet);
}

/// Block and network context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainEnv {
    /// The current block number.
    pub block_number: u64,
    /// The current block timestamp.
    pub block_timestamp: i64,
    /// The seed of the current block.
    pub block_seed: Bytes,
    /// The current epoch.
    pub epoch: u16,
    /// The minimal fee per gas.
    pub min_fee_per_gas: U256,
    /// The number of validated identities.
    pub network_size: u64,
    /// Encoded block headers by height.
    pub headers: HashMap<u64, Bytes>,
    /// The encoded global state.
    pub global_state: Bytes,
}

/// The identity record of an address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// The identity state byte.
    pub state: u8,
    /// The encoded identity.
    pub data: Bytes,
}

/// An event emitted by a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The emitting contract.
    pub contract: Address,
    /// The event name.
    pub name: String,
    /// The event arguments.
    pub args: Vec<Option<Bytes>>,
}

/// Who runs a frame, on behalf of whom, with which attached value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallContext {
    /// The contract whose code runs.
    pub contract: Address,
    /// The address that invoked the frame.
    pub caller: Address,
    /// The address that started the top-level invocation.
    pub original_caller: Address,
    /// The value attached to the frame.
    pub pay_amount: U256,
}

impl CallContext {
    /// The context of a top-level invocation of `contract` by `caller`.
    pub fn new(contract: Address, caller: Address) -> Self {
        Self { contract, caller, original_caller: caller, pay_amount: U256::ZERO }
    }

    /// Sets the attached value.
    pub fn with_pay_amount(mut self, pay_amount: U256) -> Self {
        self.pay_amount = pay_amount;
        self
    }
}

/// Writes buffered by an environment. A `None` storage value is a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Storage writes keyed by contract and key.
    pub storage: HashMap<(Address, Bytes), Option<Bytes>>,
    /// Updated balances.
    pub balances: HashMap<Address, U256>,
    /// Registered code.
    pub code: HashMap<Address, Bytes>,
    /// Emitted events, in order.
    pub events: Vec<Event>,
}

impl ChangeSet {
    /// Returns `true` if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
            && self.balances.is_empty()
            && self.code.is_empty()
            && self.events.is_empty()
    }

    /// Applies `other` on top of `self`.
    pub fn merge(&mut self, other: Self) {
        self.storage.extend(other.storage);
        self.balances.extend(other.balances);
        self.code.extend(other.code);
        self.events.extend(other.events);
    }
}

/// A flat in-memory store of contract state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDb {
    storage: HashMap<(Address, Bytes), Bytes>,
    balances: HashMap<Address, U256>,
    code: HashMap<Address, Bytes>,
    identities: HashMap<Address, Identity>,
    chain: ChainEnv,
    events: Vec<Event>,
}

impl MemoryDb {
    /// Sets the chain context.
    pub fn set_chain(&mut self, chain: ChainEnv) {
        self.chain = chain;
    }

    /// Sets the chain context.
    pub fn with_chain(mut self, chain: ChainEnv) -> Self {
        self.set_chain(chain);
        self
    }

    /// Sets the balance of an account.
    pub fn set_account_balance(&mut self, address: Address, balance: U256) {
        self.balances.insert(address, balance);
    }

    /// Sets the balance of an account.
    pub fn account_balance(mut self, address: Address, balance: U256) -> Self {
        self.set_account_balance(address, balance);
        self
    }

    /// Sets the code of an account.
    pub fn set_account_code(&mut self, address: Address, code: Bytes) {
        self.code.insert(address, code);
    }

    /// Sets the code of an account.
    pub fn account_code(mut self, address: Address, code: Bytes) -> Self {
        self.set_account_code(address, code);
        self
    }

    /// Sets a storage value of an account.
    pub fn set_account_storage(&mut self, address: Address, key: Bytes, value: Bytes) {
        self.storage.insert((address, key), value);
    }

    /// Sets a storage value of an account.
    pub fn account_storage(mut self, address: Address, key: Bytes, value: Bytes) -> Self {
        self.set_account_storage(address, key, value);
        self
    }

    /// Sets the identity of an address.
    pub fn set_identity(&mut self, address: Address, identity: Identity) {
        self.identities.insert(address, identity);
    }

    /// Sets the identity of an address.
    pub fn with_identity(mut self, address: Address, identity: Identity) -> Self {
        self.set_identity(address, identity);
        self
    }

    /// The events emitted by committed frames, in order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl StateLayer for MemoryDb {
    fn read_storage(&self, contract: Address, key: &[u8]) -> Option<Bytes> {
        self.storage.get(&(contract, Bytes::copy_from_slice(key))).cloned()
    }

    fn read_balance(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    fn read_code(&self, address: Address) -> Option<Bytes> {
        self.code.get(&address).cloned()
    }

    fn read_identity(&self, address: Address) -> Option<Identity> {
        self.identities.get(&address).cloned()
    }

    fn chain(&self) -> &ChainEnv {
        &self.chain
    }

    fn absorb(&mut self, changes: ChangeSet) {
        for (key, value) in changes.storage {
            match value {
                Some(value) => self.storage.insert(key, value),
                None => self.storage.remove(&key),
            };
        }
        self.balances.extend(changes.balances);
        self.code.extend(changes.code);
        self.events.extend(changes.events);
    }
}

/// A [`HostEnv`] buffering its effects over a parent [`StateLayer`].
#[derive(Debug)]
pub struct MemoryHostEnv<'p> {
    parent: &'p mut dyn StateLayer,
    context: CallContext,
    gas: GasSchedule,
    is_debug: bool,
    changes: ChangeSet,
}

impl<'p> MemoryHostEnv<'p> {
    /// Creates the root environment of a top-level invocation over `parent`.
    pub fn new(parent: &'p mut dyn StateLayer, context: CallContext, config: &HostConfig) -> Self {
        Self {
            parent,
            context,
            gas: config.gas.clone(),
            is_debug: config.is_debug,
            changes: ChangeSet::default(),
        }
    }

    /// The context of the frame.
    pub const fn context(&self) -> &CallContext {
        &self.context
    }

    /// The effects buffered since the last commit.
    pub const fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> HostResult<()> {
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    fn debit(&mut self, address: Address, amount: U256) -> HostResult<()> {
        let balance = self.read_balance(address);
        let Some(balance) = balance.checked_sub(amount) else {
            return Err(HostError::failed(messages::INSUFFICIENT_BALANCE));
        };
        self.changes.balances.insert(address, balance);
        Ok(())
    }

    fn credit(&mut self, address: Address, amount: U256) -> HostResult<()> {
        let balance = self
            .read_balance(address)
            .checked_add(amount)
            .ok_or_else(|| HostError::internal(format!("balance overflow for {address}")))?;
        self.changes.balances.insert(address, balance);
        Ok(())
    }

    fn storage_key(&self, contract: Address, key: &[u8]) -> HostResult<(Address, Bytes)> {
        if key.len() > MAX_STORAGE_KEY_LEN {
            return Err(HostError::internal(format!(
                "storage key of {} bytes exceeds {MAX_STORAGE_KEY_LEN}",
                key.len()
            )));
        }
        Ok((contract, Bytes::copy_from_slice(key)))
    }

    fn read_key(
        &self,
        meter: &mut GasMeter,
        contract: Address,
        key: &[u8],
    ) -> HostResult<Option<Bytes>> {
        let (contract, key) = self.storage_key(contract, key)?;
        let value = self.read_storage(contract, &key).filter(|value| !value.is_empty());
        let len = value.as_ref().map_or(0, |bytes| bytes.len());
        meter.consume(self.gas.storage_read(len))?;
        Ok(value)
    }

    fn context_read<T>(&self, meter: &mut GasMeter, value: T) -> HostResult<T> {
        meter.consume(self.gas.context_read)?;
        Ok(value)
    }
}

impl StateLayer for MemoryHostEnv<'_> {
    fn read_storage(&self, contract: Address, key: &[u8]) -> Option<Bytes> {
        match self.changes.storage.get(&(contract, Bytes::copy_from_slice(key))) {
            Some(value) => value.clone(),
            None => self.parent.read_storage(contract, key),
        }
    }

    fn read_balance(&self, address: Address) -> U256 {
        match self.changes.balances.get(&address) {
            Some(balance) => *balance,
            None => self.parent.read_balance(address),
        }
    }

    fn read_code(&self, address: Address) -> Option<Bytes> {
        match self.changes.code.get(&address) {
            Some(code) => Some(code.clone()),
            None => self.parent.read_code(address),
        }
    }

    fn read_identity(&self, address: Address) -> Option<Identity> {
        self.parent.read_identity(address)
    }

    fn chain(&self) -> &ChainEnv {
        self.parent.chain()
    }

    fn absorb(&mut self, changes: ChangeSet) {
        self.changes.merge(changes);
    }
}

impl HostEnv for MemoryHostEnv<'_> {
    fn set_storage(&mut self, meter: &mut GasMeter, key: &[u8], value: &[u8]) -> HostResult<()> {
        let key = self.storage_key(self.context.contract, key)?;
        meter.consume(self.gas.storage_write(key.1.len(), value.len()))?;
        self.changes.storage.insert(key, Some(Bytes::copy_from_slice(value)));
        Ok(())
    }

    fn get_storage(&self, meter: &mut GasMeter, key: &[u8]) -> HostResult<Option<Bytes>> {
        self.read_key(meter, self.context.contract, key)
    }

    fn remove_storage(&mut self, meter: &mut GasMeter, key: &[u8]) -> HostResult<()> {
        let key = self.storage_key(self.context.contract, key)?;
        meter.consume(self.gas.storage_remove)?;
        self.changes.storage.insert(key, None);
        Ok(())
    }

    fn block_number(&self, meter: &mut GasMeter) -> HostResult<u64> {
        self.context_read(meter, self.chain().block_number)
    }

    fn block_timestamp(&self, meter: &mut GasMeter) -> HostResult<i64> {
        self.context_read(meter, self.chain().block_timestamp)
    }

    fn block_seed(&self, meter: &mut GasMeter) -> HostResult<Bytes> {
        self.context_read(meter, self.chain().block_seed.clone())
    }

    fn epoch(&self, meter: &mut GasMeter) -> HostResult<u16> {
        self.context_read(meter, self.chain().epoch)
    }

    fn min_fee_per_gas(&self, meter: &mut GasMeter) -> HostResult<U256> {
        self.context_read(meter, self.chain().min_fee_per_gas)
    }

    fn network_size(&self, meter: &mut GasMeter) -> HostResult<u64> {
        self.context_read(meter, self.chain().network_size)
    }

    fn balance(&self, meter: &mut GasMeter, address: Address) -> HostResult<U256> {
        meter.consume(self.gas.balance_read)?;
        Ok(self.read_balance(address))
    }

    fn send(&mut self, meter: &mut GasMeter, to: Address, amount: U256) -> HostResult<()> {
        meter.consume(self.gas.transfer)?;
        self.transfer(self.context.contract, to, amount)
    }

    fn sub_balance(&mut self, meter: &mut GasMeter, amount: U256) -> HostResult<()> {
        meter.consume(self.gas.transfer)?;
        self.debit(self.context.contract, amount)
    }

    fn add_balance(
        &mut self,
        meter: &mut GasMeter,
        address: Address,
        amount: U256,
    ) -> HostResult<()> {
        meter.consume(self.gas.transfer)?;
        self.credit(address, amount)
    }

    fn identity_state(&self, meter: &mut GasMeter, address: Address) -> HostResult<u8> {
        meter.consume(self.gas.identity_read)?;
        Ok(self.read_identity(address).map_or(0, |identity| identity.state))
    }

    fn identity(&self, meter: &mut GasMeter, address: Address) -> HostResult<Option<Bytes>> {
        meter.consume(self.gas.identity_read)?;
        Ok(self.read_identity(address).map(|identity| identity.data))
    }

    fn caller(&self, meter: &mut GasMeter) -> HostResult<Address> {
        self.context_read(meter, self.context.caller)
    }

    fn original_caller(&self, meter: &mut GasMeter) -> HostResult<Address> {
        self.context_read(meter, self.context.original_caller)
    }

    fn contract_address(&self, meter: &mut GasMeter) -> HostResult<Address> {
        self.context_read(meter, self.context.contract)
    }

    fn contract_code(&self, meter: &mut GasMeter, address: Address) -> HostResult<Option<Bytes>> {
        let code = self.read_code(address);
        meter.consume(self.gas.code_read(code.as_ref().map_or(0, |bytes| bytes.len())))?;
        Ok(code)
    }

    fn own_code(&self, meter: &mut GasMeter) -> HostResult<Option<Bytes>> {
        self.contract_code(meter, self.context.contract)
    }

    fn code_hash(&self, meter: &mut GasMeter) -> HostResult<Option<B256>> {
        meter.consume(self.gas.code_read)?;
        Ok(self.contract_code_hash(self.context.contract))
    }

    fn contract_addr(
        &self,
        meter: &mut GasMeter,
        code: &[u8],
        args: &[u8],
        nonce: &[u8],
    ) -> HostResult<Address> {
        meter.consume(self.gas.keccak(code.len()))?;
        self.contract_addr_by_hash(meter, keccak256(code), args, nonce)
    }

    fn contract_addr_by_hash(
        &self,
        meter: &mut GasMeter,
        code_hash: B256,
        args: &[u8],
        nonce: &[u8],
    ) -> HostResult<Address> {
        meter.consume(self.gas.address_derivation)?;
        Ok(derive_contract_address(code_hash, args, nonce))
    }

    fn event(
        &mut self,
        meter: &mut GasMeter,
        name: &str,
        args: &[Option<Bytes>],
    ) -> HostResult<()> {
        let payload = name.len() + args.iter().flatten().map(|arg| arg.len()).sum::<usize>();
        meter.consume(self.gas.event(payload))?;
        self.changes.events.push(Event {
            contract: self.context.contract,
            name: name.to_owned(),
            args: args.to_vec(),
        });
        Ok(())
    }

    fn read_contract_data(
        &self,
        meter: &mut GasMeter,
        address: Address,
        key: &[u8],
    ) -> HostResult<Option<Bytes>> {
        self.read_key(meter, address, key)
    }

    fn pay_amount(&self, meter: &mut GasMeter) -> HostResult<U256> {
        self.context_read(meter, self.context.pay_amount)
    }

    fn keccak256(&self, meter: &mut GasMeter, data: &[u8]) -> HostResult<B256> {
        meter.consume(self.gas.keccak(data.len()))?;
        Ok(keccak256(data))
    }

    fn block_header(&self, meter: &mut GasMeter, height: u64) -> HostResult<Option<Bytes>> {
        self.context_read(meter, self.chain().headers.get(&height).cloned())
    }

    fn global_state(&self, meter: &mut GasMeter) -> HostResult<Bytes> {
        self.context_read(meter, self.chain().global_state.clone())
    }

    fn create_sub_env(
        &mut self,
        contract: Address,
        pay_amount: U256,
        is_deploy: bool,
    ) -> HostResult<Box<dyn HostEnv + '_>> {
        if is_deploy && self.read_code(contract).is_some() {
            return Err(HostError::failed(messages::CONTRACT_ALREADY_DEPLOYED));
        }

        let context = CallContext {
            contract,
            caller: self.context.contract,
            original_caller: self.context.original_caller,
            pay_amount,
        };
        let gas = self.gas.clone();
        let is_debug = self.is_debug;
        trace!(
            contract = %contract,
            caller = %context.caller,
            is_deploy,
            "Deriving sub environment"
        );

        let mut child =
            MemoryHostEnv { parent: self, context, gas, is_debug, changes: ChangeSet::default() };
        if !pay_amount.is_zero() {
            child.transfer(context.caller, contract, pay_amount)?;
        }
        Ok(Box::new(child))
    }

    fn get_code(&self, address: Address) -> Option<Bytes> {
        self.read_code(address).filter(|code| !code.is_empty())
    }

    fn contract_code_hash(&self, address: Address) -> Option<B256> {
        self.read_code(address).map(keccak256)
    }

    fn deploy(&mut self, code: &[u8]) {
        self.changes.code.insert(self.context.contract, Bytes::copy_from_slice(code));
    }

    fn commit(&mut self) -> HostResult<()> {
        let changes = mem::take(&mut self.changes);
        if !changes.is_empty() {
            trace!(contract = %self.context.contract, "Committing changes to parent");
            self.parent.absorb(changes);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.changes = ChangeSet::default();
    }

    fn is_debug(&self) -> bool {
        self.is_debug
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    const ALICE: Address = address!("00000000000000000000000000000000000a11ce");
    const CONTRACT: Address = address!("00000000000000000000000000000000c0ffee01");
    const OTHER: Address = address!("00000000000000000000000000000000c0ffee02");

    fn root<'a>(db: &'a mut MemoryDb) -> MemoryHostEnv<'a> {
        MemoryHostEnv::new(db, CallContext::new(CONTRACT, ALICE), &HostConfig::default())
    }

    #[test]
    fn test_storage_costs_and_overlay() {
        let mut db = MemoryDb::default();
        let mut env = root(&mut db);
        let mut meter = GasMeter::unlimited();

        env.set_storage(&mut meter, b"key", b"value").unwrap();
        assert_eq!(meter.gas_consumed(), 80);
        assert_eq!(
            env.get_storage(&mut meter, b"key").unwrap(),
            Some(Bytes::from_static(b"value"))
        );
        assert_eq!(meter.gas_consumed(), 130);

        env.remove_storage(&mut meter, b"key").unwrap();
        assert_eq!(env.get_storage(&mut meter, b"key").unwrap(), None);
        assert_eq!(meter.gas_consumed(), 140);

        // nothing reaches the database before commit
        env.set_storage(&mut meter, b"kept", b"1").unwrap();
        env.commit().unwrap();
        drop(env);
        assert_eq!(db.read_storage(CONTRACT, b"kept"), Some(Bytes::from_static(b"1")));
        assert_eq!(db.read_storage(CONTRACT, b"key"), None);
    }

    #[test]
    fn test_long_storage_key_is_an_internal_fault() {
        let mut db = MemoryDb::default();
        let mut env = root(&mut db);
        let mut meter = GasMeter::unlimited();
        let err = env.set_storage(&mut meter, &[7; 33], b"v").unwrap_err();
        assert!(matches!(err, HostError::Internal(_)));
        assert_eq!(meter.gas_consumed(), 0);
    }

    #[test]
    fn test_out_of_gas_leaves_no_effect() {
        let mut db = MemoryDb::default();
        let mut env = root(&mut db);
        let mut meter = GasMeter::new(50);
        assert_eq!(env.set_storage(&mut meter, b"key", b"value"), Err(HostError::OutOfGas));
        assert!(env.changes().is_empty());
    }

    #[test]
    fn test_sub_env_transfers_pay_amount() {
        let mut db = MemoryDb::default().account_balance(CONTRACT, U256::from(100));
        let mut env = root(&mut db);
        let mut meter = GasMeter::unlimited();

        {
            let mut child = env.create_sub_env(OTHER, U256::from(40), false).unwrap();
            assert_eq!(child.pay_amount(&mut meter).unwrap(), U256::from(40));
            assert_eq!(child.caller(&mut meter).unwrap(), CONTRACT);
            assert_eq!(child.original_caller(&mut meter).unwrap(), ALICE);
            assert_eq!(child.balance(&mut meter, OTHER).unwrap(), U256::from(40));
            child.commit().unwrap();
        }
        assert_eq!(env.balance(&mut meter, CONTRACT).unwrap(), U256::from(60));

        {
            // dropped without commit
            let child = env.create_sub_env(OTHER, U256::from(10), false).unwrap();
            drop(child);
        }
        assert_eq!(env.balance(&mut meter, OTHER).unwrap(), U256::from(40));

        let err = env.create_sub_env(OTHER, U256::from(61), false).map(|_| ()).unwrap_err();
        assert_eq!(err, HostError::failed(messages::INSUFFICIENT_BALANCE));
    }

    #[test]
    fn test_deploy_registers_code_in_child() {
        let mut db = MemoryDb::default();
        let mut env = root(&mut db);

        {
            let mut child = env.create_sub_env(OTHER, U256::ZERO, true).unwrap();
            child.deploy(b"code");
            assert_eq!(child.get_code(OTHER), Some(Bytes::from_static(b"code")));
            child.commit().unwrap();
        }
        assert_eq!(env.contract_code_hash(OTHER), Some(keccak256(b"code")));

        let err = env.create_sub_env(OTHER, U256::ZERO, true).map(|_| ()).unwrap_err();
        assert_eq!(err, HostError::failed(messages::CONTRACT_ALREADY_DEPLOYED));
    }

    #[test]
    fn test_events_are_committed_in_order() {
        let mut db = MemoryDb::default();
        let mut env = root(&mut db);
        let mut meter = GasMeter::unlimited();

        env.event(&mut meter, "first", &[Some(Bytes::from_static(b"ab")), None]).unwrap();
        assert_eq!(meter.gas_consumed(), 100 + 10 * 7);
        env.event(&mut meter, "second", &[]).unwrap();
        env.commit().unwrap();
        env.clear();
        drop(env);

        let names: Vec<_> = db.events().iter().map(|event| event.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(db.events()[0].args, vec![Some(Bytes::from_static(b"ab")), None]);
    }

    #[test]
    fn test_chain_and_identity_reads() {
        let mut chain = ChainEnv { block_number: 42, epoch: 3, ..Default::default() };
        chain.headers.insert(41, Bytes::from_static(b"header"));
        let identity = Identity { state: 7, data: Bytes::from_static(b"id") };
        let mut db = MemoryDb::default().with_chain(chain).with_identity(ALICE, identity);
        let env = root(&mut db);
        let mut meter = GasMeter::unlimited();

        assert_eq!(env.block_number(&mut meter).unwrap(), 42);
        assert_eq!(env.epoch(&mut meter).unwrap(), 3);
        assert_eq!(env.block_header(&mut meter, 41).unwrap(), Some(Bytes::from_static(b"header")));
        assert_eq!(env.block_header(&mut meter, 40).unwrap(), None);
        assert_eq!(env.identity_state(&mut meter, ALICE).unwrap(), 7);
        assert_eq!(env.identity_state(&mut meter, OTHER).unwrap(), 0);
        assert_eq!(env.identity(&mut meter, ALICE).unwrap(), Some(Bytes::from_static(b"id")));
    }
}
