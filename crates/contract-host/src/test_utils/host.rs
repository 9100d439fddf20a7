use alloy_primitives::{Address, Bytes, B256, U256};
use delegate::delegate;

use crate::{GasMeter, HostEnv, HostResult};

/// A [`HostEnv`] wrapper counting child derivations and commits of the wrapped environment.
#[derive(Debug, Default, derive_more::Deref, derive_more::DerefMut)]
pub struct CountingHost<H> {
    #[deref]
    #[deref_mut]
    inner: H,
    sub_envs: usize,
    commits: usize,
}

impl<H> CountingHost<H> {
    /// Wraps `inner`.
    pub const fn new(inner: H) -> Self {
        Self { inner, sub_envs: 0, commits: 0 }
    }

    /// The number of child environments derived so far.
    pub const fn sub_envs(&self) -> usize {
        self.sub_envs
    }

    /// The number of commits so far.
    pub const fn commits(&self) -> usize {
        self.commits
    }

    /// Unwraps the environment.
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: HostEnv> HostEnv for CountingHost<H> {
    delegate! {
        to self.inner {
            fn set_storage(&mut self, meter: &mut GasMeter, key: &[u8], value: &[u8]) -> HostResult<()>;
            fn get_storage(&self, meter: &mut GasMeter, key: &[u8]) -> HostResult<Option<Bytes>>;
            fn remove_storage(&mut self, meter: &mut GasMeter, key: &[u8]) -> HostResult<()>;
            fn block_number(&self, meter: &mut GasMeter) -> HostResult<u64>;
            fn block_timestamp(&self, meter: &mut GasMeter) -> HostResult<i64>;
            fn block_seed(&self, meter: &mut GasMeter) -> HostResult<Bytes>;
            fn epoch(&self, meter: &mut GasMeter) -> HostResult<u16>;
            fn min_fee_per_gas(&self, meter: &mut GasMeter) -> HostResult<U256>;
            fn network_size(&self, meter: &mut GasMeter) -> HostResult<u64>;
            fn balance(&self, meter: &mut GasMeter, address: Address) -> HostResult<U256>;
            fn send(&mut self, meter: &mut GasMeter, to: Address, amount: U256) -> HostResult<()>;
            fn sub_balance(&mut self, meter: &mut GasMeter, amount: U256) -> HostResult<()>;
            fn add_balance(&mut self, meter: &mut GasMeter, address: Address, amount: U256) -> HostResult<()>;
            fn identity_state(&self, meter: &mut GasMeter, address: Address) -> HostResult<u8>;
            fn identity(&self, meter: &mut GasMeter, address: Address) -> HostResult<Option<Bytes>>;
            fn caller(&self, meter: &mut GasMeter) -> HostResult<Address>;
            fn original_caller(&self, meter: &mut GasMeter) -> HostResult<Address>;
            fn contract_address(&self, meter: &mut GasMeter) -> HostResult<Address>;
            fn contract_code(&self, meter: &mut GasMeter, address: Address) -> HostResult<Option<Bytes>>;
            fn own_code(&self, meter: &mut GasMeter) -> HostResult<Option<Bytes>>;
            fn code_hash(&self, meter: &mut GasMeter) -> HostResult<Option<B256>>;
            fn contract_addr(&self, meter: &mut GasMeter, code: &[u8], args: &[u8], nonce: &[u8]) -> HostResult<Address>;
            fn contract_addr_by_hash(&self, meter: &mut GasMeter, code_hash: B256, args: &[u8], nonce: &[u8]) -> HostResult<Address>;
            fn event(&mut self, meter: &mut GasMeter, name: &str, args: &[Option<Bytes>]) -> HostResult<()>;
            fn read_contract_data(&self, meter: &mut GasMeter, address: Address, key: &[u8]) -> HostResult<Option<Bytes>>;
            fn pay_amount(&self, meter: &mut GasMeter) -> HostResult<U256>;
            fn keccak256(&self, meter: &mut GasMeter, data: &[u8]) -> HostResult<B256>;
            fn block_header(&self, meter: &mut GasMeter, height: u64) -> HostResult<Option<Bytes>>;
            fn global_state(&self, meter: &mut GasMeter) -> HostResult<Bytes>;
            fn get_code(&self, address: Address) -> Option<Bytes>;
            fn contract_code_hash(&self, address: Address) -> Option<B256>;
            fn deploy(&mut self, code: &[u8]);
            fn clear(&mut self);
            fn is_debug(&self) -> bool;
        }
    }

    fn create_sub_env(
        &mut self,
        contract: Address,
        pay_amount: U256,
        is_deploy: bool,
    ) -> HostResult<Box<dyn HostEnv + '_>> {
        self.sub_envs += 1;
        self.inner.create_sub_env(contract, pay_amount, is_deploy)
    }

    fn commit(&mut self) -> HostResult<()> {
        self.commits += 1;
        self.inner.commit()
    }
}
