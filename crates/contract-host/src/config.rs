use serde::{Deserialize, Serialize};

use crate::constants::{gas, limits};

/// Configuration of the call boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostConfig {
    /// Whether the executor runs in debug mode. Forwarded to every
    /// [`Invocation`](crate::Invocation).
    pub is_debug: bool,
    /// The maximum nesting of calls and deploys below a top-level invocation.
    pub max_call_depth: usize,
    /// The gas costs charged by the in-memory host.
    pub gas: GasSchedule,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            is_debug: false,
            max_call_depth: limits::DEFAULT_MAX_CALL_DEPTH,
            gas: GasSchedule::default(),
        }
    }
}

impl HostConfig {
    /// Sets the debug flag.
    pub fn with_debug(mut self, is_debug: bool) -> Self {
        self.is_debug = is_debug;
        self
    }

    /// Sets the maximum call depth.
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Sets the gas schedule.
    pub fn with_gas_schedule(mut self, gas: GasSchedule) -> Self {
        self.gas = gas;
        self
    }
}

/// Per-operation gas costs. Defaults come from [`constants::gas`](crate::constants::gas).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct GasSchedule {
    pub storage_write_per_byte: u64,
    pub storage_read_per_byte: u64,
    pub storage_remove: u64,
    pub context_read: u64,
    pub balance_read: u64,
    pub transfer: u64,
    pub identity_read: u64,
    pub code_read: u64,
    pub code_read_per_byte: u64,
    pub address_derivation: u64,
    pub event: u64,
    pub event_per_byte: u64,
    pub keccak: u64,
    pub keccak_per_word: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            storage_write_per_byte: gas::STORAGE_WRITE_PER_BYTE,
            storage_read_per_byte: gas::STORAGE_READ_PER_BYTE,
            storage_remove: gas::STORAGE_REMOVE,
            context_read: gas::CONTEXT_READ,
            balance_read: gas::BALANCE_READ,
            transfer: gas::TRANSFER,
            identity_read: gas::IDENTITY_READ,
            code_read: gas::CODE_READ,
            code_read_per_byte: gas::CODE_READ_PER_BYTE,
            address_derivation: gas::ADDRESS_DERIVATION,
            event: gas::EVENT,
            event_per_byte: gas::EVENT_PER_BYTE,
            keccak: gas::KECCAK,
            keccak_per_word: gas::KECCAK_PER_WORD,
        }
    }
}

impl GasSchedule {
    /// A schedule where every operation is free.
    pub const fn free() -> Self {
        Self {
            storage_write_per_byte: 0,
            storage_read_per_byte: 0,
            storage_remove: 0,
            context_read: 0,
            balance_read: 0,
            transfer: 0,
            identity_read: 0,
            code_read: 0,
            code_read_per_byte: 0,
            address_derivation: 0,
            event: 0,
            event_per_byte: 0,
            keccak: 0,
            keccak_per_word: 0,
        }
    }

    /// Gas for writing `key` and `value` to storage.
    pub const fn storage_write(&self, key_len: usize, value_len: usize) -> u64 {
        self.storage_write_per_byte.saturating_mul((key_len + value_len) as u64)
    }

    /// Gas for reading a storage value of `value_len` bytes.
    pub const fn storage_read(&self, value_len: usize) -> u64 {
        self.storage_read_per_byte.saturating_mul(value_len as u64)
    }

    /// Gas for reading `code_len` bytes of contract code.
    pub const fn code_read(&self, code_len: usize) -> u64 {
        self.code_read.saturating_add(self.code_read_per_byte.saturating_mul(code_len as u64))
    }

    /// Gas for emitting an event of `payload_len` bytes.
    pub const fn event(&self, payload_len: usize) -> u64 {
        self.event.saturating_add(self.event_per_byte.saturating_mul(payload_len as u64))
    }

    /// Gas for hashing `data_len` bytes.
    pub const fn keccak(&self, data_len: usize) -> u64 {
        let words = data_len.div_ceil(32) as u64;
        self.keccak.saturating_add(self.keccak_per_word.saturating_mul(words))
    }
}
