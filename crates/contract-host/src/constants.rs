//! Constants for the contract host.
//!
//! It groups the constants by concern as sub-modules.

/// Constants of the argument wire format.
pub mod codec {
    /// Format tag of a single opaque argument.
    pub const ARGS_PLAIN_FORMAT: u8 = 0x0;
    /// Format tag of an ordered list of nullable arguments.
    pub const ARGS_STRUCTURED_FORMAT: u8 = 0x1;
}

/// Bounds applied to recorded [`ActionResult`](crate::ActionResult) trees.
pub mod record {
    /// The maximum depth of a reported action result tree. The root is at depth 1; sub-results
    /// below this depth are pruned.
    pub const MAX_RECORD_DEPTH: usize = 5;
    /// The maximum number of argument bytes kept in a recorded action.
    pub const MAX_RECORDED_ARGS_LEN: usize = 100;
    /// The method name recorded for contract deployments.
    pub const DEPLOY_METHOD: &str = "deploy";
}

/// Default gas costs of the in-memory host, see [`GasSchedule`](crate::GasSchedule).
pub mod gas {
    /// Gas per byte of key and value written to storage.
    pub const STORAGE_WRITE_PER_BYTE: u64 = 10;
    /// Gas per byte of value read from storage.
    pub const STORAGE_READ_PER_BYTE: u64 = 10;
    /// Gas for removing a storage entry.
    pub const STORAGE_REMOVE: u64 = 10;
    /// Gas for reading a chain context value (block number, seed, epoch, ...).
    pub const CONTEXT_READ: u64 = 5;
    /// Gas for reading a balance.
    pub const BALANCE_READ: u64 = 20;
    /// Gas for moving value between accounts.
    pub const TRANSFER: u64 = 100;
    /// Gas for reading identity data.
    pub const IDENTITY_READ: u64 = 50;
    /// Base gas of reading contract code.
    pub const CODE_READ: u64 = 50;
    /// Gas per byte of contract code read.
    pub const CODE_READ_PER_BYTE: u64 = 1;
    /// Gas for deriving a contract address.
    pub const ADDRESS_DERIVATION: u64 = 100;
    /// Base gas of an emitted event.
    pub const EVENT: u64 = 100;
    /// Gas per byte of event name and arguments.
    pub const EVENT_PER_BYTE: u64 = 10;
    /// Base gas of a keccak256 hash.
    pub const KECCAK: u64 = 30;
    /// Gas per 32-byte word hashed.
    pub const KECCAK_PER_WORD: u64 = 6;
}

/// Limits enforced by the host.
pub mod limits {
    /// The maximum length of a storage key.
    pub const MAX_STORAGE_KEY_LEN: usize = 32;
    /// The default maximum nesting of calls and deploys below a top-level invocation.
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;
}

/// Application error messages reported in action results.
pub mod messages {
    /// The called address holds no code.
    pub const CODE_IS_EMPTY: &str = "code is empty";
    /// The deploy address already holds code.
    pub const CONTRACT_ALREADY_DEPLOYED: &str = "contract is already deployed";
    /// The payer cannot cover the transferred amount.
    pub const INSUFFICIENT_BALANCE: &str = "insufficient balance";
    /// The nested invocation would exceed the configured call depth.
    pub const CALL_DEPTH_EXCEEDED: &str = "call depth exceeded";
    /// A nested frame tried to commit its environment.
    pub const NESTED_COMMIT: &str = "commit is only allowed at the top level";
}
