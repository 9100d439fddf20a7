use core::fmt;
use std::sync::Arc;

use alloy_primitives::{keccak256, map::HashMap, Bytes, B256};

use crate::{Executor, HostApi, HostError, HostResult, Invocation};

/// Gas charged by [`ScriptedExecutor`] before running any script.
pub const SCRIPT_BASE_COST: u64 = 1_000;

/// A scripted contract body.
pub type Script =
    Arc<dyn Fn(&mut HostApi<'_>, &Invocation<'_>) -> HostResult<Option<Bytes>> + Send + Sync>;

/// An [`Executor`] running Rust closures registered by code hash.
///
/// Unknown code fails with an application error.
#[derive(Clone)]
pub struct ScriptedExecutor {
    scripts: HashMap<B256, Script>,
    base_cost: u64,
}

impl fmt::Debug for ScriptedExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedExecutor")
            .field("scripts", &self.scripts.keys().collect::<Vec<_>>())
            .field("base_cost", &self.base_cost)
            .finish()
    }
}

impl Default for ScriptedExecutor {
    fn default() -> Self {
        Self { scripts: HashMap::default(), base_cost: SCRIPT_BASE_COST }
    }
}

impl ScriptedExecutor {
    /// Creates an executor without scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gas charged before running a script.
    pub fn with_base_cost(mut self, base_cost: u64) -> Self {
        self.base_cost = base_cost;
        self
    }

    /// Registers `script` as the body of `code`.
    pub fn register<F>(&mut self, code: impl AsRef<[u8]>, script: F)
    where
        F: Fn(&mut HostApi<'_>, &Invocation<'_>) -> HostResult<Option<Bytes>>
            + Send
            + Sync
            + 'static,
    {
        self.scripts.insert(keccak256(code), Arc::new(script));
    }

    /// Registers `script` as the body of `code`.
    pub fn contract<F>(mut self, code: impl AsRef<[u8]>, script: F) -> Self
    where
        F: Fn(&mut HostApi<'_>, &Invocation<'_>) -> HostResult<Option<Bytes>>
            + Send
            + Sync
            + 'static,
    {
        self.register(code, script);
        self
    }
}

impl Executor for ScriptedExecutor {
    fn execute(
        &self,
        api: &mut HostApi<'_>,
        invocation: &Invocation<'_>,
    ) -> HostResult<Option<Bytes>> {
        api.consume_gas(self.base_cost)?;
        let Some(script) = self.scripts.get(&keccak256(invocation.code)) else {
            return Err(HostError::failed("unknown code"));
        };
        script(api, invocation)
    }
}
