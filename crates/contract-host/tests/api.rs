//! Tests for the metered operations a running frame sees.

use alloy_primitives::{keccak256, Bytes, U256};
use contract_host::{
    constants::gas,
    derive_contract_address, pack_arguments,
    test_utils::{ScriptedExecutor, CALLER, CONTRACT, SCRIPT_BASE_COST},
    ActionType, CallContext, Dispatcher, Event, GasMeter, HostApi, HostConfig, HostError,
    HostResult, Invocation, MemoryDb, MemoryHostEnv, StateLayer,
};

const SCRIPT: &[u8] = b"script";

/// Runs `script` as the code of [`CONTRACT`] at the top level and returns the gas it used.
fn run_script<F>(db: &mut MemoryDb, script: F) -> u64
where
    F: Fn(&mut HostApi<'_>, &Invocation<'_>) -> HostResult<Option<Bytes>>
        + Send
        + Sync
        + 'static,
{
    let dispatcher =
        Dispatcher::new(ScriptedExecutor::new().contract(SCRIPT, script), HostConfig::default());
    let mut host =
        MemoryHostEnv::new(db, CallContext::new(CONTRACT, CALLER), dispatcher.config());
    let outcome = dispatcher.execute(&mut host, CONTRACT, "run", &[], 1_000_000);
    assert!(outcome.is_success(), "{:?}", outcome.result);
    outcome.gas_used
}

fn db() -> MemoryDb {
    MemoryDb::default()
        .account_code(CONTRACT, Bytes::from_static(SCRIPT))
        .account_balance(CONTRACT, U256::from(10))
}

#[test]
fn test_operations_report_their_gas() {
    fn metering(api: &mut HostApi<'_>, _: &Invocation<'_>) -> HostResult<Option<Bytes>> {
        let before = api.gas_consumed();
        assert_eq!(api.set_storage(b"key", b"value")?.gas_used, 80);

        let read = api.get_storage(b"key")?;
        assert_eq!(read.gas_used, 5 * gas::STORAGE_READ_PER_BYTE);
        assert_eq!(read.value, Some(Bytes::from_static(b"value")));

        assert_eq!(api.block_number()?.gas_used, gas::CONTEXT_READ);
        assert_eq!(api.balance(CALLER)?.gas_used, gas::BALANCE_READ);
        assert_eq!(api.keccak256(&[0; 33])?.gas_used, gas::KECCAK + 2 * gas::KECCAK_PER_WORD);

        let total = 80
            + 5 * gas::STORAGE_READ_PER_BYTE
            + gas::CONTEXT_READ
            + gas::BALANCE_READ
            + gas::KECCAK
            + 2 * gas::KECCAK_PER_WORD;
        assert_eq!(api.gas_consumed() - before, total);
        Ok(None)
    }

    let gas_used = run_script(&mut db(), metering);
    assert_eq!(gas_used, SCRIPT_BASE_COST + 80 + 50 + 5 + 20 + 42);
}

#[test]
fn test_event_arguments_are_unpacked() {
    fn emitter(api: &mut HostApi<'_>, _: &Invocation<'_>) -> HostResult<Option<Bytes>> {
        let args = pack_arguments(&[Some(Bytes::from_static(b"to")), None]);
        let emitted = api.event("Transfer", &args)?;
        // "Transfer" plus the two bytes of the only non-nil argument
        assert_eq!(emitted.gas_used, gas::EVENT + 10 * gas::EVENT_PER_BYTE);
        api.commit()?;
        Ok(None)
    }

    let mut db = db();
    run_script(&mut db, emitter);
    assert_eq!(
        db.events(),
        [Event {
            contract: CONTRACT,
            name: "Transfer".to_owned(),
            args: vec![Some(Bytes::from_static(b"to")), None],
        }]
    );
}

#[test]
fn test_top_level_commit_reaches_the_state() {
    fn committer(api: &mut HostApi<'_>, _: &Invocation<'_>) -> HostResult<Option<Bytes>> {
        api.set_storage(b"key", b"kept")?;
        api.commit()?;
        Ok(None)
    }

    let mut db = db();
    run_script(&mut db, committer);
    assert_eq!(db.read_storage(CONTRACT, b"key"), Some(Bytes::from_static(b"kept")));
}

#[test]
fn test_contract_address_derivation() {
    const CODE: &[u8] = b"some contract code";

    fn deriving(api: &mut HostApi<'_>, _: &Invocation<'_>) -> HostResult<Option<Bytes>> {
        let by_hash = api.contract_addr_by_hash(keccak256(CODE), b"args", b"nonce")?;
        assert_eq!(by_hash.gas_used, gas::ADDRESS_DERIVATION);

        let by_code = api.contract_addr(CODE, b"args", b"nonce")?;
        assert_eq!(by_code.gas_used, gas::KECCAK + gas::KECCAK_PER_WORD + gas::ADDRESS_DERIVATION);
        assert_eq!(by_code.value, by_hash.value);
        assert_eq!(by_hash.value, derive_contract_address(keccak256(CODE), b"args", b"nonce"));

        let other_nonce = api.contract_addr_by_hash(keccak256(CODE), b"args", b"other")?;
        assert_ne!(other_nonce.value, by_hash.value);
        Ok(None)
    }

    run_script(&mut db(), deriving);
}

#[test]
fn test_poisoned_meter_fails_fast() {
    let mut db = db();
    let config = HostConfig::default();
    let executor = ScriptedExecutor::new();
    let mut host = MemoryHostEnv::new(&mut db, CallContext::new(CONTRACT, CALLER), &config);
    let mut api = HostApi::new(&mut host, &executor, &config, GasMeter::new(150));
    assert_eq!(api.depth(), 0);

    assert_eq!(api.send(CALLER, U256::from(1)).unwrap().gas_used, gas::TRANSFER);
    assert_eq!(api.sub_results().len(), 1);

    assert_eq!(api.consume_gas(100), Err(HostError::OutOfGas));
    assert!(api.meter().is_exhausted());
    let consumed = api.gas_consumed();

    assert_eq!(api.block_number(), Err(HostError::OutOfGas));
    assert_eq!(api.set_storage(b"key", b"value"), Err(HostError::OutOfGas));
    assert_eq!(api.send(CALLER, U256::from(1)), Err(HostError::OutOfGas));
    assert!(matches!(
        api.call(CONTRACT, "run", &[], U256::ZERO, &[], 1_000),
        Err(HostError::OutOfGas)
    ));

    // nothing was charged or recorded once the meter was poisoned
    assert_eq!(api.gas_consumed(), consumed);
    let recorded: Vec<_> = api
        .sub_results()
        .iter()
        .map(|result| result.input_action.as_ref().unwrap().kind())
        .collect();
    assert_eq!(recorded, [Some(ActionType::Transfer)]);
}

#[test]
fn test_raising_the_limit_resumes_the_frame() {
    let mut db = db();
    let config = HostConfig::default();
    let executor = ScriptedExecutor::new();
    let mut host = MemoryHostEnv::new(&mut db, CallContext::new(CONTRACT, CALLER), &config);
    let mut api = HostApi::new(&mut host, &executor, &config, GasMeter::new(10));

    assert_eq!(api.balance(CALLER), Err(HostError::OutOfGas));
    api.set_remaining_gas(1_000);
    let balance = api.balance(CONTRACT).unwrap();
    assert_eq!(balance.value, U256::from(10));
    assert_eq!(api.gas_consumed(), 2 * gas::BALANCE_READ);
}
