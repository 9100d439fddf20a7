//! End-to-end scenarios driving the dispatcher from the top level.

use alloy_primitives::{Bytes, U256};
use contract_host::{
    constants::messages,
    test_utils::{
        read_u64, sum_contract, u64_arg, ScriptedExecutor, CALLER, CONTRACT, SCRIPT_BASE_COST,
        SUM_CODE, SUM_KEY,
    },
    CallContext, CallStatus, Dispatcher, HostConfig, HostEnv, MemoryDb, MemoryHostEnv, StateLayer,
};

fn sum_dispatcher() -> Dispatcher<ScriptedExecutor> {
    let executor = ScriptedExecutor::new().contract(SUM_CODE, sum_contract);
    Dispatcher::new(executor, HostConfig::default())
}

#[test]
fn test_deploy_then_compute() {
    let dispatcher = sum_dispatcher();
    let mut db = MemoryDb::default().account_balance(CALLER, U256::from(1_000));

    {
        let mut host =
            MemoryHostEnv::new(&mut db, CallContext::new(CONTRACT, CALLER), dispatcher.config());
        let outcome = dispatcher.deploy(&mut host, CONTRACT, SUM_CODE, &[u64_arg(1)], 10_000_000);
        assert!(outcome.is_success(), "{:?}", outcome.result);
        // base cost plus writing an 8-byte value under a 3-byte key
        assert_eq!(outcome.gas_used, SCRIPT_BASE_COST + 110);
        host.commit().unwrap();
    }
    assert_eq!(db.read_code(CONTRACT), Some(Bytes::from_static(SUM_CODE)));

    {
        let mut host =
            MemoryHostEnv::new(&mut db, CallContext::new(CONTRACT, CALLER), dispatcher.config());
        let outcome =
            dispatcher.execute(&mut host, CONTRACT, "compute", &[u64_arg(10)], 1_000_000);
        assert_eq!(outcome.status(), CallStatus::Ok);
        assert_eq!(outcome.gas_used, SCRIPT_BASE_COST + 80 + 110);
        let output = outcome.result.clone().unwrap().unwrap();
        assert_eq!(read_u64(&output), Some(11));

        let action_result = outcome.decode_action_result().unwrap();
        assert!(action_result.success);
        assert_eq!(action_result.gas_used, outcome.gas_used);
        assert_eq!(action_result.remaining_gas, 1_000_000 - outcome.gas_used);
        assert_eq!(action_result.output_data, output.to_vec());
        host.commit().unwrap();
    }

    let stored = db.read_storage(CONTRACT, SUM_KEY).unwrap();
    assert_eq!(read_u64(&stored), Some(11));
}

#[test]
fn test_uncommitted_root_leaves_state_untouched() {
    let dispatcher = sum_dispatcher();
    let mut db = MemoryDb::default();

    {
        let mut host =
            MemoryHostEnv::new(&mut db, CallContext::new(CONTRACT, CALLER), dispatcher.config());
        let outcome = dispatcher.deploy(&mut host, CONTRACT, SUM_CODE, &[u64_arg(7)], 0);
        assert!(outcome.is_success());
    }

    assert_eq!(db, MemoryDb::default());
}

#[test]
fn test_execute_without_code() {
    let dispatcher = sum_dispatcher();
    let mut db = MemoryDb::default();
    let mut host =
        MemoryHostEnv::new(&mut db, CallContext::new(CONTRACT, CALLER), dispatcher.config());

    let outcome = dispatcher.execute(&mut host, CONTRACT, "compute", &[u64_arg(1)], 50_000);
    assert_eq!(outcome.gas_used, 0);
    assert_eq!(outcome.result.as_ref().unwrap_err().to_string(), messages::CODE_IS_EMPTY);

    let action_result = outcome.decode_action_result().unwrap();
    assert!(!action_result.success);
    assert_eq!(action_result.error, messages::CODE_IS_EMPTY);
    assert_eq!(action_result.remaining_gas, 50_000);
}

#[test]
fn test_deploy_over_existing_code() {
    let dispatcher = sum_dispatcher();
    let mut db = MemoryDb::default().account_code(CONTRACT, Bytes::from_static(SUM_CODE));
    let mut host =
        MemoryHostEnv::new(&mut db, CallContext::new(CONTRACT, CALLER), dispatcher.config());

    let outcome = dispatcher.deploy(&mut host, CONTRACT, SUM_CODE, &[u64_arg(1)], 50_000);
    assert_eq!(outcome.gas_used, 0);
    assert_eq!(
        outcome.result.as_ref().unwrap_err().to_string(),
        messages::CONTRACT_ALREADY_DEPLOYED
    );
}

#[test]
fn test_unknown_method_fails() {
    let dispatcher = sum_dispatcher();
    let mut db = MemoryDb::default().account_code(CONTRACT, Bytes::from_static(SUM_CODE));
    let mut host =
        MemoryHostEnv::new(&mut db, CallContext::new(CONTRACT, CALLER), dispatcher.config());

    let outcome = dispatcher.execute(&mut host, CONTRACT, "multiply", &[u64_arg(2)], 50_000);
    assert_eq!(outcome.status(), CallStatus::Other);
    assert_eq!(outcome.gas_used, SCRIPT_BASE_COST);
    assert_eq!(outcome.result.unwrap_err().to_string(), "unknown method multiply");
}
