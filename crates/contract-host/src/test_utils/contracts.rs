use alloy_primitives::{address, Address, Bytes};

use crate::{EntryPoint, HostApi, HostError, HostResult, Invocation};

/// The caller of top-level invocations in tests.
pub const CALLER: Address = address!("2000000000000000000000000000000000000002");
/// The contract targeted by top-level invocations in tests.
pub const CONTRACT: Address = address!("1000000000000000000000000000000000000001");

/// The code of the sum contract, see [`sum_contract`].
pub const SUM_CODE: &[u8] = b"\0asm:sum";

/// The storage key holding the running sum.
pub const SUM_KEY: &[u8] = b"sum";

/// Encodes `value` as a little-endian u64 argument.
pub fn u64_arg(value: u64) -> Option<Bytes> {
    Some(Bytes::copy_from_slice(&value.to_le_bytes()))
}

/// Decodes a little-endian u64.
pub fn read_u64(bytes: &[u8]) -> Option<u64> {
    Some(u64::from_le_bytes(bytes.try_into().ok()?))
}

/// A contract keeping a running sum in storage.
///
/// The constructor stores its first argument. `compute` adds its first argument to the stored
/// sum and returns the new sum. Both take little-endian u64 arguments.
pub fn sum_contract(
    api: &mut HostApi<'_>,
    invocation: &Invocation<'_>,
) -> HostResult<Option<Bytes>> {
    let operand = invocation
        .arguments()
        .first()
        .cloned()
        .flatten()
        .and_then(|arg| read_u64(&arg))
        .ok_or_else(|| HostError::failed("expected a u64 argument"))?;

    let sum = match invocation.entry {
        EntryPoint::Constructor => operand,
        EntryPoint::Method("compute") => {
            let stored = api.get_storage(SUM_KEY)?.into_value();
            let current = stored.and_then(|bytes| read_u64(&bytes)).unwrap_or_default();
            current.checked_add(operand).ok_or_else(|| HostError::failed("sum overflow"))?
        }
        EntryPoint::Method(method) => {
            return Err(HostError::failed(format!("unknown method {method}")));
        }
    };

    let encoded = sum.to_le_bytes();
    api.set_storage(SUM_KEY, &encoded)?;
    Ok(Some(Bytes::copy_from_slice(&encoded)))
}
