//! Wire types of the call boundary.
//!
//! [`Action`] and [`ActionResult`] are protobuf messages so that an encoded result can be decoded
//! on the other side of any process boundary.

use alloy_primitives::{Address, Bytes, U256};
use prost::Message;
use serde::{Deserialize, Serialize};

use crate::constants::record::DEPLOY_METHOD;

/// Kind of an attempted operation recorded in an [`Action`].
#[repr(u32)]
#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
pub enum ActionType {
    /// A method call on a contract.
    #[display("function call")]
    FunctionCall = 1,
    /// A value transfer.
    #[display("transfer")]
    Transfer = 2,
    /// A contract deployment.
    #[display("deploy contract")]
    DeployContract = 3,
    /// A keyed read of another contract's data.
    #[display("read contract data")]
    ReadContractData = 4,
    /// A read of identity data.
    #[display("read identity")]
    ReadIdentity = 5,
}

impl TryFrom<u32> for ActionType {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::FunctionCall),
            2 => Ok(Self::Transfer),
            3 => Ok(Self::DeployContract),
            4 => Ok(Self::ReadContractData),
            5 => Ok(Self::ReadIdentity),
            other => Err(other),
        }
    }
}

/// A record of one attempted operation.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct Action {
    /// The [`ActionType`] discriminant.
    #[prost(uint32, tag = "1")]
    pub action_type: u32,
    /// The attached amount, as minimal big-endian bytes.
    #[prost(bytes = "vec", tag = "2")]
    pub amount: Vec<u8>,
    /// The invoked method, for calls and deploys.
    #[prost(string, tag = "3")]
    pub method: String,
    /// The packed arguments.
    #[prost(bytes = "vec", tag = "4")]
    pub args: Vec<u8>,
    /// The gas limit handed to the operation.
    #[prost(uint64, tag = "5")]
    pub gas_limit: u64,
    /// The deployed code, for deploys.
    #[prost(bytes = "vec", tag = "6")]
    pub code: Vec<u8>,
    /// The deploy nonce, for deploys.
    #[prost(bytes = "vec", tag = "7")]
    pub nonce: Vec<u8>,
}

impl Action {
    /// A call of `method` with packed `args`.
    pub fn function_call(method: &str, args: &[u8], amount: U256, gas_limit: u64) -> Self {
        Self {
            action_type: ActionType::FunctionCall as u32,
            amount: encode_amount(amount),
            method: method.to_owned(),
            args: args.to_vec(),
            gas_limit,
            ..Default::default()
        }
    }

    /// A deployment of `code` with packed constructor `args`.
    pub fn deploy_contract(
        code: &[u8],
        args: &[u8],
        nonce: &[u8],
        amount: U256,
        gas_limit: u64,
    ) -> Self {
        Self {
            action_type: ActionType::DeployContract as u32,
            amount: encode_amount(amount),
            method: DEPLOY_METHOD.to_owned(),
            args: args.to_vec(),
            gas_limit,
            code: code.to_vec(),
            nonce: nonce.to_vec(),
        }
    }

    /// A transfer of `amount` to `to`. The recipient is recorded as the arguments.
    pub fn transfer(to: Address, amount: U256) -> Self {
        Self {
            action_type: ActionType::Transfer as u32,
            amount: encode_amount(amount),
            args: to.to_vec(),
            ..Default::default()
        }
    }

    /// A read of `key` in the data of `contract`. The arguments are `[contract, key]`, packed.
    pub fn read_contract_data(contract: Address, key: &[u8]) -> Self {
        Self {
            action_type: ActionType::ReadContractData as u32,
            args: crate::pack_arguments(&[
                Some(Bytes::copy_from_slice(contract.as_slice())),
                Some(Bytes::copy_from_slice(key)),
            ])
            .to_vec(),
            ..Default::default()
        }
    }

    /// A read of the identity of `address`.
    pub fn read_identity(address: Address) -> Self {
        Self {
            action_type: ActionType::ReadIdentity as u32,
            args: address.to_vec(),
            ..Default::default()
        }
    }

    /// The decoded [`ActionType`], if the discriminant is known.
    pub fn kind(&self) -> Option<ActionType> {
        ActionType::try_from(self.action_type).ok()
    }
}

/// The record of an invocation and of the operations it triggered.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct ActionResult {
    /// The recorded operation.
    #[prost(message, optional, tag = "1")]
    pub input_action: Option<Action>,
    /// Whether the operation succeeded.
    #[prost(bool, tag = "2")]
    pub success: bool,
    /// The failure message. Empty on success.
    #[prost(string, tag = "3")]
    pub error: String,
    /// The gas used by the operation.
    #[prost(uint64, tag = "4")]
    pub gas_used: u64,
    /// The part of the gas limit left unused.
    #[prost(uint64, tag = "5")]
    pub remaining_gas: u64,
    /// The data returned by a successful execution.
    #[prost(bytes = "vec", tag = "6")]
    pub output_data: Vec<u8>,
    /// The results of the operations triggered by this one, in order.
    #[prost(message, repeated, tag = "7")]
    pub sub_action_results: Vec<ActionResult>,
}

impl ActionResult {
    /// Encodes the result into its wire format.
    pub fn to_bytes(&self) -> Bytes {
        self.encode_to_vec().into()
    }

    /// Decodes a result from its wire format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, prost::DecodeError> {
        Self::decode(bytes)
    }

    /// The depth of the result tree. A result without sub-results has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.sub_action_results.iter().map(Self::depth).max().unwrap_or(0)
    }
}

/// Encodes an amount as minimal big-endian bytes. Zero encodes as no bytes.
pub fn encode_amount(amount: U256) -> Vec<u8> {
    amount.to_be_bytes_trimmed_vec()
}

/// Decodes big-endian amount bytes. Returns `None` if the value does not fit in 256 bits.
pub fn decode_amount(bytes: &[u8]) -> Option<U256> {
    U256::try_from_be_slice(bytes)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn test_amount_encoding_is_minimal() {
        assert!(encode_amount(U256::ZERO).is_empty());
        assert_eq!(encode_amount(U256::from(0x0102)), vec![0x01, 0x02]);
        assert_eq!(decode_amount(&[0x01, 0x02]), Some(U256::from(0x0102)));
        assert_eq!(decode_amount(&[]), Some(U256::ZERO));
    }

    #[test]
    fn test_action_result_wire_format() {
        let inner = ActionResult {
            input_action: Some(Action::transfer(
                address!("0000000000000000000000000000000000000042"),
                U256::from(7),
            )),
            success: true,
            gas_used: 100,
            ..Default::default()
        };
        let result = ActionResult {
            input_action: Some(Action::function_call("compute", &[1, 2, 3], U256::ZERO, 5000)),
            success: false,
            error: "code is empty".into(),
            gas_used: 0,
            remaining_gas: 5000,
            output_data: vec![],
            sub_action_results: vec![inner],
        };

        let decoded = ActionResult::from_bytes(&result.to_bytes()).unwrap();
        assert_eq!(decoded, result);
        assert_eq!(decoded.depth(), 2);
        assert_eq!(
            decoded.sub_action_results[0].input_action.as_ref().unwrap().kind(),
            Some(ActionType::Transfer)
        );
    }

    #[test]
    fn test_deploy_action_records_method() {
        let action = Action::deploy_contract(b"code", &[1], &[9], U256::from(3), 10);
        assert_eq!(action.kind(), Some(ActionType::DeployContract));
        assert_eq!(action.method, DEPLOY_METHOD);
        assert_eq!(action.nonce, vec![9]);
        assert_eq!(action.amount, vec![3]);
        assert_eq!(ActionType::try_from(42), Err(42));
    }
}
