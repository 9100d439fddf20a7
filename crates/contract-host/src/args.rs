//! Argument codec.
//!
//! An argument payload is prefixed by a one-byte format tag:
//!
//! - [`ARGS_PLAIN_FORMAT`]: the remainder is a single opaque argument.
//! - [`ARGS_STRUCTURED_FORMAT`]: the remainder is a protobuf list of entries, each either a byte
//!   string or an explicit nil marker.
//!
//! Decoding is total: an unknown tag or a malformed structured payload decodes to an empty list.

use alloy_primitives::Bytes;
use prost::Message;

use crate::constants::codec::{ARGS_PLAIN_FORMAT, ARGS_STRUCTURED_FORMAT};

/// An ordered list of nullable arguments.
pub type Arguments = Vec<Option<Bytes>>;

#[derive(Clone, PartialEq, Eq, Message)]
struct ProtoArgs {
    #[prost(message, repeated, tag = "1")]
    args: Vec<ProtoArgument>,
}

#[derive(Clone, PartialEq, Eq, Message)]
struct ProtoArgument {
    #[prost(bytes = "vec", tag = "1")]
    value: Vec<u8>,
    #[prost(bool, tag = "2")]
    is_nil: bool,
}

/// Packs an argument vector with the structured format, preserving nils.
pub fn pack_arguments(args: &[Option<Bytes>]) -> Bytes {
    let message = ProtoArgs {
        args: args
            .iter()
            .map(|arg| match arg {
                Some(value) => ProtoArgument { value: value.to_vec(), is_nil: false },
                None => ProtoArgument { value: Vec::new(), is_nil: true },
            })
            .collect(),
    };

    let mut packed = Vec::with_capacity(1 + message.encoded_len());
    packed.push(ARGS_STRUCTURED_FORMAT);
    packed.extend(message.encode_to_vec());
    packed.into()
}

/// Unpacks an argument payload. Never fails; unrecognized input yields an empty list.
pub fn unpack_arguments(packed: &[u8]) -> Arguments {
    let Some((&format, payload)) = packed.split_first() else {
        return Vec::new();
    };

    match format {
        ARGS_PLAIN_FORMAT => vec![Some(Bytes::copy_from_slice(payload))],
        ARGS_STRUCTURED_FORMAT => match ProtoArgs::decode(payload) {
            Ok(message) => message
                .args
                .into_iter()
                .map(|arg| (!arg.is_nil).then(|| Bytes::from(arg.value)))
                .collect(),
            Err(_) => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn arguments() -> impl Strategy<Value = Arguments> {
        prop::collection::vec(
            prop::option::of(prop::collection::vec(any::<u8>(), 0..48).prop_map(Bytes::from)),
            0..12,
        )
    }

    proptest! {
        #[test]
        fn test_pack_unpack_round_trip(args in arguments()) {
            prop_assert_eq!(unpack_arguments(&pack_arguments(&args)), args);
        }
    }

    #[test]
    fn test_nil_positions_are_preserved() {
        let args = vec![None, Some(Bytes::from_static(b"a")), None, Some(Bytes::new())];
        let packed = pack_arguments(&args);
        assert_eq!(packed[0], ARGS_STRUCTURED_FORMAT);
        assert_eq!(unpack_arguments(&packed), args);
    }

    #[test]
    fn test_plain_format_is_a_single_argument() {
        assert_eq!(
            unpack_arguments(&[ARGS_PLAIN_FORMAT, 1, 2, 3]),
            vec![Some(Bytes::from_static(&[1, 2, 3]))]
        );
        assert_eq!(unpack_arguments(&[ARGS_PLAIN_FORMAT]), vec![Some(Bytes::new())]);
    }

    #[test]
    fn test_unrecognized_input_decodes_to_empty_list() {
        assert!(unpack_arguments(&[]).is_empty());
        assert!(unpack_arguments(&[0x7f, 1, 2, 3]).is_empty());
        // a length prefix pointing past the end of the payload
        assert!(unpack_arguments(&[ARGS_STRUCTURED_FORMAT, 0x0a, 0x10, 0x01]).is_empty());
    }

    #[test]
    fn test_empty_vector_packs_to_bare_tag() {
        let packed = pack_arguments(&[]);
        assert_eq!(packed.as_ref(), &[ARGS_STRUCTURED_FORMAT]);
        assert!(unpack_arguments(&packed).is_empty());
    }
}
