// SPDX-License-Identifier: Apache-2.0

use minicbor::data::Type;
use minicbor::Decoder;
use serde_json::Value;

use super::value::decode_value;
use crate::hashing::plutus::blake2b_256_hex;
use crate::Error;

/// One minted (or burned) asset.
#[derive(Debug, Clone, PartialEq, Eq, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mint {
    /// The minting policy, hex encoded.
    pub policy_id: String,
    /// The asset name: UTF-8 where the on-chain bytes decode as such, hex
    /// otherwise.
    pub asset_name: String,
    /// The minted quantity; negative for burns.
    pub quantity: i64,
}

/// One transaction input.
#[derive(Debug, Clone, PartialEq, Eq, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    /// The hash of the transaction being spent, hex encoded.
    pub tx_id: String,
    /// The output index within that transaction.
    pub index: u64,
}

/// One transaction output.
#[derive(Debug, Clone, PartialEq, Eq, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    /// The receiving address bytes, hex encoded.
    pub address: String,
    /// The lovelace amount.
    pub lovelace: u64,
    /// Native assets carried by the output, if any.
    pub assets: Vec<Mint>,
}

/// The decoded view of a transaction blob.
#[derive(Debug, Clone, PartialEq, Default, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedTransaction {
    /// The transaction id: Blake2b-256 of the transaction-body bytes.
    pub tx_id: String,
    /// The declared network fee in lovelace.
    pub fee: u64,
    /// Outputs, in body order.
    pub outputs: Vec<TransactionOutput>,
    /// Inputs, in body order.
    pub inputs: Vec<TransactionInput>,
    /// Minted and burned assets, in body order.
    pub mints: Vec<Mint>,
    /// Transaction metadata from the auxiliary data, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// The auxiliary data hash from the body, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_hash: Option<String>,
}

pub(crate) fn cb<T>(result: Result<T, minicbor::decode::Error>) -> crate::Result<T> {
    result.map_err(Error::cbor_decode)
}

/// Steps the decoder over a break byte.
pub(crate) fn consume_break(d: &mut Decoder<'_>) {
    d.set_position(d.position() + 1);
}

/// Decodes a transaction blob, signed or unsigned, into its structured
/// view.
///
/// Accepts a full transaction array (`[body, witness_set, …]`) or a bare
/// transaction-body map. Unknown body fields are ignored; well-formed but
/// unexpected CBOR never fails.
///
/// # Errors
/// - [`Error::CborDecode`] if the blob is not well-formed CBOR or has no
///   transaction shape at the top level.
pub fn decode_transaction_cbor(cbor: &[u8]) -> crate::Result<DecodedTransaction> {
    let mut d = Decoder::new(cbor);

    match cb(d.datatype())? {
        Type::Array | Type::ArrayIndef => {
            let len = cb(d.array())?;

            let body_start = d.position();
            cb(d.skip())?;
            let body_bytes = &cbor[body_start..d.position()];

            let mut tx = parse_body(body_bytes)?;
            tx.tx_id = blake2b_256_hex(body_bytes);

            // Witness set, then (era-dependent) a validity flag and the
            // auxiliary data. Anything with structure past the witness set
            // is the auxiliary data.
            let mut element = 1u64;

            loop {
                if let Some(n) = len {
                    if element >= n {
                        break;
                    }
                }
                if d.position() >= cbor.len() {
                    break;
                }

                match cb(d.datatype())? {
                    Type::Break => break,
                    _ if element == 1 => cb(d.skip())?,
                    Type::Bool | Type::Null | Type::Undefined => cb(d.skip())?,
                    _ => {
                        let metadata = decode_value(&mut d)?;
                        tx.metadata = Some(unwrap_metadata(metadata));
                    }
                }

                element += 1;
            }

            Ok(tx)
        }
        Type::Map | Type::MapIndef => {
            cb(d.skip())?;
            let body_bytes = &cbor[..d.position()];

            let mut tx = parse_body(body_bytes)?;
            tx.tx_id = blake2b_256_hex(body_bytes);
            Ok(tx)
        }
        other => Err(Error::cbor_decode(format!(
            "expected a transaction array or body map, got {other}"
        ))),
    }
}

/// Extracts the ordered mint list from a transaction blob.
///
/// # Errors
/// - [`Error::CborDecode`] if the blob is malformed.
pub fn extract_mints(cbor: &[u8]) -> crate::Result<Vec<Mint>> {
    Ok(decode_transaction_cbor(cbor)?.mints)
}

/// Extracts the mints under one policy.
///
/// # Errors
/// - [`Error::CborDecode`] if the blob is malformed.
pub fn extract_mints_by_policy(cbor: &[u8], policy_id: &str) -> crate::Result<Vec<Mint>> {
    let mut mints = extract_mints(cbor)?;
    mints.retain(|mint| mint.policy_id.eq_ignore_ascii_case(policy_id));
    Ok(mints)
}

/// Extracts just the asset names minted under one policy.
///
/// # Errors
/// - [`Error::CborDecode`] if the blob is malformed.
pub fn extract_asset_names(cbor: &[u8], policy_id: &str) -> crate::Result<Vec<String>> {
    Ok(extract_mints_by_policy(cbor, policy_id)?.into_iter().map(|mint| mint.asset_name).collect())
}

/// Extracts the transaction id from a transaction blob.
///
/// # Errors
/// - [`Error::CborDecode`] if the blob is malformed.
pub fn extract_tx_id(cbor: &[u8]) -> crate::Result<String> {
    Ok(decode_transaction_cbor(cbor)?.tx_id)
}

fn parse_body(bytes: &[u8]) -> crate::Result<DecodedTransaction> {
    let mut d = Decoder::new(bytes);
    let mut tx = DecodedTransaction::default();

    for_each_map_entry(&mut d, |d| {
        let key = match cb(d.datatype())? {
            Type::U8 | Type::U16 | Type::U32 | Type::U64 => cb(d.u64())?,
            // Not a transaction-body key; skip the key and its value.
            _ => {
                cb(d.skip())?;
                cb(d.skip())?;
                return Ok(());
            }
        };

        match key {
            0 => tx.inputs = parse_inputs(d)?,
            1 => tx.outputs = parse_outputs(d)?,
            2 => tx.fee = cb(d.u64())?,
            7 => tx.data_hash = Some(hex::encode(cb(d.bytes())?)),
            9 => tx.mints = parse_multiasset(d)?,
            _ => cb(d.skip())?,
        }

        Ok(())
    })?;

    Ok(tx)
}

fn parse_inputs(d: &mut Decoder<'_>) -> crate::Result<Vec<TransactionInput>> {
    // Conway wraps the input list in a tag-258 set.
    if cb(d.datatype())? == Type::Tag {
        let _ = cb(d.tag())?;
    }

    let mut inputs = Vec::new();

    for_each_array_item(d, |d| {
        let mut input = TransactionInput { tx_id: String::new(), index: 0 };
        let mut position = 0usize;

        for_each_array_item(d, |d| {
            match position {
                0 => input.tx_id = hex::encode(cb(d.bytes())?),
                1 => input.index = cb(d.u64())?,
                _ => cb(d.skip())?,
            }
            position += 1;
            Ok(())
        })?;

        inputs.push(input);
        Ok(())
    })?;

    Ok(inputs)
}

fn parse_outputs(d: &mut Decoder<'_>) -> crate::Result<Vec<TransactionOutput>> {
    let mut outputs = Vec::new();

    for_each_array_item(d, |d| {
        let mut output =
            TransactionOutput { address: String::new(), lovelace: 0, assets: Vec::new() };

        match cb(d.datatype())? {
            // Legacy shape: [address, value, …].
            Type::Array | Type::ArrayIndef => {
                let mut position = 0usize;
                for_each_array_item(d, |d| {
                    match position {
                        0 => output.address = hex::encode(cb(d.bytes())?),
                        1 => (output.lovelace, output.assets) = parse_value_field(d)?,
                        _ => cb(d.skip())?,
                    }
                    position += 1;
                    Ok(())
                })?;
            }
            // Post-Alonzo shape: {0: address, 1: value, …}.
            Type::Map | Type::MapIndef => {
                for_each_map_entry(d, |d| {
                    let key = match cb(d.datatype())? {
                        Type::U8 | Type::U16 | Type::U32 | Type::U64 => cb(d.u64())?,
                        _ => {
                            cb(d.skip())?;
                            cb(d.skip())?;
                            return Ok(());
                        }
                    };

                    match key {
                        0 => output.address = hex::encode(cb(d.bytes())?),
                        1 => (output.lovelace, output.assets) = parse_value_field(d)?,
                        _ => cb(d.skip())?,
                    }
                    Ok(())
                })?;
            }
            other => {
                return Err(Error::cbor_decode(format!("unexpected output shape: {other}")))
            }
        }

        outputs.push(output);
        Ok(())
    })?;

    Ok(outputs)
}

/// A value is either a bare coin or `[coin, multiasset]`.
fn parse_value_field(d: &mut Decoder<'_>) -> crate::Result<(u64, Vec<Mint>)> {
    match cb(d.datatype())? {
        Type::U8 | Type::U16 | Type::U32 | Type::U64 => Ok((cb(d.u64())?, Vec::new())),
        Type::Array | Type::ArrayIndef => {
            let mut coin = 0;
            let mut assets = Vec::new();
            let mut position = 0usize;

            for_each_array_item(d, |d| {
                match position {
                    0 => coin = cb(d.u64())?,
                    1 => assets = parse_multiasset(d)?,
                    _ => cb(d.skip())?,
                }
                position += 1;
                Ok(())
            })?;

            Ok((coin, assets))
        }
        other => Err(Error::cbor_decode(format!("unexpected value shape: {other}"))),
    }
}

/// A multiasset map: policy id → asset name → quantity.
fn parse_multiasset(d: &mut Decoder<'_>) -> crate::Result<Vec<Mint>> {
    let mut assets = Vec::new();

    for_each_map_entry(d, |d| {
        let policy_id = hex::encode(cb(d.bytes())?);

        for_each_map_entry(d, |d| {
            let asset_name = asset_name_to_string(cb(d.bytes())?);
            let quantity = cb(d.i64())?;

            assets.push(Mint { policy_id: policy_id.clone(), asset_name, quantity });
            Ok(())
        })?;

        Ok(())
    })?;

    Ok(assets)
}

fn asset_name_to_string(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => hex::encode(bytes),
    }
}

fn for_each_array_item(
    d: &mut Decoder<'_>,
    mut f: impl FnMut(&mut Decoder<'_>) -> crate::Result<()>,
) -> crate::Result<()> {
    match cb(d.array())? {
        Some(len) => {
            for _ in 0..len {
                f(d)?;
            }
        }
        None => {
            while cb(d.datatype())? != Type::Break {
                f(d)?;
            }
            consume_break(d);
        }
    }

    Ok(())
}

fn for_each_map_entry(
    d: &mut Decoder<'_>,
    mut f: impl FnMut(&mut Decoder<'_>) -> crate::Result<()>,
) -> crate::Result<()> {
    match cb(d.map())? {
        Some(len) => {
            for _ in 0..len {
                f(d)?;
            }
        }
        None => {
            while cb(d.datatype())? != Type::Break {
                f(d)?;
            }
            consume_break(d);
        }
    }

    Ok(())
}

/// Auxiliary data may arrive as the tag-259 map `{0: metadata, …}`, as the
/// legacy `[metadata, scripts]` pair, or as the bare metadata map.
fn unwrap_metadata(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("0") => {
            map.remove("0").unwrap_or(Value::Null)
        }
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::{
        decode_transaction_cbor,
        extract_asset_names,
        extract_mints_by_policy,
        extract_tx_id,
        Mint,
    };
    use crate::Error;

    // A Conway-era transaction with two outputs (one post-Alonzo map shape
    // with a bare coin, one legacy shape carrying a module token) and a
    // mint field that mints under one policy and burns under another.
    fn minting_tx() -> Vec<u8> {
        hex::decode(concat!(
            "84a400818258201111111111111111111111111111111111111111111111111111111111",
            "111111030182a2005839005c2ccdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcd",
            "cdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcd011a001e84",
            "80825839005c2ccdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcd",
            "cdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcd821a0016e360a1581caaaa",
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa14d4d4f44554c455f31",
            "5f6861736801021a0002d2a809a2581caaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "aaaaaaaaaaaaaaaaa14d4d4f44554c455f315f6861736801581cbbbbbbbbbbbbbbbbbbbb",
            "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbba1454255524e5421a0f5f6"
        ))
        .unwrap()
    }

    // The same body wrapped as a two-element (unsigned-style) array.
    fn unsigned_minting_tx() -> Vec<u8> {
        let tx = minting_tx();
        let mut unsigned = vec![0x82];
        // Everything between the outer header and the trailing
        // [witness, valid, aux] elements is the body.
        unsigned.extend_from_slice(&tx[1..tx.len() - 3]);
        unsigned.push(0xa0);
        unsigned
    }

    // A transaction with an auxiliary-data block: label 674, one message.
    fn metadata_tx() -> Vec<u8> {
        hex::decode(concat!(
            "84a40081825820222222222222222222222222222222222222222222222222222222222222",
            "222200018182581d61abababababababababababababababababababababababababababab",
            "1a004c4b40021a00029bf8075820cccccccccccccccccccccccccccccccccccccccccccccc",
            "cccccccccccccccccca0f5d90103a100a11902a2a1636d73678167616e64616d696f"
        ))
        .unwrap()
    }

    const MODULE_POLICY: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    #[test]
    fn decodes_the_full_view() {
        let tx = decode_transaction_cbor(&minting_tx()).unwrap();

        assert_eq!(tx.tx_id, "5d4ff1e900efe5ac9659bdd0b23c08f5be7f257e76d98443520abb985422b631");
        assert_eq!(tx.fee, 185_000);

        assert_eq!(tx.inputs.len(), 1);
        assert_eq!(tx.inputs[0].tx_id, "11".repeat(32));
        assert_eq!(tx.inputs[0].index, 3);

        assert_eq!(tx.outputs.len(), 2);
        assert_eq!(tx.outputs[0].lovelace, 2_000_000);
        assert!(tx.outputs[0].assets.is_empty());
        assert_eq!(tx.outputs[1].lovelace, 1_500_000);
        assert_eq!(tx.outputs[1].assets[0].asset_name, "MODULE_1_hash");

        assert_eq!(
            tx.mints,
            [
                Mint {
                    policy_id: MODULE_POLICY.to_owned(),
                    asset_name: "MODULE_1_hash".to_owned(),
                    quantity: 1,
                },
                Mint {
                    policy_id: "bb".repeat(28),
                    asset_name: "BURNT".to_owned(),
                    quantity: -2,
                },
            ]
        );

        assert_eq!(tx.metadata, None);
    }

    #[test]
    fn unsigned_and_signed_share_the_tx_id() {
        let signed = decode_transaction_cbor(&minting_tx()).unwrap();
        let unsigned = decode_transaction_cbor(&unsigned_minting_tx()).unwrap();

        assert_eq!(signed.tx_id, unsigned.tx_id);
        assert_eq!(signed.mints, unsigned.mints);
    }

    #[test]
    fn projects_metadata_and_data_hash() {
        let tx = decode_transaction_cbor(&metadata_tx()).unwrap();

        assert_eq!(tx.tx_id, "ee3ebc626922dad57a90c5dbeb26875620edd0e3371826922597804fe59264d6");
        assert_eq!(tx.data_hash.as_deref(), Some("cc".repeat(32).as_str()));
        assert_eq!(tx.metadata, Some(json!({ "674": { "msg": ["andamio"] } })));
    }

    #[test]
    fn filters_mints_by_policy() {
        let mints = extract_mints_by_policy(&minting_tx(), MODULE_POLICY).unwrap();
        assert_eq!(mints.len(), 1);
        assert_eq!(mints[0].quantity, 1);

        let names = extract_asset_names(&minting_tx(), MODULE_POLICY).unwrap();
        assert_eq!(names, ["MODULE_1_hash"]);

        let upper = extract_asset_names(&minting_tx(), &MODULE_POLICY.to_uppercase()).unwrap();
        assert_eq!(upper, names);
    }

    #[test]
    fn extract_tx_id_matches_decode() {
        assert_eq!(
            extract_tx_id(&minting_tx()).unwrap(),
            decode_transaction_cbor(&minting_tx()).unwrap().tx_id
        );
    }

    #[test]
    fn malformed_cbor_is_a_typed_error() {
        assert_matches!(decode_transaction_cbor(&[]), Err(Error::CborDecode(_)));
        assert_matches!(decode_transaction_cbor(&[0x17]), Err(Error::CborDecode(_)));
        assert_matches!(decode_transaction_cbor(&minting_tx()[..20]), Err(Error::CborDecode(_)));
    }
}
