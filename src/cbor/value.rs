// SPDX-License-Identifier: Apache-2.0

use minicbor::data::Type;
use minicbor::Decoder;
use serde_json::{
    Map,
    Number,
    Value,
};

use super::decode::{
    cb,
    consume_break,
};

/// Projects one CBOR item into a JSON value.
///
/// Byte strings become hex strings, map keys are stringified, tags are
/// unwrapped, and simple values the projection has no JSON shape for
/// become `null`.
pub(crate) fn decode_value(d: &mut Decoder<'_>) -> crate::Result<Value> {
    let value = match cb(d.datatype())? {
        Type::Bool => Value::Bool(cb(d.bool())?),
        Type::Null | Type::Undefined => {
            cb(d.skip())?;
            Value::Null
        }
        Type::U8 | Type::U16 | Type::U32 | Type::U64 => Value::Number(cb(d.u64())?.into()),
        Type::I8 | Type::I16 | Type::I32 | Type::I64 | Type::Int => {
            Value::Number(cb(d.i64())?.into())
        }
        Type::F16 | Type::F32 | Type::F64 => {
            Number::from_f64(cb(d.f64())?).map_or(Value::Null, Value::Number)
        }
        Type::Bytes | Type::BytesIndef => {
            let mut bytes = Vec::new();
            for chunk in cb(d.bytes_iter())? {
                bytes.extend_from_slice(cb(chunk)?);
            }
            Value::String(hex::encode(bytes))
        }
        Type::String | Type::StringIndef => {
            let mut text = String::new();
            for chunk in cb(d.str_iter())? {
                text.push_str(cb(chunk)?);
            }
            Value::String(text)
        }
        Type::Array | Type::ArrayIndef => {
            let mut items = Vec::new();
            match cb(d.array())? {
                Some(len) => {
                    for _ in 0..len {
                        items.push(decode_value(d)?);
                    }
                }
                None => {
                    while cb(d.datatype())? != Type::Break {
                        items.push(decode_value(d)?);
                    }
                    consume_break(d);
                }
            }
            Value::Array(items)
        }
        Type::Map | Type::MapIndef => {
            let mut object = Map::new();
            let mut entry = |d: &mut Decoder<'_>| -> crate::Result<()> {
                let key = match decode_value(d)? {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                object.insert(key, decode_value(d)?);
                Ok(())
            };

            match cb(d.map())? {
                Some(len) => {
                    for _ in 0..len {
                        entry(d)?;
                    }
                }
                None => {
                    while cb(d.datatype())? != Type::Break {
                        entry(d)?;
                    }
                    consume_break(d);
                }
            }
            Value::Object(object)
        }
        Type::Tag => {
            let _ = cb(d.tag())?;
            decode_value(d)?
        }
        // Simple values and anything unrecognized project to null.
        _ => {
            cb(d.skip())?;
            Value::Null
        }
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use minicbor::Decoder;
    use serde_json::json;

    use super::decode_value;

    #[test]
    fn projects_nested_metadata() {
        // {674: {"msg": ["andamio"]}} with a byte-string leaf.
        let mut encoder = minicbor::Encoder::new(Vec::new());
        encoder
            .map(1)
            .unwrap()
            .u64(674)
            .unwrap()
            .map(2)
            .unwrap()
            .str("msg")
            .unwrap()
            .array(1)
            .unwrap()
            .str("andamio")
            .unwrap()
            .str("raw")
            .unwrap()
            .bytes(&[0xde, 0xad])
            .unwrap();

        let value = decode_value(&mut Decoder::new(encoder.writer())).unwrap();

        assert_eq!(value, json!({ "674": { "msg": ["andamio"], "raw": "dead" } }));
    }
}
