// SPDX-License-Identifier: Apache-2.0

//! Read-only decoding of Cardano transaction CBOR.
//!
//! The decoder is a projection for preview UIs and verification: it
//! extracts identifiers, amounts, and minted assets and ignores everything
//! it does not recognize. Amounts are returned in lovelace, unnormalized.

mod decode;
mod value;

pub use decode::{
    decode_transaction_cbor,
    extract_asset_names,
    extract_mints,
    extract_mints_by_policy,
    extract_tx_id,
    DecodedTransaction,
    Mint,
    TransactionInput,
    TransactionOutput,
};
