// SPDX-License-Identifier: Apache-2.0

//! Transaction definitions and side-effect execution core for the Andamio
//! platform.
//!
//! The crate is the single source of truth for every on-chain transaction
//! the platform supports: a versioned registry of declarative
//! [`TransactionDefinition`]s, an execution engine that drives each
//! transaction's database side effects over an injected transport, pure
//! reproductions of the on-chain Plutus hashing, and a read-only decoder
//! for transaction CBOR.
//!
//! The core never builds, signs, or submits a transaction, never waits for
//! confirmations, and persists nothing; its only I/O boundary is the
//! [`Transport`] the caller injects.

#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(
    absolute_paths_not_starting_with_crate,
    deprecated_in_future,
    future_incompatible,
    missing_docs,
    clippy::cargo_common_metadata,
    clippy::future_not_send,
    clippy::missing_errors_doc
)]
// useful pedantic clippy lints
// This is an opt-in list instead of opt-out because sometimes clippy has weird lints.
#![warn(
    clippy::bool_to_int_with_if,
    clippy::checked_conversions,
    clippy::cloned_instead_of_copied,
    clippy::copy_iterator,
    clippy::default_trait_access,
    clippy::doc_link_with_quotes,
    clippy::doc_markdown,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_deref_methods,
    clippy::explicit_into_iter_loop,
    clippy::explicit_iter_loop,
    clippy::filter_map_next,
    clippy::flat_map_option,
    clippy::fn_params_excessive_bools,
    clippy::from_iter_instead_of_collect,
    clippy::if_not_else,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::index_refutable_slice,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::large_digit_groups,
    clippy::large_types_passed_by_value,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::manual_ok_or,
    clippy::manual_string_new,
    clippy::many_single_char_names,
    clippy::map_unwrap_or,
    clippy::match_same_arms,
    clippy::match_wild_err_arm,
    clippy::match_wildcard_for_single_variants,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::mut_mut,
    clippy::needless_bitwise_bool,
    clippy::needless_continue,
    clippy::needless_for_each,
    clippy::needless_pass_by_value,
    clippy::no_effect_underscore_binding,
    clippy::option_option,
    clippy::range_minus_one,
    clippy::range_plus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::redundant_else,
    clippy::ref_binding_to_reference,
    clippy::ref_option_ref,
    clippy::return_self_not_must_use,
    clippy::same_functions_in_if_condition,
    clippy::semicolon_if_nothing_returned,
    clippy::similar_names,
    clippy::stable_sort_primitive,
    clippy::string_add_assign,
    clippy::struct_excessive_bools,
    clippy::trivially_copy_pass_by_ref,
    clippy::uninlined_format_args,
    clippy::unnecessary_join,
    clippy::unnecessary_wraps,
    clippy::unnested_or_patterns,
    clippy::unreadable_literal,
    clippy::unused_async,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::zero_sized_map_values
)]
#![allow(clippy::enum_glob_use, clippy::enum_variant_names)]

mod cbor;
mod context;
mod cost;
mod definition;
mod definitions;
mod error;
mod execute;
mod hashing;
mod path;
mod protocol;
pub mod registry;
mod schema;
mod side_effect;
pub mod testing;
mod transaction_name;
mod transport;

pub use cbor::{
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
pub use context::{
    ConfirmationContext,
    OnChainData,
    SubmissionContext,
};
pub use cost::{
    AdditionalCost,
    Lovelace,
    TransactionCost,
};
pub use definition::{
    apply_input_helpers,
    role,
    validate_definition,
    BuildTxConfig,
    BuilderSpec,
    DocsInfo,
    InputHelper,
    TransactionDefinition,
    UiInfo,
};
pub use error::{
    Error,
    Result,
};
pub use execute::{
    execute_side_effects,
    CriticalFailure,
    ExecuteOptions,
    SideEffectReport,
    SideEffectResult,
};
pub use hashing::{
    compute_assignment_info_hash,
    compute_slt_hash,
    compute_slt_hash_definite,
    compute_task_hash,
    debug_task_cbor,
    is_valid_assignment_info_hash,
    is_valid_slt_hash,
    is_valid_task_hash,
    normalize_evidence,
    verify_assignment_info_hash,
    verify_evidence_detailed,
    verify_slt_hash,
    verify_task_hash,
    EvidenceVerification,
    TaskRecord,
};
pub use path::{
    ContextPath,
    PathSegment,
    Resolution,
};
pub use protocol::{
    ProtocolSpec,
    ProtocolVersion,
};
pub use schema::{
    Field,
    FieldType,
    InputSchemas,
    Schema,
    SchemaIssue,
};
pub use side_effect::{
    executable_side_effects,
    should_execute_side_effect,
    BodyField,
    Endpoint,
    FieldSource,
    HttpMethod,
    PathParam,
    RetryPolicy,
    SideEffect,
    NOT_IMPLEMENTED,
};
pub use transaction_name::TransactionName;
pub use transport::{
    BoxTransportFuture,
    Transport,
    TransportError,
    TransportRequest,
    TransportResponse,
};
