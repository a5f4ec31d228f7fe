// Path: crates/macros/src/lib.rs

//! Declarative surfaces for contract authors.
//!
//! - `#[derive(Record)]` declares a record's ordered field list, optional base and
//!   optional primary-key field.
//! - `#[derive(PrimitiveEnum)]` packs a fieldless `#[repr(int)]` enum as its raw
//!   discriminant.
//! - `#[contract]` with `#[method]` builds the method dispatcher for an `impl`
//!   block.
//!
//! Generated code refers to `::cosio_types` and `::cosio_api` by absolute path, so
//! both crates must be dependencies of the crate using the macros.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, ItemImpl};

mod contract;
mod record;

/// Derives `Record`, `Pack` and `Unpack` for a struct with named fields, plus
/// `Derived` and `PrimaryKey` when the matching field attributes are present.
///
/// ```ignore
/// #[derive(Record, Default)]
/// #[record(name = "stats")]
/// struct Stat {
///     #[record(base)]
///     base: SingletonRecord,
///     symbol: String,
///     total_supply: u64,
/// }
///
/// #[derive(Record, Default)]
/// struct Balance {
///     #[record(primary_key)]
///     owner: Name,
///     amount: u64,
/// }
/// ```
///
/// The field order of the declaration is the wire order. A `base` field must be
/// the first field and counts as a single field in the record's prefix.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand_record(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `Pack` and `Unpack` for a fieldless enum with an integer `#[repr]`.
/// The discriminant is written as the raw bytes of the repr type; an unknown
/// discriminant fails to unpack.
#[proc_macro_derive(PrimitiveEnum)]
pub fn derive_primitive_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand_primitive_enum(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Builds `cosio_api::contract::Contract` for an `impl` block.
///
/// Every function marked `#[method]` becomes callable by name. Its signature must be
///
/// ```ignore
/// fn name(&self, state: &mut dyn TableStore, ctx: &CallContext<'_>, a: A, b: B, ...)
///     -> Result<(), E>   // or no return type
/// ```
///
/// where `E: Into<ContractError>`. The dispatcher unpacks the call arguments as the
/// tuple `(A, B, ...)` and invokes the handler with them in declared order. Any
/// other return type is rejected at compile time.
#[proc_macro_attribute]
pub fn contract(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as contract::ContractAttributes);
    let item_impl = parse_macro_input!(input as ItemImpl);
    contract::expand_contract(args, item_impl)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
