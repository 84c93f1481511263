mod macros;

use proc_macro::TokenStream;

/// Derive `gridview::Record` for a struct with named fields.
///
/// Field attributes:
/// - `#[record(id)]` marks the identity field (defaults to the field named `id`)
/// - `#[record(skip)]` hides a field from `Record::field`
/// - `#[record(rename = "key")]` exposes a field under another name
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    macros::record::expand(input.into()).into()
}
