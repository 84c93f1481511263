use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr, parse2};

/// Options from `#[record(...)]` on one field.
#[derive(Default)]
struct FieldOptions {
    id: bool,
    skip: bool,
    rename: Option<String>,
}

fn field_options(field: &Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                options.id = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                options.rename = Some(name.value());
                Ok(())
            } else {
                Err(meta.error("expected `id`, `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok(options)
}

/// Derive macro for the Record trait.
///
/// Generates `id()` from the field marked `#[record(id)]` (or the field
/// named `id`) and `field()` matching every other field by name. Fields
/// are converted with `CellValue::from`, so each field type needs a
/// `From` impl. The type must also derive `Clone` separately.
pub fn expand(input: TokenStream) -> TokenStream {
    match expand_inner(input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error(),
    }
}

fn expand_inner(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "#[derive(Record)] requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(Record)] can only be used on structs",
            ));
        }
    };

    let mut id_field: Option<&Ident> = None;
    let mut fallback_id: Option<&Ident> = None;
    let mut names = Vec::new();
    let mut idents = Vec::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let options = field_options(field)?;
        if options.id {
            if id_field.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one field may be marked #[record(id)]",
                ));
            }
            id_field = Some(ident);
        }
        if ident == "id" {
            fallback_id = Some(ident);
        }
        if options.skip {
            continue;
        }
        let key = options
            .rename
            .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());
        names.push(key);
        idents.push(ident);
    }

    let Some(id_field) = id_field.or(fallback_id) else {
        return Err(syn::Error::new_spanned(
            &input,
            "#[derive(Record)] requires an `id` field or a field marked #[record(id)]",
        ));
    };

    Ok(quote! {
        impl #impl_generics ::gridview::Record for #name #ty_generics #where_clause {
            fn id(&self) -> ::std::string::String {
                ::std::string::ToString::to_string(&self.#id_field)
            }

            fn field(&self, name: &str) -> ::gridview::CellValue {
                match name {
                    #( #names => ::gridview::CellValue::from(
                        ::core::clone::Clone::clone(&self.#idents)
                    ), )*
                    _ => ::gridview::CellValue::Null,
                }
            }
        }
    })
}
