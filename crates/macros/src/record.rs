// Path: crates/macros/src/record.rs
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type};

struct RecordField {
    ident: Ident,
    ty: Type,
    is_base: bool,
    is_key: bool,
}

fn container_name(input: &DeriveInput) -> syn::Result<String> {
    let mut name = input.ident.to_string();
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                name = lit.value();
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(name)
}

fn record_fields(input: &DeriveInput) -> syn::Result<Vec<RecordField>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Record requires a struct with named fields",
        ));
    };

    let mut fields = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let mut is_base = false;
        let mut is_key = false;
        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("base") {
                    is_base = true;
                    Ok(())
                } else if meta.path.is_ident("primary_key") {
                    is_key = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported field attribute, expected `base` or `primary_key`"))
                }
            })?;
        }
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "field must be named"));
        };
        fields.push(RecordField {
            ident,
            ty: field.ty.clone(),
            is_base,
            is_key,
        });
    }

    for (i, f) in fields.iter().enumerate() {
        if f.is_base && i != 0 {
            return Err(syn::Error::new_spanned(
                &f.ident,
                "the `base` field must be the first field of the record",
            ));
        }
    }
    if fields.iter().filter(|f| f.is_key).count() > 1 {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "at most one field may be marked `primary_key`",
        ));
    }
    Ok(fields)
}

pub fn expand_record(input: DeriveInput) -> syn::Result<TokenStream2> {
    let type_name = container_name(&input)?;
    let fields = record_fields(&input)?;
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let own_names: Vec<String> = fields
        .iter()
        .filter(|f| !f.is_base)
        .map(|f| f.ident.to_string())
        .collect();
    let base = fields.iter().find(|f| f.is_base);
    let has_base = base.is_some();
    let idents: Vec<&Ident> = fields.iter().map(|f| &f.ident).collect();
    let tys: Vec<&Type> = fields.iter().map(|f| &f.ty).collect();

    let derived_impl = base.map(|b| {
        let b_ident = &b.ident;
        let b_ty = &b.ty;
        quote! {
            impl #impl_generics ::cosio_types::codec::Derived for #ident #ty_generics #where_clause {
                type Base = #b_ty;

                fn base(&self) -> &Self::Base {
                    &self.#b_ident
                }

                fn base_mut(&mut self) -> &mut Self::Base {
                    &mut self.#b_ident
                }
            }
        }
    });

    let key_impl = fields.iter().find(|f| f.is_key).map(|k| {
        let k_ident = &k.ident;
        let k_ty = &k.ty;
        quote! {
            impl #impl_generics ::cosio_types::codec::PrimaryKey for #ident #ty_generics #where_clause {
                type Key = #k_ty;

                fn primary_key(&self) -> &Self::Key {
                    &self.#k_ident
                }
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::cosio_types::codec::Record for #ident #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;
            const FIELD_NAMES: &'static [&'static str] = &[#(#own_names),*];
            const HAS_BASE: bool = #has_base;
        }

        impl #impl_generics ::cosio_types::codec::Pack for #ident #ty_generics #where_clause {
            fn pack_to<__S: ::cosio_types::codec::WriteStream + ?Sized>(
                &self,
                __s: &mut __S,
            ) -> ::core::result::Result<(), ::cosio_types::error::CodecError> {
                ::cosio_types::codec::pack_record_header::<Self, __S>(__s)?;
                #( ::cosio_types::codec::Pack::pack_to(&self.#idents, __s)?; )*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::cosio_types::codec::Unpack for #ident #ty_generics #where_clause {
            fn unpack_from(
                __s: &mut ::cosio_types::codec::ReadBuffer<'_>,
            ) -> ::core::result::Result<Self, ::cosio_types::error::CodecError> {
                ::cosio_types::codec::unpack_record_header::<Self>(__s)?;
                #( let #idents = <#tys as ::cosio_types::codec::Unpack>::unpack_from(__s)?; )*
                ::core::result::Result::Ok(Self { #(#idents),* })
            }
        }

        #derived_impl
        #key_impl
    })
}

const REPR_TYPES: &[&str] = &["u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64"];

pub fn expand_primitive_enum(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let name_str = ident.to_string();

    let mut repr = None;
    for attr in &input.attrs {
        if attr.path().is_ident("repr") {
            let ty: Ident = attr.parse_args()?;
            if REPR_TYPES.iter().any(|r| ty == r) {
                repr = Some(ty);
            }
        }
    }
    let Some(repr) = repr else {
        return Err(syn::Error::new_spanned(
            ident,
            "PrimitiveEnum requires an integer #[repr(..)] such as #[repr(u8)]",
        ));
    };

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "PrimitiveEnum can only be derived for enums",
        ));
    };
    let mut variants = Vec::with_capacity(data.variants.len());
    for v in &data.variants {
        if !matches!(v.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                &v.ident,
                "PrimitiveEnum variants cannot carry fields",
            ));
        }
        variants.push(&v.ident);
    }

    Ok(quote! {
        impl ::cosio_types::codec::Pack for #ident {
            fn pack_to<__S: ::cosio_types::codec::WriteStream + ?Sized>(
                &self,
                __s: &mut __S,
            ) -> ::core::result::Result<(), ::cosio_types::error::CodecError> {
                let __v: #repr = match self {
                    #( Self::#variants => Self::#variants as #repr, )*
                };
                ::cosio_types::codec::Pack::pack_to(&__v, __s)
            }
        }

        impl ::cosio_types::codec::Unpack for #ident {
            fn unpack_from(
                __s: &mut ::cosio_types::codec::ReadBuffer<'_>,
            ) -> ::core::result::Result<Self, ::cosio_types::error::CodecError> {
                let __v = <#repr as ::cosio_types::codec::Unpack>::unpack_from(__s)?;
                #( if __v == Self::#variants as #repr {
                    return ::core::result::Result::Ok(Self::#variants);
                } )*
                ::core::result::Result::Err(::cosio_types::error::CodecError::InvalidDiscriminant {
                    what: #name_str,
                    value: __v as i128,
                })
            }
        }
    })
}
