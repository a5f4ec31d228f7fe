// Path: crates/macros/src/contract.rs
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse::Parse, parse::ParseStream, punctuated::Punctuated, FnArg, GenericArgument, ImplItem,
    ImplItemFn, ItemImpl, LitStr, Meta, PathArguments, ReturnType, Token, Type,
};

pub struct ContractAttributes {
    name: Option<LitStr>,
}

impl Parse for ContractAttributes {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;

        let vars = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for var in vars {
            match var {
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    if let syn::Expr::Lit(expr_lit) = &nv.value {
                        if let syn::Lit::Str(lit) = &expr_lit.lit {
                            name = Some(lit.clone());
                            continue;
                        }
                    }
                    return Err(syn::Error::new_spanned(nv.value, "`name` must be a string"));
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unsupported contract attribute, expected `name = \"...\"`",
                    ))
                }
            }
        }

        Ok(ContractAttributes { name })
    }
}

enum HandlerReturn {
    Unit,
    Result,
}

/// Accepts `()` (or no return type) and any path ending in `Result<(), ..>`.
fn classify_return(method: &ImplItemFn) -> syn::Result<HandlerReturn> {
    let ty = match &method.sig.output {
        ReturnType::Default => return Ok(HandlerReturn::Unit),
        ReturnType::Type(_, ty) => ty.as_ref(),
    };
    let is_unit = |t: &Type| matches!(t, Type::Tuple(tuple) if tuple.elems.is_empty());
    if is_unit(ty) {
        return Ok(HandlerReturn::Unit);
    }
    if let Type::Path(path) = ty {
        if let Some(last) = path.path.segments.last() {
            if last.ident == "Result" {
                if let PathArguments::AngleBracketed(generic) = &last.arguments {
                    if let Some(GenericArgument::Type(ok)) = generic.args.first() {
                        if is_unit(ok) {
                            return Ok(HandlerReturn::Result);
                        }
                    }
                }
            }
        }
    }
    Err(syn::Error::new_spanned(
        &method.sig.output,
        "contract methods cannot return a value; use `()` or `Result<(), E>`",
    ))
}

pub fn expand_contract(args: ContractAttributes, mut item_impl: ItemImpl) -> syn::Result<TokenStream2> {
    let self_ty = item_impl.self_ty.clone();
    let contract_type = match &args.name {
        Some(lit) => lit.value(),
        None => quote!(#self_ty).to_string().replace(' ', ""),
    };

    let mut method_names = Vec::new();
    let mut match_arms = Vec::new();

    for item in &mut item_impl.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        let mut is_contract_method = false;
        method.attrs.retain(|attr| {
            if attr.path().is_ident("method") {
                is_contract_method = true;
                false
            } else {
                true
            }
        });
        if !is_contract_method {
            continue;
        }

        let method_ident = &method.sig.ident;
        let method_str = method_ident.to_string();
        let returns = classify_return(method)?;

        // Signature: fn name(&self, state: &mut dyn TableStore, ctx: &CallContext, args...)
        let mut inputs = method.sig.inputs.iter();
        match inputs.next() {
            Some(FnArg::Receiver(r)) if r.reference.is_some() && r.mutability.is_none() => {}
            _ => {
                return Err(syn::Error::new_spanned(
                    &method.sig,
                    "contract methods must take `&self` first",
                ))
            }
        }
        if inputs.len() < 2 {
            return Err(syn::Error::new_spanned(
                &method.sig,
                "contract methods take `state` and `ctx` after `&self`",
            ));
        }
        let mut arg_tys = Vec::new();
        for arg in inputs.skip(2) {
            match arg {
                FnArg::Typed(pat_type) => arg_tys.push(pat_type.ty.as_ref().clone()),
                FnArg::Receiver(_) => {
                    return Err(syn::Error::new_spanned(arg, "unexpected receiver"));
                }
            }
        }
        let arg_idents: Vec<_> = (0..arg_tys.len()).map(|i| format_ident!("__arg{}", i)).collect();

        let call = quote! { self.#method_ident(state, ctx, #(#arg_idents),*) };
        let invoke = match returns {
            HandlerReturn::Unit => quote! {
                #call;
                ::core::result::Result::Ok(())
            },
            HandlerReturn::Result => quote! {
                #call.map_err(::core::convert::Into::<::cosio_types::error::ContractError>::into)
            },
        };

        match_arms.push(quote! {
            #method_str => {
                let (#(#arg_idents,)*): (#(#arg_tys,)*) =
                    ::cosio_types::codec::unpack(ctx.args)?;
                #invoke
            }
        });
        method_names.push(method_str);
    }

    if method_names.is_empty() {
        return Err(syn::Error::new_spanned(
            &item_impl.self_ty,
            "a contract needs at least one `#[method]`",
        ));
    }

    let (impl_generics, _, where_clause) = item_impl.generics.split_for_impl();

    let dispatch_impl = quote! {
        impl #impl_generics ::cosio_api::contract::Contract for #self_ty #where_clause {
            fn contract_type(&self) -> &'static str {
                #contract_type
            }

            fn methods(&self) -> &'static [&'static str] {
                &[#(#method_names),*]
            }

            fn dispatch(
                &self,
                state: &mut dyn ::cosio_api::state::TableStore,
                ctx: &::cosio_api::context::CallContext<'_>,
            ) -> ::core::result::Result<(), ::cosio_types::error::ContractError> {
                match ctx.method {
                    #(#match_arms)*
                    other => ::core::result::Result::Err(
                        ::cosio_types::error::ContractError::UnknownMethod(other.to_string()),
                    ),
                }
            }
        }
    };

    Ok(quote! {
        #item_impl
        #dispatch_impl
    })
}
