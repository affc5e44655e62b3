use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Error as SynError, Fields, Ident, Result as SynResult};

use crate::attrs::{self, InjectData};

#[derive(Debug)]
struct FieldData {
    ident: Ident,
    inject: InjectData,
}

pub fn expand_injectable(input: DeriveInput) -> SynResult<TokenStream2> {
    let fields = parse_fields(&input)?;

    let self_type = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let points = fields
        .iter()
        .map(|field| {
            let ident = &field.ident;
            let name = ident.unraw().to_string();
            let key = &field.inject.key;
            quote! {
                threadbolt::container::inject::InjectionPoint::new(#name, #key, &mut self.#ident),
            }
        })
        .collect::<TokenStream2>();

    Ok(quote! {
        impl #impl_generics threadbolt::container::inject::Injectable for #self_type #type_generics #where_clause {
            fn injection_points(&mut self) -> std::vec::Vec<threadbolt::container::inject::InjectionPoint<'_>> {
                std::vec![#points]
            }
        }
    })
}

fn parse_fields(input: &DeriveInput) -> SynResult<Vec<FieldData>> {
    let Data::Struct(data) = &input.data else {
        return Err(SynError::new(
            input.ident.span(),
            "`#[derive(Injectable)]` can only be used on structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(SynError::new(
            input.ident.span(),
            "`#[derive(Injectable)]` needs a struct with named fields",
        ));
    };

    let mut res = Vec::new();
    for field in &fields.named {
        let Some(ident) = field.ident.clone() else {
            unreachable!("a named field should have an identifier");
        };
        if let Some(inject) = attrs::parse_inject_attribute(&ident, &field.attrs)? {
            res.push(FieldData { ident, inject });
        }
    }
    Ok(res)
}
