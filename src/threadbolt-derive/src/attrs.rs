use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Attribute, Error as SynError, Ident, LitStr, Meta, Result as SynResult};

#[derive(Debug)]
pub struct InjectData {
    pub key: String,
}

/// Reads the injection key of a field.
///
/// `#[inject]` binds the field to the service named after it, `#[inject("key")]`
/// binds it to `key`. Fields without the attribute yield `None`.
pub fn parse_inject_attribute(ident: &Ident, attrs: &[Attribute]) -> SynResult<Option<InjectData>> {
    let mut res = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
        if res.is_some() {
            return Err(SynError::new(
                attr.path().span(),
                "only one `#[inject]` attribute is allowed on a field",
            ));
        }

        let key = match &attr.meta {
            Meta::Path(_) => ident.unraw().to_string(),
            Meta::List(list) => {
                let lit = syn::parse2::<LitStr>(list.tokens.clone()).map_err(|err| {
                    SynError::new(
                        err.span(),
                        "expects `#[inject]` or `#[inject(\"service-name\")]`",
                    )
                })?;
                if lit.value().is_empty() {
                    return Err(SynError::new(lit.span(), "the injection key should not be empty"));
                }
                lit.value()
            }
            Meta::NameValue(name_value) => {
                return Err(SynError::new(
                    name_value.path.span(),
                    "expects `#[inject]` or `#[inject(\"service-name\")]`",
                ))
            }
        };

        res = Some(InjectData { key });
    }

    Ok(res)
}
