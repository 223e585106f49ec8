//! Proc-macro crate for deriving `Describe` implementations.
//!
//! Provides `#[derive(Describe)]`. Field hints are written as
//! `#[pneuma("hint")]` or `#[pneuma(description = "hint")]`.

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Lit, LitStr, Meta, Token};

/// Derive `Describe` for a struct with named fields.
///
/// Each field becomes a required property of a closed object schema, in
/// declaration order. Property names follow serde (`rename`, `rename_all`)
/// and fields serde skips on deserialization are left out; a fill keeps their
/// values. `#[serde(flatten)]` and `#[serde(transparent)]` are rejected.
///
/// # Example
///
/// ```ignore
/// #[derive(Describe, Serialize, Deserialize, Default)]
/// #[serde(rename_all = "PascalCase")]
/// struct Dog {
///     #[pneuma("a short dog's name")]
///     name: String,
///     #[pneuma("0-20")]
///     age: u8,
/// }
/// ```
///
/// The generated code refers to `::pneuma`; use `#[pneuma(crate = "path")]`
/// on the struct when the items live elsewhere (for example `pneuma_schema`).
#[proc_macro_derive(Describe, attributes(pneuma))]
pub fn derive_describe(item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as DeriveInput);

    match expand_describe(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct ContainerArgs {
    krate: syn::Path,
    rename_all: Option<(String, proc_macro2::Span)>,
}

fn parse_container_args(attrs: &[Attribute]) -> syn::Result<ContainerArgs> {
    let mut krate: syn::Path = syn::parse_quote!(::pneuma);
    let mut rename_all = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("pneuma")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                krate = value.parse()?;
                Ok(())
            } else {
                Err(meta.error("unknown pneuma container attribute"))
            }
        })?;
    }

    for meta in serde_metas(attrs)? {
        match &meta {
            Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                if let Some(rule) = lit_str(&nv.value) {
                    rename_all = Some((rule.value(), rule.span()));
                }
            }
            // The wire shape would be the inner field's, not a record.
            Meta::Path(path) if path.is_ident("transparent") => {
                return Err(syn::Error::new_spanned(
                    path,
                    "Describe does not support #[serde(transparent)]; describe the inner type instead",
                ));
            }
            _ => {}
        }
    }

    Ok(ContainerArgs { krate, rename_all })
}

// Parse every `#[serde(...)]` attribute into its comma-separated items.
fn serde_metas(attrs: &[Attribute]) -> syn::Result<Vec<Meta>> {
    let mut metas = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        let nested = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        metas.extend(nested);
    }
    Ok(metas)
}

fn lit_str(expr: &Expr) -> Option<&LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Some(s),
        _ => None,
    }
}

fn field_hint(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut hint = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("pneuma")) {
        if let Ok(lit) = attr.parse_args::<LitStr>() {
            hint = Some(lit.value());
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("description") {
                let value: LitStr = meta.value()?.parse()?;
                hint = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `#[pneuma(\"hint\")]` or `#[pneuma(description = \"hint\")]`"))
            }
        })?;
    }

    Ok(hint)
}

struct SerdeField {
    rename: Option<String>,
    skipped: bool,
}

fn serde_field(attrs: &[Attribute]) -> syn::Result<SerdeField> {
    let mut field = SerdeField {
        rename: None,
        skipped: false,
    };

    for meta in serde_metas(attrs)? {
        match &meta {
            Meta::Path(path) if path.is_ident("skip") || path.is_ident("skip_deserializing") => {
                field.skipped = true;
            }
            // A flattened field's keys live in the parent object, so a nested
            // property would never decode.
            Meta::Path(path) if path.is_ident("flatten") => {
                return Err(syn::Error::new_spanned(
                    path,
                    "Describe does not support #[serde(flatten)]; declare the fields on this struct",
                ));
            }
            Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                if let Some(name) = lit_str(&nv.value) {
                    field.rename = Some(name.value());
                }
            }
            // rename(serialize = "..", deserialize = ".."): the decode side wins.
            Meta::List(list) if list.path.is_ident("rename") => {
                list.parse_nested_meta(|inner| {
                    let value: LitStr = inner.value()?.parse()?;
                    if inner.path.is_ident("deserialize") {
                        field.rename = Some(value.value());
                    }
                    Ok(())
                })?;
            }
            _ => {}
        }
    }

    Ok(field)
}

/// Apply a serde `rename_all` rule to a snake_case field name.
fn apply_rename_rule(rule: &str, field: &str) -> Option<String> {
    let renamed = match rule {
        "lowercase" | "snake_case" => field.to_string(),
        "UPPERCASE" | "SCREAMING_SNAKE_CASE" => field.to_ascii_uppercase(),
        "PascalCase" => to_pascal_case(field),
        "camelCase" => {
            let pascal = to_pascal_case(field);
            let mut chars = pascal.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_ascii_lowercase().to_string() + chars.as_str(),
            }
        }
        "kebab-case" => field.replace('_', "-"),
        "SCREAMING-KEBAB-CASE" => field.to_ascii_uppercase().replace('_', "-"),
        _ => return None,
    };
    Some(renamed)
}

fn to_pascal_case(s: &str) -> String {
    let mut pascal = String::with_capacity(s.len());
    let mut capitalize = true;
    for ch in s.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            pascal.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            pascal.push(ch);
        }
    }
    pascal
}

fn expand_describe(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Describe cannot be derived for tuple structs; fields need names",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Describe can only be derived for structs with named fields",
            ));
        }
    };

    let args = parse_container_args(&input.attrs)?;
    let krate = &args.krate;

    let mut field_exprs = Vec::new();
    let mut restores = Vec::new();
    for field in fields {
        let serde = serde_field(&field.attrs)?;
        let ty = &field.ty;

        // Named fields always carry an ident.
        let Some(ident) = &field.ident else {
            continue;
        };

        if serde.skipped {
            restores.push(quote! {
                ::core::mem::swap(&mut self.#ident, &mut prior.#ident);
            });
            continue;
        }
        restores.push(quote! {
            <#ty as #krate::Describe>::restore_skipped(&mut self.#ident, &mut prior.#ident);
        });
        let declared = ident.unraw().to_string();
        let key = match (serde.rename, &args.rename_all) {
            (Some(rename), _) => rename,
            (None, Some((rule, span))) => apply_rename_rule(rule, &declared).ok_or_else(|| {
                syn::Error::new(*span, format!("unknown rename_all rule: {rule}"))
            })?,
            (None, None) => declared,
        };

        let describe = field_hint(&field.attrs)?.map(|hint| quote! { .describe(#hint) });

        field_exprs.push(quote! {
            .field(#key, <#ty as #krate::Describe>::schema() #describe)
        });
    }

    let name = &input.ident;
    let name_str = name.unraw().to_string();

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(#krate::Describe));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Describe for #name #ty_generics #where_clause {
            const NAME: &'static str = #name_str;

            fn schema() -> #krate::SchemaNode {
                #krate::SchemaNode::object()
                    #(#field_exprs)*
            }

            #[allow(unused_variables)]
            fn restore_skipped(&mut self, prior: &mut Self) {
                #(#restores)*
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_rules_match_serde() {
        let cases = [
            ("lowercase", "favourite_food"),
            ("snake_case", "favourite_food"),
            ("UPPERCASE", "FAVOURITE_FOOD"),
            ("SCREAMING_SNAKE_CASE", "FAVOURITE_FOOD"),
            ("PascalCase", "FavouriteFood"),
            ("camelCase", "favouriteFood"),
            ("kebab-case", "favourite-food"),
            ("SCREAMING-KEBAB-CASE", "FAVOURITE-FOOD"),
        ];
        for (rule, expected) in cases {
            assert_eq!(
                apply_rename_rule(rule, "favourite_food").as_deref(),
                Some(expected),
                "rule {rule}"
            );
        }
    }

    #[test]
    fn unknown_rename_rule() {
        assert_eq!(apply_rename_rule("Title Case", "name"), None);
    }

    #[test]
    fn pascal_case_single_word() {
        assert_eq!(to_pascal_case("age"), "Age");
    }

    #[test]
    fn expands_hints_and_names() {
        let input: DeriveInput = syn::parse_quote! {
            #[serde(rename_all = "PascalCase")]
            struct Dog {
                #[pneuma("a dog name")]
                name: String,
                #[serde(rename = "Years")]
                age: u8,
                #[serde(skip)]
                cache: u32,
            }
        };
        let tokens = expand_describe(input).unwrap().to_string();
        assert!(tokens.contains("\"Name\""));
        assert!(tokens.contains("\"a dog name\""));
        assert!(tokens.contains("\"Years\""));
        assert!(!tokens.contains("\"Cache\""));
        assert!(tokens.contains(":: pneuma :: Describe"));
    }

    #[test]
    fn skipped_fields_are_restored_not_described() {
        let input: DeriveInput = syn::parse_quote! {
            struct Session {
                name: String,
                #[serde(skip)]
                cache_hits: u64,
            }
        };
        let tokens = expand_describe(input).unwrap().to_string();
        assert!(!tokens.contains("\"cache_hits\""));
        assert!(tokens.contains("mem :: swap"));
        assert!(tokens.contains("prior . cache_hits"));
        assert!(tokens.contains("< String as :: pneuma :: Describe > :: restore_skipped"));
    }

    #[test]
    fn rejects_flatten() {
        let input: DeriveInput = syn::parse_quote! {
            struct Outer {
                name: String,
                #[serde(flatten)]
                inner: Inner,
            }
        };
        let err = expand_describe(input).unwrap_err();
        assert!(err.to_string().contains("flatten"));
    }

    #[test]
    fn rejects_transparent() {
        let input: DeriveInput = syn::parse_quote! {
            #[serde(transparent)]
            struct Meters {
                value: f64,
            }
        };
        let err = expand_describe(input).unwrap_err();
        assert!(err.to_string().contains("transparent"));
    }

    #[test]
    fn crate_path_override() {
        let input: DeriveInput = syn::parse_quote! {
            #[pneuma(crate = "pneuma_schema")]
            struct Empty;
        };
        let tokens = expand_describe(input).unwrap().to_string();
        assert!(tokens.contains("pneuma_schema :: Describe"));
    }

    #[test]
    fn rejects_enums() {
        let input: DeriveInput = syn::parse_quote! {
            enum Mood { Happy, Sad }
        };
        let err = expand_describe(input).unwrap_err();
        assert!(err.to_string().contains("structs with named fields"));
    }

    #[test]
    fn rejects_tuple_structs() {
        let input: DeriveInput = syn::parse_quote! {
            struct Pair(u8, u8);
        };
        assert!(expand_describe(input).is_err());
    }
}
