use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericArgument, Lit, Meta, PathArguments, Type};

/// Derive macro that describes the JSON input fields of a struct.
///
/// For each field, extracts:
/// - Field name (respects #[serde(rename = "...")])
/// - Kind ("amount", "date", "flag", or the Rust type name for enums and sections)
/// - Description (from doc comments)
///
/// Generates a `field_schema() -> &'static [InputField]` method. `InputField`
/// must be in scope where the derive is used.
#[proc_macro_derive(FieldSchema, attributes(serde))]
pub fn derive_field_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => panic!("FieldSchema only supports structs with named fields"),
        },
        _ => panic!("FieldSchema only supports structs"),
    };

    let field_entries = fields.iter().map(|field| {
        let field_name = field.ident.as_ref().unwrap().to_string();
        let json_name = get_serde_rename(&field.attrs).unwrap_or(field_name);
        let kind = type_kind(&field.ty);
        let desc = get_doc_comment(&field.attrs);

        quote! {
            InputField {
                name: #json_name,
                kind: #kind,
                description: #desc,
            }
        }
    });

    let expanded = quote! {
        impl #name {
            pub fn field_schema() -> &'static [InputField] {
                static SCHEMA: &[InputField] = &[
                    #(#field_entries),*
                ];
                SCHEMA
            }
        }
    };

    TokenStream::from(expanded)
}

fn get_serde_rename(attrs: &[syn::Attribute]) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        if let Meta::List(meta_list) = &attr.meta {
            let tokens = meta_list.tokens.to_string();
            // Only a bare `rename = "..."`, not `rename_all`
            if let Some(start) = tokens.find("rename =") {
                let rest = &tokens[start..];
                if let Some(eq_pos) = rest.find('=') {
                    let after_eq = rest[eq_pos + 1..].trim();
                    if let Some(stripped) = after_eq.strip_prefix('"') {
                        if let Some(end_quote) = stripped.find('"') {
                            return Some(stripped[..end_quote].to_string());
                        }
                    }
                }
            }
        }
    }
    None
}

fn get_doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value().trim().to_string());
                    }
                }
            }
            None
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn type_kind(ty: &Type) -> String {
    let Type::Path(type_path) = ty else {
        return "value".to_string();
    };
    let Some(segment) = type_path.path.segments.last() else {
        return "value".to_string();
    };

    // Option<T> is described by its inner type
    if segment.ident == "Option" {
        if let PathArguments::AngleBracketed(args) = &segment.arguments {
            if let Some(GenericArgument::Type(inner)) = args.args.first() {
                return type_kind(inner);
            }
        }
    }

    match segment.ident.to_string().as_str() {
        "Decimal" => "amount".to_string(),
        "NaiveDate" => "date".to_string(),
        "bool" => "flag".to_string(),
        other => other.to_string(),
    }
}
