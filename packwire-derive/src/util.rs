// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::object::field_meta::{parse_field_meta, PackFieldMeta};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Field, Fields, Ident, Index};

/// A struct field with its position and parsed `#[packwire(..)]` metadata.
///
/// For tuple structs `field_name` is the position as a string.
pub struct SourceField<'a> {
    pub original_index: usize,
    pub field: &'a Field,
    pub field_name: String,
    pub meta: PackFieldMeta,
}

impl<'a> SourceField<'a> {
    /// `self.name` or `self.0`.
    pub fn member(&self) -> TokenStream {
        match &self.field.ident {
            Some(ident) => quote! { self.#ident },
            None => {
                let index = Index::from(self.original_index);
                quote! { self.#index }
            }
        }
    }

    /// The local binding the field is read into.
    pub fn binding(&self) -> Ident {
        format_ident!("__{}", self.field_name)
    }

    /// `name: value` for named fields, `value` for tuple fields.
    pub fn field_init(&self, value: TokenStream) -> TokenStream {
        match &self.field.ident {
            Some(ident) => quote! { #ident: #value },
            None => value,
        }
    }
}

/// Fields in declaration order, which is also the wire order.
pub fn source_fields(fields: &Fields) -> syn::Result<Vec<SourceField<'_>>> {
    fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let field_name = match &field.ident {
                Some(ident) => ident.unraw().to_string(),
                None => idx.to_string(),
            };
            Ok(SourceField {
                original_index: idx,
                field,
                field_name,
                meta: parse_field_meta(field)?,
            })
        })
        .collect()
}

/// `Ok(Self { .. })`, `Ok(Self(..))` or `Ok(Self)`.
pub fn ok_self_construction(fields: &Fields, field_inits: &[TokenStream]) -> TokenStream {
    match fields {
        Fields::Named(_) => quote! { Ok(Self { #(#field_inits),* }) },
        Fields::Unnamed(_) => quote! { Ok(Self( #(#field_inits),* )) },
        Fields::Unit => quote! { Ok(Self) },
    }
}

const REPR_TYPES: [&str; 8] = ["u8", "i8", "u16", "i16", "u32", "i32", "u64", "i64"];

/// The integer named by `#[repr(..)]`, or `i32` when the enum has none.
pub fn enum_repr(attrs: &[syn::Attribute]) -> syn::Result<Ident> {
    let mut repr = None;
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                if REPR_TYPES.contains(&ident.to_string().as_str()) {
                    repr = Some(ident.clone());
                    return Ok(());
                }
                if ident == "C" {
                    return Ok(());
                }
            }
            Err(meta.error("PackObject enums need an integer repr from u8 to i64"))
        })?;
    }
    Ok(repr.unwrap_or_else(|| format_ident!("i32")))
}
