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

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, Fields, Ident};

/// Only fieldless enums are supported; the discriminant is the payload.
pub fn check_fieldless(data_enum: &DataEnum, name: &Ident) -> syn::Result<()> {
    if data_enum.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "PackObject enums need at least one variant",
        ));
    }
    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "PackObject only supports enums without variant fields",
            ));
        }
    }
    Ok(())
}

pub fn gen_reserved_space(repr: &Ident) -> TokenStream {
    quote! {
        ::packwire_core::types::SIZE_OF_TAG + ::std::mem::size_of::<#repr>()
    }
}

pub fn gen_write_data(data_enum: &DataEnum, repr: &Ident) -> TokenStream {
    let variant_idents: Vec<_> = data_enum.variants.iter().map(|v| &v.ident).collect();
    quote! {
        let discriminant: #repr = match self {
            #(
                Self::#variant_idents => Self::#variant_idents as #repr,
            )*
        };
        ::packwire_core::serializer::enum_::write(discriminant, context)
    }
}

pub fn gen_read_data(data_enum: &DataEnum, repr: &Ident, name: &Ident) -> TokenStream {
    let variant_idents: Vec<_> = data_enum.variants.iter().map(|v| &v.ident).collect();
    let name_str = name.to_string();
    quote! {
        let discriminant = ::packwire_core::serializer::enum_::read::<#repr>(context)?;
        #(
            if discriminant == Self::#variant_idents as #repr {
                return Ok(Self::#variant_idents);
            }
        )*
        Err(::packwire_core::serializer::enum_::unknown_discriminant(#name_str, discriminant))
    }
}

pub fn gen_shape(repr: &Ident) -> TokenStream {
    quote! {
        ::packwire_core::shape::Shape::Enum(
            <#repr as ::packwire_core::serializer::enum_::EnumBits>::REPR
        )
    }
}
