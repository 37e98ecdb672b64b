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

use crate::util::{ok_self_construction, SourceField};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Fields;

pub fn gen_read() -> TokenStream {
    quote! {
        ::packwire_core::serializer::struct_::read::<Self>(context)
    }
}

/// Fields are read into locals in wire order, then moved into `Self`.
pub fn gen_read_data(fields: &Fields, source_fields: &[SourceField]) -> TokenStream {
    let declare_ts = source_fields.iter().map(|f| {
        let ty = &f.field.ty;
        let binding = f.binding();
        if f.meta.skip {
            quote! {
                let #binding: #ty = ::std::default::Default::default();
            }
        } else if f.meta.compress {
            quote! {
                let #binding = ::packwire_core::serializer::compressed::read::<#ty>(context)?;
            }
        } else {
            quote! {
                let #binding = <#ty as ::packwire_core::serializer::Serializer>::read(context)?;
            }
        }
    });
    let field_inits: Vec<_> = source_fields
        .iter()
        .map(|f| {
            let binding = f.binding();
            f.field_init(quote! { #binding })
        })
        .collect();
    let construction = ok_self_construction(fields, &field_inits);
    quote! {
        #(#declare_ts)*
        #construction
    }
}

pub fn gen_null_encoding() -> TokenStream {
    quote! {
        ::packwire_core::serializer::NullEncoding::Presence
    }
}
