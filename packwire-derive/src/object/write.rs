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

use crate::util::SourceField;
use proc_macro2::TokenStream;
use quote::quote;

pub fn gen_reserved_space(fields: &[SourceField]) -> TokenStream {
    let reserved_size_expr: Vec<_> = fields
        .iter()
        .filter(|f| !f.meta.skip)
        .map(|f| {
            let ty = &f.field.ty;
            quote! {
                <#ty as ::packwire_core::serializer::Serializer>::reserved_space()
            }
        })
        .collect();
    quote! {
        ::packwire_core::serializer::struct_::reserved_space(&[#(#reserved_size_expr),*])
    }
}

pub fn gen_write() -> TokenStream {
    quote! {
        ::packwire_core::serializer::struct_::write(self, context)
    }
}

pub fn gen_write_data(fields: &[SourceField]) -> TokenStream {
    let write_ts = fields.iter().filter(|f| !f.meta.skip).map(|f| {
        let ty = &f.field.ty;
        let member = f.member();
        if f.meta.compress {
            quote! {
                ::packwire_core::serializer::compressed::write::<#ty>(&#member, context)?;
            }
        } else {
            quote! {
                <#ty as ::packwire_core::serializer::Serializer>::write(&#member, context)?;
            }
        }
    });
    quote! {
        #(#write_ts)*
        Ok(())
    }
}

/// Skipped fields have no shape; tuple fields are named by position. Field
/// shapes are built inside a closure so a self-referential type can stop at
/// its first repeat.
pub fn gen_shape(name: &str, fields: &[SourceField]) -> TokenStream {
    let field_shapes = fields.iter().filter(|f| !f.meta.skip).map(|f| {
        let ty = &f.field.ty;
        let field_name = &f.field_name;
        quote! {
            ::packwire_core::shape::FieldShape::new(
                #field_name,
                <#ty as ::packwire_core::serializer::Serializer>::shape(),
            )
        }
    });
    quote! {
        ::packwire_core::serializer::struct_::shape::<Self>(#name, || {
            vec![#(#field_shapes),*]
        })
    }
}
