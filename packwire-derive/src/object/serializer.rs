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

use crate::object::{derive_enum, read, write};
use crate::util::{enum_repr, source_fields};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_quote, Data, DeriveInput, GenericParam};

pub fn derive_serializer(ast: &DeriveInput) -> TokenStream {
    let result = match &ast.data {
        Data::Struct(s) => derive_struct(ast, &s.fields),
        Data::Enum(e) => derive_enum(ast, e),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &ast.ident,
            "PackObject can not be derived for unions",
        )),
    };
    match result {
        Ok(ts) => ts.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_struct(
    ast: &DeriveInput,
    fields: &syn::Fields,
) -> syn::Result<proc_macro2::TokenStream> {
    let name = &ast.ident;
    let source_fields = source_fields(fields)?;

    // every type parameter must itself be serializable
    let mut generics = ast.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(tp) = param {
            tp.bounds
                .push(parse_quote!(::packwire_core::serializer::Serializer));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let write_ts = write::gen_write();
    let write_data_ts = write::gen_write_data(&source_fields);
    let read_ts = read::gen_read();
    let read_data_ts = read::gen_read_data(fields, &source_fields);
    let null_encoding_ts = read::gen_null_encoding();
    let shape_ts = write::gen_shape(&name.to_string(), &source_fields);
    let reserved_space_ts = write::gen_reserved_space(&source_fields);

    Ok(quote! {
        impl #impl_generics ::packwire_core::serializer::Serializer for #name #ty_generics #where_clause {
            #[inline(always)]
            fn write(
                &self,
                context: &mut ::packwire_core::resolver::context::WriteContext,
            ) -> ::std::result::Result<(), ::packwire_core::error::Error> {
                #write_ts
            }

            #[allow(unused_variables)]
            fn write_data(
                &self,
                context: &mut ::packwire_core::resolver::context::WriteContext,
            ) -> ::std::result::Result<(), ::packwire_core::error::Error> {
                #write_data_ts
            }

            #[inline(always)]
            fn read(
                context: &mut ::packwire_core::resolver::context::ReadContext,
            ) -> ::std::result::Result<Self, ::packwire_core::error::Error> {
                #read_ts
            }

            #[allow(unused_variables)]
            fn read_data(
                context: &mut ::packwire_core::resolver::context::ReadContext,
            ) -> ::std::result::Result<Self, ::packwire_core::error::Error> {
                #read_data_ts
            }

            fn null_encoding() -> ::packwire_core::serializer::NullEncoding {
                #null_encoding_ts
            }

            fn shape() -> ::packwire_core::shape::Shape {
                #shape_ts
            }

            fn reserved_space() -> usize {
                #reserved_space_ts
            }
        }
    })
}

fn derive_enum(
    ast: &DeriveInput,
    data_enum: &syn::DataEnum,
) -> syn::Result<proc_macro2::TokenStream> {
    let name = &ast.ident;
    derive_enum::check_fieldless(data_enum, name)?;
    let repr = enum_repr(&ast.attrs)?;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let write_data_ts = derive_enum::gen_write_data(data_enum, &repr);
    let read_data_ts = derive_enum::gen_read_data(data_enum, &repr, name);
    let shape_ts = derive_enum::gen_shape(&repr);
    let reserved_space_ts = derive_enum::gen_reserved_space(&repr);

    Ok(quote! {
        impl #impl_generics ::packwire_core::serializer::Serializer for #name #ty_generics #where_clause {
            fn write_data(
                &self,
                context: &mut ::packwire_core::resolver::context::WriteContext,
            ) -> ::std::result::Result<(), ::packwire_core::error::Error> {
                #write_data_ts
            }

            fn read_data(
                context: &mut ::packwire_core::resolver::context::ReadContext,
            ) -> ::std::result::Result<Self, ::packwire_core::error::Error> {
                #read_data_ts
            }

            fn shape() -> ::packwire_core::shape::Shape {
                #shape_ts
            }

            fn reserved_space() -> usize {
                #reserved_space_ts
            }
        }
    })
}
