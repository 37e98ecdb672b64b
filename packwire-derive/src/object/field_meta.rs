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

//! Field-level metadata parsing for `#[packwire(...)]` attributes:
//! - `skip`: leave the field out of the payload
//! - `compress`: write an integer field with the tagged compression codec

use syn::Field;

/// Represents parsed `#[packwire(...)]` field attributes
#[derive(Debug, Clone, Default)]
pub struct PackFieldMeta {
    pub skip: bool,
    pub compress: bool,
}

/// Parse `#[packwire(...)]` attributes from a field
pub fn parse_field_meta(field: &Field) -> syn::Result<PackFieldMeta> {
    let mut meta = PackFieldMeta::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("packwire") {
            continue;
        }

        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("skip") {
                meta.skip = true;
            } else if nested.path.is_ident("compress") {
                meta.compress = true;
            } else {
                return Err(nested.error("unknown packwire field attribute"));
            }
            Ok(())
        })?;
    }

    if meta.skip && meta.compress {
        return Err(syn::Error::new_spanned(
            field,
            "a skipped field can not also be compressed",
        ));
    }
    Ok(meta)
}
