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

//! # Packwire Derive Macros
//!
//! `#[derive(PackObject)]` implements `packwire_core::serializer::Serializer`
//! for structs and fieldless enums.
//!
//! **Structs** (named, tuple or unit) are written as a presence byte
//! followed by every field in declaration order. Field attributes:
//!
//! - `#[packwire(skip)]`: the field is not written and is rebuilt with
//!   `Default::default()` on read.
//! - `#[packwire(compress)]`: an integer field goes through the tagged
//!   compression codec instead of its fixed width.
//!
//! **Enums** must be fieldless. The discriminant is written compressed in
//! the width of the enum's `#[repr(..)]`, or `i32` when there is none.
//!
//! ```rust,ignore
//! use packwire_derive::PackObject;
//!
//! #[derive(PackObject, Debug, PartialEq)]
//! struct AccountMerge {
//!     account_id: i32,
//!     #[packwire(compress)]
//!     merge_id: i32,
//!     #[packwire(skip)]
//!     cached_label: String,
//! }
//!
//! #[derive(PackObject, Debug, PartialEq)]
//! #[repr(u8)]
//! enum Status {
//!     Active = 1,
//!     Suspended = 2,
//! }
//! ```
//!
//! Generated code refers to `::packwire_core`, so the deriving crate depends
//! on `packwire-core` directly.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod object;
mod util;

#[proc_macro_derive(PackObject, attributes(packwire))]
pub fn proc_macro_derive_pack_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    object::derive_serializer(&input)
}
