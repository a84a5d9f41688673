//! Generated protobuf bindings for shared ZITADEL API types.
//!
//! **This module contains generated code. Do not edit these files manually.**
//!
//! Regenerate with: `cargo run -p xtask -- gen object` from the repo root.
//!
//! ## Lint Suppressions
//!
//! - `clippy::all`: Generated code may not follow all clippy rules
//! - `missing_docs`: Generated types may lack documentation
#![allow(clippy::all)]
#![allow(missing_docs)]

pub mod zitadel {
    pub mod v1 {
        include!("zitadel.v1.rs");
    }
}
