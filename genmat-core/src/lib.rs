#![no_std]

//! genmat core - feature model and configuration resolution
//!
//! This crate turns a partially specified, declarative matrix description
//! into a fully validated [`ResolvedConfig`], computes the result
//! configuration of arithmetic expressions and defines the element access
//! traits the storage crate implements.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod error;
pub mod features;
pub mod hashing;
pub mod layout;
pub mod parser;
pub mod promotion;
pub mod resolver;
pub mod spec;
pub mod traits;
pub mod validation;

pub use config::*;
pub use error::*;
pub use features::*;
pub use hashing::*;
pub use layout::*;
pub use parser::*;
pub use promotion::*;
pub use resolver::*;
pub use spec::*;
pub use traits::*;
