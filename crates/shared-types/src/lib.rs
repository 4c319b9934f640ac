//! # Shared Types Crate
//!
//! Primitives shared by every Accord subsystem: signing identities, linear
//! identities, and concrete record version references.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem primitive types are defined
//!   here and nowhere else.
//! - **Raw key material**: public keys and signatures are plain byte arrays;
//!   cryptographic operations live in `shared-crypto`.

pub mod entities;

pub use entities::*;
