//! In-memory adapters for the outbound ports. Suitable for embedding and
//! for the test harness; production deployments supply their own.

pub mod memory_notary;
pub mod memory_vault;

pub use memory_notary::InMemoryNotary;
pub use memory_vault::{InMemoryVault, VaultDistributor};
