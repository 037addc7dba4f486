//! Storage adapters selected by access tier.

pub mod discard;
pub mod tier;

pub use discard::DemoDiscardStore;
pub use tier::TierRoutedStore;
