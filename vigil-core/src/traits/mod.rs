mod store;

pub use store::ThreatStore;
