// src/ingest/providers/mod.rs
pub mod ecal_ics;

pub use ecal_ics::EcalIcsProvider;
