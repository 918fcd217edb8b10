//! End-to-end flows through the public API.
//!
//! Browsing runs against the in-memory `ScriptedSource` or a mockito server
//! speaking the catalog's JSON; collections persist to a temp directory.

mod browse_flow;
mod curation_flow;
