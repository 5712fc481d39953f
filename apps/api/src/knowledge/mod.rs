// City knowledge: flat-file records with process-lifetime caching.
// Lookup failures are swallowed here; absence of knowledge is a valid state
// handled downstream by prompt degradation.

pub mod models;
pub mod store;
