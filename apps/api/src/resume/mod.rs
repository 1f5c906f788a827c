// Résumé engine: data model, normalizer, shareable codec, validator and scorer.
// Everything here except `handlers` is pure and synchronous; storage and HTTP
// concerns live in `storage`, `embed` and `routes`.

pub mod codec;
pub mod completeness;
pub mod export;
pub mod format;
pub mod handlers;
pub mod model;
pub mod normalize;
pub mod preview;
pub mod schema;
pub mod scoring;
pub mod sections;
#[cfg(test)]
pub(crate) mod strategies;
pub mod validation;
