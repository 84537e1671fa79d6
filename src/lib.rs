// artm-constructor: configuration and initialization of additive regularized
// topic models.
//
// This is the library root. `constructor` composes the rest: topic naming,
// vocabulary weighting, regularizers, and scores, applied to a model through
// the `model` traits.

pub mod config;
pub mod constructor;
pub mod dictionary;
pub mod error;
pub mod logging;
pub mod model;
pub mod model_id;
pub mod output;
pub mod regularizers;
pub mod scores;
pub mod topics;
pub mod vocab;

pub use error::ConfigError;
