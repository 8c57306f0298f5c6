//! Errors raised while loading card data, deck lists and rule configs.

use super::element::Element;

/// Failure to turn external data into engine types.
#[derive(Debug, thiserror::Error)]
pub enum CardDataError {
    /// A card database or deck list is not valid JSON for its schema.
    #[error("malformed card data: {0}")]
    Json(#[from] serde_json::Error),

    /// A rules configuration did not parse.
    #[error("malformed rules config: {0}")]
    Config(#[source] serde_json::Error),

    /// A deck list names a species the database does not contain.
    #[error("unknown species `{0}`")]
    UnknownSpecies(String),

    /// A deck list asks for energy cards of an element that has none.
    #[error("`{0}` has no energy cards")]
    NotAnEnergy(Element),
}
