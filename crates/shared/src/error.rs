use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid city id `{raw}`: expected an integer")]
pub struct ParseCityIdError {
    pub raw: String,
}

impl ParseCityIdError {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}
