use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Unknown sort option: {0}")]
    UnknownSort(String),
}
