#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("provider directory request failed: {0}")]
    Transport(reqwest::Error),
    #[error("provider directory returned an unreadable response: {0}")]
    Decode(reqwest::Error),
}

pub type PlacesResult<T> = std::result::Result<T, PlacesError>;
