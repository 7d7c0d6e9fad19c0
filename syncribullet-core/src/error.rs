use thiserror::Error;

use crate::catalog::CatalogError;
use crate::codec::CodecError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Config codec error: {0}")]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Field;
    use crate::provider::ProviderError;

    #[test]
    fn test_error_conversions() {
        let err: Error = CodecError::Empty(Field::SettingKey).into();
        assert_eq!(err.to_string(), "Config codec error: empty setting key");

        let err: Error = CatalogError::from(ProviderError::NotFound("x".to_string())).into();
        assert!(matches!(err, Error::Catalog(ref e) if e.is_upstream()));
    }
}
