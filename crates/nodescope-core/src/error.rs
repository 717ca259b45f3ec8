use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeScopeError {
    #[error("Unexpected response shape from nodes API")]
    UnexpectedShape,

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NodeScopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            NodeScopeError::UnexpectedShape.to_string(),
            "Unexpected response shape from nodes API"
        );
        assert_eq!(
            NodeScopeError::Config("bad interval".to_string()).to_string(),
            "Config error: bad interval"
        );
    }
}
