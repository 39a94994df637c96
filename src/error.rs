use std::fmt;

#[derive(Debug)]
pub enum RedrawError {
    Markup(roxmltree::Error),
    MissingRoot,
}

impl fmt::Display for RedrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedrawError::Markup(err) => write!(f, "markup failed to parse: {}", err),
            RedrawError::MissingRoot => write!(f, "no <svg> root element found"),
        }
    }
}

impl std::error::Error for RedrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RedrawError::Markup(err) => Some(err),
            _ => None,
        }
    }
}

impl From<roxmltree::Error> for RedrawError {
    fn from(value: roxmltree::Error) -> Self {
        RedrawError::Markup(value)
    }
}
