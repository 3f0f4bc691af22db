use thiserror::Error;

use crate::domain::Magnitude;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("magnitude range {min}..={max} is empty")]
    EmptyMagnitudeRange { min: Magnitude, max: Magnitude },
    #[error("unknown theme '{0}', expected 'light' or 'dark'")]
    UnknownTheme(String),
}
