use {
    serde::{Deserialize, Serialize},
    strum_macros::Display,
};

/// Discrete trading direction derived from moving-average comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
pub enum Signal {
    #[strum(to_string = "+1")]
    Long,
    #[default]
    #[strum(to_string = "0")]
    Flat,
    #[strum(to_string = "-1")]
    Short,
}
