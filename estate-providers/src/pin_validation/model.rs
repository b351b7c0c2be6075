use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinValidation {
    pub valid: bool,
    #[serde(default)]
    pub guest_info: Option<ValidatedGuest>,
}

/// Identity held by the PIN service for the visitor the PIN was issued to.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedGuest {
    pub name: String,
    #[serde(default)]
    pub purpose: Option<String>,
}

impl PinValidation {
    pub fn rejected() -> Self {
        Self {
            valid: false,
            guest_info: None,
        }
    }
}
