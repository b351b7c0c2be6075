use serde::{Deserialize, Serialize};

use super::macros::{impl_display, impl_from, impl_into, string_reference};

string_reference!(
    /// Resident who owns the decision on a visit request.
    ResidentReference
);
string_reference!(UnitReference);
string_reference!(EstateReference);

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentRecord {
    pub reference: ResidentReference,
    pub display_name: Option<String>,
}
