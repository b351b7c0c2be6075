use crate::common_models::access_credential::AccessCredential;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConsumeOutcome {
    /// This call performed the false -> true transition.
    Consumed(AccessCredential),
    AlreadyConsumed(AccessCredential),
    /// Left untouched because it was past its validity.
    Expired(AccessCredential),
}
