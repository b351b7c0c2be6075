//! The visitor access lifecycle: submission, resident decision, credential
//! minting, gate presentation and expiry.
//!
//! Request states move `PENDING -> {GRANTED, DENIED, EXPIRED}` and never back.
//! A granted request carries exactly one credential, which moves
//! `ISSUED -> {CONSUMED, EXPIRED}`. Both clocks are evaluated when read, so
//! correctness never depends on the expiry sweep having run.
//!
//! Every transition is a single compare-and-swap against storage; the service
//! itself holds no locks and can be shared freely between tasks.

use std::sync::Arc;

use estate_crypto::imp::utilities::generate_random_seed_16;
use estate_providers::{
    access_credential_storage::{model::ConsumeOutcome, AccessCredentialStorage},
    clock::Clock,
    common_models::{
        access_credential::{AccessCredential, AccessCredentialId},
        document::{DocumentBundle, DocumentRef},
        resident::{EstateReference, ResidentReference},
        visit::{Decision, VisitMode, VisitRequest, VisitRequestId, VisitStatus},
    },
    credential_codec::{CredentialCodec, TokenClaims},
    document_storage::DocumentStorage,
    notification::{
        model::{CredentialDelivery, NotificationKind, NotificationPayload, NotificationTarget},
        NotificationDispatcher,
    },
    pin_validation::PinValidator,
    resident_directory::ResidentDirectory,
    visit_request_storage::{
        model::{CasOutcome, VisitRequestFilter},
        VisitRequestStorage,
    },
};
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

use crate::config::VisitConfig;
use crate::service::error::{
    ConflictError, DependencyError, NotFoundError, ValidationError, VisitServiceError,
};

use self::dto::{
    AdmittedVisit, PresentationOutcome, RejectReason, SubmissionMode, SubmitVisitRequest,
    VisitRecord,
};

pub mod dto;


/// Storage the lifecycle writes to.
#[derive(Clone)]
pub struct VisitStores {
    pub visit_requests: Arc<dyn VisitRequestStorage>,
    pub access_credentials: Arc<dyn AccessCredentialStorage>,
}

/// External services the lifecycle consumes.
#[derive(Clone)]
pub struct Collaborators {
    pub pin_validator: Arc<dyn PinValidator>,
    pub resident_directory: Arc<dyn ResidentDirectory>,
    pub document_storage: Arc<dyn DocumentStorage>,
    pub notification_dispatcher: Arc<dyn NotificationDispatcher>,
}

pub struct VisitService {
    stores: VisitStores,
    collaborators: Collaborators,
    credential_codec: Arc<dyn CredentialCodec>,
    clock: Arc<dyn Clock>,
    config: VisitConfig,
}

impl VisitService {
    pub fn new(
        stores: VisitStores,
        collaborators: Collaborators,
        credential_codec: Arc<dyn CredentialCodec>,
        clock: Arc<dyn Clock>,
        config: VisitConfig,
    ) -> Self {
        Self {
            stores,
            collaborators,
            credential_codec,
            clock,
            config,
        }
    }

    /// Stores a captured identity or vehicle document and returns its handle
    /// for use in a [`SubmitVisitRequest`].
    pub async fn upload_document(&self, content: Vec<u8>) -> Result<DocumentRef, VisitServiceError> {
        Ok(self
            .collaborators
            .document_storage
            .store(content)
            .await
            .map_err(DependencyError::from)?)
    }

    pub async fn submit_request(
        &self,
        request: SubmitVisitRequest,
    ) -> Result<VisitRequest, VisitServiceError> {
        let SubmitVisitRequest {
            estate,
            mode,
            travel_type,
            documents,
            unit,
            mut guest,
        } = request;

        let documents =
            DocumentBundle::from_submission(documents, travel_type).map_err(ValidationError::from)?;

        let mode = match mode {
            SubmissionMode::Pin { pin } => {
                if pin.trim().is_empty() {
                    return Err(ValidationError::MissingPin.into());
                }

                let validation = self
                    .collaborators
                    .pin_validator
                    .validate(&pin, &estate)
                    .await
                    .map_err(|error| {
                        warn!(%estate, %error, "PIN validation unavailable");
                        DependencyError::from(error)
                    })?;

                if !validation.valid {
                    info!(%estate, %unit, "PIN rejected");
                    return Err(ValidationError::InvalidPin.into());
                }

                if let Some(validated) = validation.guest_info {
                    guest.name = validated.name;
                    if validated.purpose.is_some() {
                        guest.purpose = validated.purpose;
                    }
                }

                VisitMode::Pin { pin_presented: pin }
            }
            SubmissionMode::Qr => VisitMode::Qr,
        };

        let resident = self
            .collaborators
            .resident_directory
            .resident_for_unit(&unit, &estate)
            .await
            .map_err(|error| {
                warn!(%estate, %unit, %error, "resident directory unavailable");
                DependencyError::from(error)
            })?
            .ok_or_else(|| NotFoundError::Unit(unit.to_owned()))?;

        let now = self.clock.now();
        let visit_request = VisitRequest {
            id: VisitRequestId::new_random(),
            estate,
            mode,
            travel_type,
            documents: Some(documents),
            unit,
            guest,
            resident: resident.reference,
            resident_name: resident.display_name,
            status: VisitStatus::Pending,
            created_at: now,
            decided_at: None,
            decided_by: None,
            expires_at: now + self.config.request_window,
            version: 0,
        };

        self.stores
            .visit_requests
            .create(visit_request.to_owned())
            .await?;

        info!(
            visit_request_id = %visit_request.id,
            mode = visit_request.mode.name(),
            travel_type = %visit_request.travel_type,
            estate = %visit_request.estate,
            unit = %visit_request.unit,
            "visit request submitted"
        );

        self.dispatch(
            NotificationTarget::Resident(visit_request.resident.to_owned()),
            NotificationKind::NewVisitRequest,
            notification_payload(&visit_request, None),
        );

        Ok(visit_request)
    }

    pub async fn decide(
        &self,
        id: &VisitRequestId,
        decision: Decision,
        acting_resident: &ResidentReference,
    ) -> Result<VisitRequest, VisitServiceError> {
        let mut current = self.get_visit_request(id).await?;

        let (decided, now) = loop {
            let now = self.clock.now();
            if let Err(error) = ensure_decidable(&current, now) {
                if error == ConflictError::RequestExpired && current.status == VisitStatus::Pending {
                    if let Err(error) = self.persist_expiry(current).await {
                        warn!(visit_request_id = %id, %error, "failed to persist expiry");
                    }
                }
                return Err(error.into());
            }

            if &current.resident != acting_resident {
                warn!(
                    visit_request_id = %id,
                    %acting_resident,
                    "decision refused: resident does not own the visit request"
                );
                return Err(VisitServiceError::NotAuthorized(acting_resident.to_owned()));
            }

            let mut updated = current.to_owned();
            updated.status = decision.resulting_status();
            updated.decided_at = Some(now);
            updated.decided_by = Some(acting_resident.to_owned());
            updated.documents = None;

            match self
                .stores
                .visit_requests
                .compare_and_swap(current.version, updated)
                .await?
            {
                CasOutcome::Swapped(decided) => break (decided, now),
                CasOutcome::Conflict(latest) => {
                    debug!(visit_request_id = %id, "decision raced with another writer");
                    current = latest;
                }
            }
        };

        info!(
            visit_request_id = %id,
            status = %decided.status,
            "visit request decided"
        );

        self.release_documents(id, current.documents).await;

        let credential = match decision {
            Decision::Grant => Some(self.mint_credential(&decided, now).await?),
            Decision::Deny => None,
        };

        let kind = match decision {
            Decision::Grant => NotificationKind::VisitGranted,
            Decision::Deny => NotificationKind::VisitDenied,
        };
        self.dispatch(
            NotificationTarget::Visitor {
                contact: decided.guest.contact.to_owned(),
            },
            kind,
            notification_payload(&decided, credential.as_ref()),
        );

        Ok(decided)
    }

    /// Status with lazy expiry applied; performs no writes.
    pub async fn current_status(&self, id: &VisitRequestId) -> Result<VisitStatus, VisitServiceError> {
        let request = self.get_visit_request(id).await?;

        Ok(request.status_at(self.clock.now()))
    }

    pub async fn get_visit_request(
        &self,
        id: &VisitRequestId,
    ) -> Result<VisitRequest, VisitServiceError> {
        Ok(self
            .stores
            .visit_requests
            .get(id)
            .await?
            .ok_or(NotFoundError::VisitRequest(*id))?)
    }

    pub async fn get_credential(
        &self,
        id: &VisitRequestId,
    ) -> Result<Option<AccessCredential>, VisitServiceError> {
        Ok(self
            .stores
            .access_credentials
            .get_by_visit_request(id)
            .await?)
    }

    /// Validates a scanned token and, if it is presentable, consumes it.
    ///
    /// Storage failures are errors; every other refusal is a
    /// [`PresentationOutcome::Reject`].
    pub async fn present_credential(
        &self,
        token: &str,
    ) -> Result<PresentationOutcome, VisitServiceError> {
        let token = token.trim();

        let Ok(claims) = self.credential_codec.decode(token) else {
            return Ok(reject(RejectReason::Malformed));
        };

        let credential = match self
            .stores
            .access_credentials
            .get_by_visit_request(&claims.visit_request_id)
            .await?
        {
            Some(credential) if credential.token == token => credential,
            _ => return Ok(reject(RejectReason::NotFound)),
        };

        let Some(visit_request) = self
            .stores
            .visit_requests
            .get(&credential.visit_request_id)
            .await?
        else {
            return Ok(reject(RejectReason::NotFound));
        };

        let now = self.clock.now();
        if credential.is_expired_at(now) {
            return Ok(reject(RejectReason::Expired));
        }
        if credential.consumed {
            return Ok(reject(RejectReason::AlreadyUsed));
        }

        Ok(
            match self
                .stores
                .access_credentials
                .consume(&credential.id, now)
                .await?
            {
                ConsumeOutcome::Consumed(consumed) => {
                    info!(
                        visit_request_id = %visit_request.id,
                        unit = %visit_request.unit,
                        "visitor admitted"
                    );
                    PresentationOutcome::Admit(AdmittedVisit {
                        visit_request_id: visit_request.id,
                        guest_name: visit_request.guest.name,
                        unit: visit_request.unit,
                        travel_type: visit_request.travel_type,
                        consumed_at: consumed.consumed_at.unwrap_or(now),
                    })
                }
                ConsumeOutcome::AlreadyConsumed(_) => reject(RejectReason::AlreadyUsed),
                ConsumeOutcome::Expired(_) => reject(RejectReason::Expired),
            },
        )
    }

    /// Requests still awaiting this resident's decision, newest first.
    pub async fn list_pending_for_resident(
        &self,
        resident: &ResidentReference,
        estate: &EstateReference,
    ) -> Result<Vec<VisitRequest>, VisitServiceError> {
        let now = self.clock.now();

        let requests = self
            .stores
            .visit_requests
            .list(VisitRequestFilter {
                estate: Some(estate.to_owned()),
                resident: Some(resident.to_owned()),
                stored_status: Some(VisitStatus::Pending),
                ..Default::default()
            })
            .await?;

        Ok(requests
            .into_iter()
            .filter(|request| request.status_at(now) == VisitStatus::Pending)
            .collect())
    }

    /// The estate's most recent requests with their current status.
    pub async fn visit_history(
        &self,
        estate: &EstateReference,
        limit: usize,
    ) -> Result<Vec<VisitRecord>, VisitServiceError> {
        let now = self.clock.now();

        let requests = self
            .stores
            .visit_requests
            .list(VisitRequestFilter {
                estate: Some(estate.to_owned()),
                limit: Some(limit),
                ..Default::default()
            })
            .await?;

        Ok(requests
            .into_iter()
            .map(|request| VisitRecord {
                status: request.status_at(now),
                request,
            })
            .collect())
    }

    /// Persists EXPIRED for stored-PENDING requests past their window and
    /// releases their documents. Returns how many requests it expired.
    ///
    /// Readers already observe these requests as expired, and `decide`
    /// persists expiry for any request it finds past its window. Running it
    /// repeatedly is harmless.
    pub async fn sweep_expired(&self) -> Result<usize, VisitServiceError> {
        let now = self.clock.now();

        let candidates = self
            .stores
            .visit_requests
            .list(VisitRequestFilter {
                stored_status: Some(VisitStatus::Pending),
                expires_before: Some(now),
                ..Default::default()
            })
            .await?;

        let mut expired = 0;
        for candidate in candidates {
            if self.persist_expiry(candidate).await? {
                expired += 1;
            }
        }

        if expired > 0 {
            info!(expired, "expiry sweep persisted expired visit requests");
        }

        Ok(expired)
    }

    /// Conditional write of EXPIRED for a stored-PENDING request, releasing
    /// its documents. Returns `false` when another writer got there first.
    async fn persist_expiry(&self, request: VisitRequest) -> Result<bool, VisitServiceError> {
        let mut updated = request.to_owned();
        updated.status = VisitStatus::Expired;
        updated.documents = None;

        match self
            .stores
            .visit_requests
            .compare_and_swap(request.version, updated)
            .await?
        {
            CasOutcome::Swapped(_) => {
                debug!(visit_request_id = %request.id, "visit request expired");
                self.release_documents(&request.id, request.documents).await;
                Ok(true)
            }
            CasOutcome::Conflict(_) => {
                debug!(visit_request_id = %request.id, "visit request changed before expiry was persisted");
                Ok(false)
            }
        }
    }

    async fn mint_credential(
        &self,
        visit_request: &VisitRequest,
        issued_at: OffsetDateTime,
    ) -> Result<AccessCredential, VisitServiceError> {
        let token = self.credential_codec.encode(&TokenClaims {
            visit_request_id: visit_request.id,
            issued_at,
            nonce: generate_random_seed_16(),
        })?;

        let credential = AccessCredential {
            id: AccessCredentialId::new_random(),
            visit_request_id: visit_request.id,
            token,
            issued_at,
            valid_until: issued_at + self.config.credential_window,
            consumed: false,
            consumed_at: None,
        };

        self.stores
            .access_credentials
            .create(credential.to_owned())
            .await
            .map_err(|error| {
                error!(
                    visit_request_id = %visit_request.id,
                    %error,
                    "granted visit request has no credential"
                );
                error
            })?;

        debug!(
            visit_request_id = %visit_request.id,
            valid_until = %credential.valid_until,
            "access credential issued"
        );

        Ok(credential)
    }

    async fn release_documents(&self, id: &VisitRequestId, documents: Option<DocumentBundle>) {
        let Some(documents) = documents else {
            return;
        };

        for document in documents.refs() {
            if let Err(error) = self.collaborators.document_storage.delete(document).await {
                warn!(visit_request_id = %id, %error, "failed to release document");
            }
        }
    }

    fn dispatch(
        &self,
        target: NotificationTarget,
        kind: NotificationKind,
        payload: NotificationPayload,
    ) {
        let dispatcher = self.collaborators.notification_dispatcher.clone();

        tokio::spawn(async move {
            if let Err(error) = dispatcher.notify(&target, kind, &payload).await {
                warn!(
                    %kind,
                    visit_request_id = %payload.visit_request_id,
                    %error,
                    "notification dropped"
                );
            }
        });
    }
}

fn ensure_decidable(request: &VisitRequest, now: OffsetDateTime) -> Result<(), ConflictError> {
    match request.status_at(now) {
        VisitStatus::Pending => Ok(()),
        VisitStatus::Expired => Err(ConflictError::RequestExpired),
        status => Err(ConflictError::AlreadyDecided(status)),
    }
}

fn reject(reason: RejectReason) -> PresentationOutcome {
    warn!(%reason, "credential presentation rejected");
    PresentationOutcome::Reject(reason)
}

fn notification_payload(
    visit_request: &VisitRequest,
    credential: Option<&AccessCredential>,
) -> NotificationPayload {
    NotificationPayload {
        visit_request_id: visit_request.id,
        estate: visit_request.estate.to_owned(),
        unit: visit_request.unit.to_owned(),
        guest_name: visit_request.guest.name.to_owned(),
        credential: credential.map(|credential| CredentialDelivery {
            token: credential.token.to_owned(),
            valid_until: credential.valid_until,
        }),
    }
}
