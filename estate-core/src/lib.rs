//! **Estate Core** runs the visitor access lifecycle of a gated residential
//! estate.
//!
//! A visitor submits a request at the gate, either with a PIN the resident
//! issued in advance or by scanning the estate's QR code. The resident of the
//! target unit grants or denies it. A granted visitor receives a single-use
//! signed gate pass, which a scanner at the gate validates and consumes.
//!
//! ## Repository structure
//!
//! * **Crypto**: message authentication for gate pass tokens.
//! * **Providers**: storage, token codec, clock and the external
//!   collaborators (PIN validation, resident directory, document storage,
//!   notification dispatch), each behind a trait with at least one
//!   implementation.
//! * **Core**: the service layer orchestrating the providers.
//!
//! ## Getting started
//!
//! ```ignore rust
//! let core = EstateCore::new(None, collaborators, token_key)?;
//! let request = core.visit_service.submit_request(submission).await?;
//! let snapshot = core.status_service.describe(&request.id).await?;
//! ```
//!
//! See `demos/visit_example` for a complete walkthrough.

use std::sync::Arc;

use estate_crypto::{imp::mac::HmacSha256Mac, MacError};
use estate_providers::{
    access_credential_storage::imp::in_memory::InMemoryAccessCredentialStorage,
    clock::{imp::SystemClock, Clock},
    credential_codec::imp::hmac::HmacCredentialCodec,
    notification::imp::retry::{Params as RetryParams, RetryingNotificationDispatcher},
    visit_request_storage::imp::in_memory::InMemoryVisitRequestStorage,
};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::info;
use zeroize::Zeroizing;

use config::{EstateCoreConfig, SweepConfig};
use service::{
    expiry_sweep::spawn_expiry_sweep,
    status_service::StatusService,
    visit_service::{Collaborators, VisitService, VisitStores},
};

pub mod config;
pub mod service;

#[derive(Debug, Error)]
pub enum EstateCoreError {
    #[error("Invalid token key: `{0}`")]
    InvalidTokenKey(#[from] MacError),
    #[error("Invalid configuration: `{0}`")]
    InvalidConfig(String),
}

pub struct EstateCore {
    pub visit_service: Arc<VisitService>,
    pub status_service: StatusService,
    sweep_config: SweepConfig,
}

impl EstateCore {
    /// Core backed by in-memory storage and the system clock.
    ///
    /// `token_key` signs gate passes and must be at least 32 bytes. Passes
    /// signed under a different key are rejected as malformed.
    pub fn new(
        config: Option<EstateCoreConfig>,
        collaborators: Collaborators,
        token_key: Zeroizing<Vec<u8>>,
    ) -> Result<Self, EstateCoreError> {
        Self::with_stores(
            config,
            VisitStores {
                visit_requests: Arc::new(InMemoryVisitRequestStorage::new()),
                access_credentials: Arc::new(InMemoryAccessCredentialStorage::new()),
            },
            collaborators,
            token_key,
            Arc::new(SystemClock),
        )
    }

    pub fn with_stores(
        config: Option<EstateCoreConfig>,
        stores: VisitStores,
        collaborators: Collaborators,
        token_key: Zeroizing<Vec<u8>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, EstateCoreError> {
        let config = config.unwrap_or_default();
        config.validate().map_err(EstateCoreError::InvalidConfig)?;

        let credential_codec = Arc::new(HmacCredentialCodec::new(Arc::new(
            HmacSha256Mac::new(token_key)?,
        )));

        let notification_dispatcher = Arc::new(RetryingNotificationDispatcher::new(
            collaborators.notification_dispatcher,
            RetryParams {
                max_attempts: config.notification_config.max_attempts,
                attempt_timeout: config.notification_config.attempt_timeout,
                backoff: config.notification_config.retry_backoff,
            },
        ));

        let visit_service = Arc::new(VisitService::new(
            stores,
            Collaborators {
                notification_dispatcher,
                ..collaborators
            },
            credential_codec,
            clock.clone(),
            config.visit_config,
        ));

        let status_service = StatusService::new(
            visit_service.clone(),
            clock,
            config.status_config.poll_interval,
        );

        Ok(Self {
            visit_service,
            status_service,
            sweep_config: config.sweep_config,
        })
    }

    /// Starts the background expiry sweep on the current tokio runtime.
    /// Returns `None` when the sweep is disabled in configuration.
    pub fn spawn_expiry_sweep(&self) -> Option<JoinHandle<()>> {
        if !self.sweep_config.enabled {
            info!("expiry sweep disabled");
            return None;
        }

        info!(interval = ?self.sweep_config.interval, "starting expiry sweep");
        Some(spawn_expiry_sweep(
            self.visit_service.clone(),
            self.sweep_config.interval,
        ))
    }
}
