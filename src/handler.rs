// ABOUTME: Scheduled invocation entry point for the recipe rotation
// ABOUTME: Wires config, store, selector, formatter and email sender into one run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Invocation handler
//!
//! A run selects and persists a batch, renders it and (unless dry-run) emails
//! it. Database failures are returned as errors; email failures are reported
//! inside the success response as a [`DeliveryOutcome`].

use crate::config::RotationConfig;
use crate::constants::env_keys;
use crate::database_plugins::factory::Database;
use crate::database_plugins::RecipeStore;
use crate::errors::{AppError, AppResult};
use crate::external::{
    deliver, DeliveryOutcome, EmailBody, EmailMessage, EmailSender, HttpEmailClient,
};
use crate::formatters::render_email_document;
use crate::selection::{RotationPath, RotationSelector};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

/// Per-invocation metadata supplied by the runtime
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Unique id for log correlation
    pub request_id: Uuid,
    /// When the runtime started this invocation
    pub invoked_at: DateTime<Utc>,
    /// Function or job name
    pub function_name: String,
    /// Select and persist but do not send email
    pub dry_run: bool,
}

impl InvocationContext {
    /// Fresh context for `function_name`
    #[must_use]
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            invoked_at: Utc::now(),
            function_name: function_name.into(),
            dry_run: false,
        }
    }

    /// Same context with email delivery disabled
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// `{ "statusCode": 200, "body": { ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    /// Always 200; failures are returned as `Err`
    pub status_code: u16,
    /// Run result
    pub body: ResponseBody,
}

/// Body of a successful invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    /// Selected recipe names in batch order
    pub message: Vec<String>,
    /// Rendered email document
    pub html: String,
    /// What happened to the email
    pub delivery: DeliveryOutcome,
    /// Which rotation path produced the batch
    pub rotation: RotationPath,
    /// Correlation id of this invocation
    pub request_id: Uuid,
}

/// Long-lived collaborators shared across invocations
#[derive(Clone)]
pub struct RotationResources {
    /// Recipe table access
    pub store: Arc<dyn RecipeStore>,
    /// Email delivery; `None` only for dry runs
    pub email: Option<Arc<dyn EmailSender>>,
    /// Loaded configuration
    pub config: RotationConfig,
}

impl RotationResources {
    /// Assemble resources from already-built collaborators
    #[must_use]
    pub fn new(
        store: Arc<dyn RecipeStore>,
        email: Option<Arc<dyn EmailSender>>,
        config: RotationConfig,
    ) -> Self {
        Self {
            store,
            email,
            config,
        }
    }

    /// Connect to the database and build the email client
    ///
    /// Email settings are validated before the database is touched. With
    /// `with_email` off no email client is built.
    ///
    /// # Errors
    ///
    /// Returns an error if email settings are incomplete, the HTTP client
    /// cannot be built, or the database connection/migration fails
    pub async fn from_config(config: RotationConfig, with_email: bool) -> AppResult<Self> {
        let email: Option<Arc<dyn EmailSender>> = if with_email {
            config.email.validate_for_delivery()?;
            Some(Arc::new(HttpEmailClient::new(&config.email)?))
        } else {
            None
        };

        let database = Database::connect(
            &config.database.url.to_connection_string(),
            config.database.auto_migrate,
        )
        .await?;
        info!(
            database.backend = database.backend_info(),
            database.url = %config.database.url,
            "recipe store ready"
        );

        Ok(Self::new(Arc::new(database), email, config))
    }

    /// Random source for one invocation
    #[must_use]
    pub fn rng(&self) -> StdRng {
        self.config
            .rng_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}

/// Run one rotation
///
/// `event` is the scheduler payload; its content does not affect the run.
///
/// # Errors
///
/// Returns an error if email is required but not configured, or if any
/// database operation fails
pub async fn lambda_handler(
    event: &Value,
    context: &InvocationContext,
    resources: &RotationResources,
) -> AppResult<InvocationResponse> {
    let span = info_span!(
        "rotation",
        request_id = %context.request_id,
        function = %context.function_name,
        dry_run = context.dry_run,
    );
    run_rotation(event, context, resources).instrument(span).await
}

async fn run_rotation(
    event: &Value,
    context: &InvocationContext,
    resources: &RotationResources,
) -> AppResult<InvocationResponse> {
    debug!(event = %event, invoked_at = %context.invoked_at, "invocation received");

    let sender = match (&resources.email, context.dry_run) {
        (_, true) => None,
        (Some(sender), false) => Some(Arc::clone(sender)),
        (None, false) => return Err(AppError::config_missing(env_keys::EMAIL_API_KEY)),
    };

    let selector = RotationSelector::new(resources.store.as_ref(), resources.config.selection);
    let mut rng = resources.rng();
    let batch = selector.select_batch(&mut rng).await?;

    let html = render_email_document(&batch.recipes);

    let delivery = match sender {
        Some(sender) => {
            let email = &resources.config.email;
            let message = EmailMessage {
                from: email.sender.clone(),
                to: email.recipients.clone(),
                subject: email.subject.clone(),
                body: EmailBody::Html(html.clone()),
            };
            deliver(sender.as_ref(), &message).await
        }
        None => DeliveryOutcome::Skipped {
            reason: "dry run".to_owned(),
        },
    };

    info!(
        batch.size = batch.len(),
        delivered = delivery.is_delivered(),
        "rotation complete"
    );

    Ok(InvocationResponse {
        status_code: 200,
        body: ResponseBody {
            message: batch.names(),
            html,
            delivery,
            rotation: batch.path,
            request_id: context.request_id,
        },
    })
}
