//! Composition root: concrete adapters are wired into services here.
//!
//! This is the ONLY place that imports concrete outbound adapters and provider types.

use std::sync::Arc;

use buildtrack_core::domain::{CalendarNote, TransitionPolicy};
use strum::IntoEnumIterator;
use time::{Date, UtcOffset};

use crate::{
    adapters::outbound::{
        memory::{demo_notes, demo_records},
        DisabledCompletionClient, GeminiCompletionClient, MemoryRecordStore,
    },
    app_state::AppState,
    config::{AssistantSettings, Settings, StoreSettings},
    domain::{
        ports::{
            inbound::AssistantService,
            outbound::{Collection, RecordStore},
        },
        services::{AssistantServiceImpl, InventoryServiceImpl, ProjectServiceImpl, QaqcServiceImpl},
        StoreError,
    },
};

/// Open the record store described by `settings`.
///
/// A snapshot file wins over demo seeding; with neither the store starts empty.
pub async fn create_store(
    settings: &StoreSettings,
    today: Date,
) -> Result<MemoryRecordStore, StoreError> {
    if let Some(path) = &settings.snapshot_path {
        tracing::info!("Loading record snapshot from {}", path.display());
        return MemoryRecordStore::from_snapshot_file(path).await;
    }

    if settings.seed_demo_data {
        tracing::info!("Seeding demo records");
        return Ok(MemoryRecordStore::with_records(demo_records(today)?));
    }

    Ok(MemoryRecordStore::new())
}

pub fn initial_notes(settings: &StoreSettings, today: Date) -> Vec<CalendarNote> {
    if settings.snapshot_path.is_none() && settings.seed_demo_data {
        demo_notes(today)
    } else {
        Vec::new()
    }
}

/// Pick the completion provider: Gemini when enabled and a key is present,
/// otherwise the disabled client.
pub fn assistant_service<S: RecordStore>(
    store: Arc<S>,
    settings: &AssistantSettings,
) -> Arc<dyn AssistantService> {
    let gemini = settings
        .enabled
        .then(|| GeminiCompletionClient::try_from_env(settings.model.as_deref()))
        .flatten();

    match gemini {
        Some(client) => Arc::new(AssistantServiceImpl::new(store, Arc::new(client))),
        None => {
            tracing::warn!("GEMINI_API_KEY not set or assistant disabled, AI features are off");
            Arc::new(AssistantServiceImpl::new(
                store,
                Arc::new(DisabledCompletionClient),
            ))
        }
    }
}

/// Build the application state around `store`.
pub fn create_app_state<S: RecordStore>(
    store: Arc<S>,
    assistant: Arc<dyn AssistantService>,
    policy: TransitionPolicy,
    notes: Vec<CalendarNote>,
    utc_offset: UtcOffset,
) -> AppState {
    AppState::new(
        Arc::new(ProjectServiceImpl::new(store.clone())),
        Arc::new(InventoryServiceImpl::new(store.clone())),
        Arc::new(QaqcServiceImpl::new(store, policy)),
        assistant,
        notes,
        utc_offset,
    )
}

/// Wire everything from configuration.
pub async fn from_settings(settings: &Settings) -> anyhow::Result<AppState> {
    let utc_offset = settings.application.utc_offset()?;
    let today = time::OffsetDateTime::now_utc().to_offset(utc_offset).date();

    let store = Arc::new(create_store(&settings.store, today).await?);
    for collection in Collection::iter() {
        tracing::info!("{}: {} records", collection, store.len(collection).await);
    }
    let assistant = assistant_service(store.clone(), &settings.assistant);
    tracing::info!(
        "QA/QC transition policy: {}",
        settings.qaqc.transition_policy
    );

    Ok(create_app_state(
        store,
        assistant,
        settings.qaqc.transition_policy,
        initial_notes(&settings.store, today),
        utc_offset,
    ))
}
