//! Metrics-event use cases. Pure delegation, like the audit log.

use stride_core::{
  metrics::{MetricsEvent, NewMetricsEvent},
  store::MetricsStore,
};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Append a metrics event.
pub async fn record_event<S>(
  store: &S,
  input: NewMetricsEvent,
) -> Result<MetricsEvent>
where
  S: MetricsStore,
{
  let event = store
    .record_event(input)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::debug!(
    event_id = %event.event_id,
    event_type = %event.event_type,
    "metrics event recorded"
  );
  Ok(event)
}

/// Events of one type, most recent first.
pub async fn list_events_by_type<S>(
  store: &S,
  event_type: &str,
  limit: Option<usize>,
) -> Result<Vec<MetricsEvent>>
where
  S: MetricsStore,
{
  store
    .events_by_type(event_type, limit)
    .await
    .map_err(|e| Error::Store(Box::new(e)))
}

/// Events attributed to `user_id`, most recent first.
pub async fn list_events_by_user<S>(
  store: &S,
  user_id: Uuid,
  limit: Option<usize>,
) -> Result<Vec<MetricsEvent>>
where
  S: MetricsStore,
{
  store
    .events_by_user(user_id, limit)
    .await
    .map_err(|e| Error::Store(Box::new(e)))
}
