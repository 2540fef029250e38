//! One load cycle: wait for the capabilities, fetch the sheet, map rows.

use crate::capability::{Sleeper, TabularSource};
use crate::error::LoadError;
use crate::readiness::{wait_until_ready, Probe, ReadinessPolicy};
use ssm_schools::{map_rows, MappedBatch};

/// Fetch the sheet at `url` and map it into schools.
pub async fn fetch_and_map<T: TabularSource + ?Sized>(
    source: &T,
    url: &str,
) -> Result<MappedBatch, LoadError> {
    let rows = source.fetch_rows(url).await?;
    log::info!("loader: fetched {} rows from {}", rows.len(), url);
    Ok(map_rows(&rows))
}

/// Run a full load.
///
/// `on_ready` runs once every probe is ready and before the fetch starts;
/// the app uses it to construct the map display. Any error it returns
/// aborts the load.
pub async fn load_schools<T, F>(
    probes: &[Probe<'_>],
    policy: &ReadinessPolicy,
    sleeper: &dyn Sleeper,
    on_ready: F,
    source: &T,
    url: &str,
) -> Result<MappedBatch, LoadError>
where
    T: TabularSource + ?Sized,
    F: FnOnce() -> Result<(), LoadError>,
{
    wait_until_ready(probes, policy, sleeper).await?;
    on_ready()?;
    fetch_and_map(source, url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityKind;
    use crate::config::RefreshPolicy;
    use crate::controller::{Controller, ViewState};
    use crate::testing::{FakeSource, VirtualSleeper};
    use chrono::Utc;
    use ssm_schools::tabular::{COL_LATITUDE, COL_LONGITUDE, COL_NAME, COL_STATUS};
    use ssm_schools::RawRow;
    use std::cell::Cell;

    fn rows() -> Vec<RawRow> {
        vec![
            RawRow::new(0)
                .with(COL_NAME, "Lincoln High School")
                .with(COL_LATITUDE, "40.585")
                .with(COL_LONGITUDE, "-73.968")
                .with(COL_STATUS, "Defined"),
            RawRow::new(1)
                .with(COL_NAME, "Broken Row")
                .with(COL_LATITUDE, "north")
                .with(COL_LONGITUDE, "-73.968")
                .with(COL_STATUS, "Defined"),
        ]
    }

    #[tokio::test]
    async fn load_waits_then_fetches_and_maps() {
        let source = FakeSource::with_responses(vec![Ok(rows())]);
        let sleeper = VirtualSleeper::default();
        let displays = Cell::new(0);
        let probes = [Probe::new(CapabilityKind::Tabular, || source.is_ready())];

        let batch = load_schools(
            &probes,
            &ReadinessPolicy::default(),
            &sleeper,
            || {
                displays.set(displays.get() + 1);
                Ok(())
            },
            &source,
            "./schools.csv",
        )
        .await
        .unwrap();

        assert_eq!(batch.schools.len(), 1);
        assert_eq!(batch.warnings.len(), 1);
        assert_eq!(displays.get(), 1);
        assert_eq!(*source.requested.borrow(), vec!["./schools.csv".to_string()]);
    }

    #[tokio::test]
    async fn capability_timeout_skips_fetch() {
        let source = FakeSource::with_responses(vec![Ok(rows())]);
        let sleeper = VirtualSleeper::default();
        let probes = [Probe::new(CapabilityKind::Map, || false)];

        let err = load_schools(
            &probes,
            &ReadinessPolicy::default(),
            &sleeper,
            || Ok(()),
            &source,
            "./schools.csv",
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            LoadError::CapabilityTimeout {
                capability: CapabilityKind::Map,
                ..
            }
        ));
        assert!(source.requested.borrow().is_empty());
    }

    #[tokio::test]
    async fn display_failure_aborts_load() {
        let source = FakeSource::with_responses(vec![Ok(rows())]);
        let err = load_schools(
            &[],
            &ReadinessPolicy::default(),
            &VirtualSleeper::default(),
            || Err(LoadError::Display("no container".to_string())),
            &source,
            "./schools.csv",
        )
        .await
        .unwrap_err();
        assert_eq!(err, LoadError::Display("no container".to_string()));
        assert!(source.requested.borrow().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_as_batch_error() {
        let source = FakeSource::with_responses(vec![Err(LoadError::Fetch("HTTP 404".to_string()))]);
        let err = fetch_and_map(&source, "./missing.csv").await.unwrap_err();
        assert_eq!(err, LoadError::Fetch("HTTP 404".to_string()));
    }

    #[tokio::test]
    async fn unavailable_capability_ends_in_error_state_not_loading() {
        let source = FakeSource::with_responses(vec![Ok(rows())]);
        source.ready.set(false);
        let sleeper = VirtualSleeper::default();
        let policy = ReadinessPolicy::default();
        let mut controller = Controller::new(RefreshPolicy::SingleFlight);

        let ticket = controller.begin_load().unwrap();
        let probes = [Probe::new(CapabilityKind::Tabular, || source.is_ready())];
        let result = load_schools(&probes, &policy, &sleeper, || Ok(()), &source, "./schools.csv").await;
        controller.complete_load(ticket, result, Utc::now());

        match controller.view() {
            ViewState::Error(failure) => assert!(failure.message.contains("CSV loader")),
            other => panic!("expected error view, got {:?}", other),
        }
        assert!(!controller.is_loading());
        assert!(sleeper.elapsed_ms() <= policy.bound_ms());
    }
}
