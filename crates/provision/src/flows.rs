//! Provisioning flows: build, dispatch, report.
//!
//! Every flow is a single pass with no persisted intermediate state. A
//! transport or remote failure is reported to the caller and aborts the
//! remaining steps of that flow; nothing here retries.

use crate::presets::DevicePreset;
use fleetlink_common::Result;
use fleetlink_dispatch::{Dispatcher, Pacer};
use fleetlink_routing::{AddressRegistry, ServiceArea};
use fleetlink_schema::{cluster_target, Ack, Job, PollingConfig, TargetList};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Outcome of a bulk device submission.
///
/// An empty preset expansion is a distinct no-op, not an error and not a
/// dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    /// Nothing to submit; no dispatch was attempted.
    Empty,
    /// One bulk payload was submitted and acknowledged.
    Submitted { count: usize, ack: Ack },
}

/// Report of a polling-configuration pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollingReport {
    /// Names of definitions the control service accepted.
    pub added: Vec<String>,
    /// Definitions that failed, with the error text. Only populated when
    /// the provisioner is configured to continue on error.
    pub failed: Vec<(String, String)>,
}

/// Runs the provisioning flows against the control services.
///
/// Pacing between successive submissions and the fail-fast-vs-continue
/// choice are explicit configuration, injected at construction.
pub struct Provisioner {
    dispatcher: Dispatcher,
    pacer: Arc<dyn Pacer>,
    fail_fast: bool,
}

impl Provisioner {
    pub fn new(dispatcher: Dispatcher, pacer: Arc<dyn Pacer>, fail_fast: bool) -> Self {
        Provisioner {
            dispatcher,
            pacer,
            fail_fast,
        }
    }

    /// Provision one k8s cluster target.
    pub async fn add_cluster(&self, cluster_id: &str) -> Result<Ack> {
        let target = cluster_target(cluster_id)?;
        let ack: Ack = self
            .dispatcher
            .submit(
                &AddressRegistry::targets_control(ServiceArea::Default),
                &target,
            )
            .await?;
        info!("added cluster target {}", target.target_id);
        Ok(ack)
    }

    /// Expand a preset and submit the whole list as one bulk payload to the
    /// bulk targets area.
    ///
    /// Additive only: re-submission replaces whole objects, and targets
    /// absent from a new batch are not reconciled away here.
    pub async fn add_devices(&self, preset: DevicePreset) -> Result<BulkOutcome> {
        let targets = preset.expand()?;
        if targets.is_empty() {
            info!("preset {} expanded to no devices", preset);
            return Ok(BulkOutcome::Empty);
        }

        let list = TargetList::new(targets);
        let count = list.len();
        info!("adding {} targets from preset {}", count, preset);

        let ack: Ack = self
            .dispatcher
            .submit(&AddressRegistry::targets_control(ServiceArea::Bulk), &list)
            .await?;
        info!("bulk submission acknowledged, {} accepted", ack.accepted);
        Ok(BulkOutcome::Submitted { count, ack })
    }

    /// Submit each polling-configuration definition individually, pacing
    /// between submissions.
    ///
    /// With fail-fast (the default wiring), the first failure aborts the
    /// remaining iteration; otherwise failures are collected in the report
    /// and the pass continues.
    pub async fn add_polling_configs(&self, catalogue: &[PollingConfig]) -> Result<PollingReport> {
        let mut report = PollingReport::default();

        for (i, config) in catalogue.iter().enumerate() {
            if i > 0 {
                self.pacer.pause().await;
            }
            let outcome: Result<Ack> = self
                .dispatcher
                .submit(&AddressRegistry::polling_control(), config)
                .await;
            match outcome {
                Ok(_) => {
                    info!("added polling config {}", config.name);
                    report.added.push(config.name.clone());
                }
                Err(e) if self.fail_fast => {
                    error!("polling config {} failed: {}", config.name, e);
                    return Err(e);
                }
                Err(e) => {
                    warn!("polling config {} failed, continuing: {}", config.name, e);
                    report.failed.push((config.name.clone(), e.to_string()));
                }
            }
        }

        Ok(report)
    }

    /// Execute one remote job and return the operation's output.
    ///
    /// Errors from the dispatcher propagate unchanged; on any error no
    /// result is produced.
    pub async fn execute_job(&self, job: &Job) -> Result<Vec<u8>> {
        let completed: Job = self
            .dispatcher
            .submit(&AddressRegistry::exec(ServiceArea::Default), job)
            .await?;
        Ok(completed.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fleetlink_common::Error;
    use fleetlink_dispatch::{Envelope, IntervalPacer, NoPacer, Transport};
    use fleetlink_schema::builtin_polling_configs;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FakeTransport {
        sent: Mutex<Vec<(String, Envelope)>>,
        responses: Mutex<Vec<Result<Envelope>>>,
    }

    impl FakeTransport {
        fn replying(responses: Vec<Result<Envelope>>) -> Arc<Self> {
            Arc::new(FakeTransport {
                sent: Mutex::new(Vec::new()),
                responses: Mutex::new(responses),
            })
        }

        fn routes(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(route, _)| route.clone())
                .collect()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, route: &str, request: &Envelope) -> Result<Envelope> {
            self.sent
                .lock()
                .unwrap()
                .push((route.to_string(), request.clone()));
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn ack(accepted: usize) -> Result<Envelope> {
        Ok(Envelope::encode(&Ack {
            accepted,
            message: None,
        })
        .unwrap())
    }

    fn provisioner(transport: Arc<FakeTransport>, fail_fast: bool) -> Provisioner {
        Provisioner::new(
            Dispatcher::new(transport),
            Arc::new(NoPacer),
            fail_fast,
        )
    }

    #[tokio::test]
    async fn test_add_cluster_dispatches_to_per_item_area() {
        let transport = FakeTransport::replying(vec![ack(1)]);
        let prov = provisioner(transport.clone(), true);

        prov.add_cluster("lab").await.unwrap();

        assert_eq!(transport.routes(), vec!["0/targets"]);
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[0].1.kind, "target");
    }

    #[tokio::test]
    async fn test_base_preset_is_one_bulk_dispatch_of_nineteen() {
        let transport = FakeTransport::replying(vec![ack(19)]);
        let prov = provisioner(transport.clone(), true);

        let outcome = prov.add_devices(DevicePreset::Base).await.unwrap();
        match outcome {
            BulkOutcome::Submitted { count, ack } => {
                assert_eq!(count, 19);
                assert_eq!(ack.accepted, 19);
            }
            BulkOutcome::Empty => panic!("expected a submission"),
        }

        // One payload, to the bulk area.
        assert_eq!(transport.routes(), vec!["91/targets"]);
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[0].1.kind, "target-list");
        let list: TargetList = serde_json::from_value(sent[0].1.body.clone()).unwrap();
        assert_eq!(list.list[0].target_id, "10.20.30.1");
        assert_eq!(list.list[18].target_id, "10.20.30.19");
    }

    #[tokio::test]
    async fn test_empty_expansion_is_a_no_op() {
        let transport = FakeTransport::replying(vec![]);
        let prov = provisioner(transport.clone(), true);

        let outcome = prov.add_devices(DevicePreset::Scale(0)).await.unwrap();
        assert_eq!(outcome, BulkOutcome::Empty);
        assert!(transport.routes().is_empty());
    }

    #[tokio::test]
    async fn test_polling_configs_fail_fast_aborts_iteration() {
        let transport = FakeTransport::replying(vec![
            ack(1),
            Err(Error::Transport("connection refused".to_string())),
        ]);
        let prov = provisioner(transport.clone(), true);

        let catalogue = builtin_polling_configs();
        assert!(catalogue.len() > 2);
        let err = prov.add_polling_configs(&catalogue).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));

        // Two dispatches, then the abort; the rest of the catalogue was
        // never attempted.
        assert_eq!(transport.routes(), vec!["0/polling", "0/polling"]);
    }

    #[tokio::test]
    async fn test_polling_configs_can_continue_and_collect_failures() {
        let catalogue = builtin_polling_configs();
        let mut responses: Vec<Result<Envelope>> = vec![Ok(Envelope::error("duplicate"))];
        for _ in 1..catalogue.len() {
            responses.push(ack(1));
        }
        let transport = FakeTransport::replying(responses);
        let prov = provisioner(transport.clone(), false);

        let report = prov.add_polling_configs(&catalogue).await.unwrap();
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, catalogue[0].name);
        assert_eq!(report.added.len(), catalogue.len() - 1);
        assert_eq!(transport.routes().len(), catalogue.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_configs_pace_between_submissions() {
        let catalogue = builtin_polling_configs();
        let responses = catalogue.iter().map(|_| ack(1)).collect();
        let transport = FakeTransport::replying(responses);
        let prov = Provisioner::new(
            Dispatcher::new(transport),
            Arc::new(IntervalPacer::new(Duration::from_secs(1))),
            true,
        );

        let before = tokio::time::Instant::now();
        prov.add_polling_configs(&catalogue).await.unwrap();
        // One pause between each pair of submissions, none after the last.
        assert_eq!(
            before.elapsed(),
            Duration::from_secs(catalogue.len() as u64 - 1)
        );
    }

    #[tokio::test]
    async fn test_execute_job_returns_result_bytes() {
        let mut completed = Job::node_details("lab", "lab", "node4");
        completed.result = b"node description".to_vec();
        let transport =
            FakeTransport::replying(vec![Ok(Envelope::encode(&completed).unwrap())]);
        let prov = provisioner(transport.clone(), true);

        let job = Job::node_details("lab", "lab", "node4");
        let result = prov.execute_job(&job).await.unwrap();
        assert_eq!(result, b"node description");
        assert_eq!(transport.routes(), vec!["0/exec"]);
    }

    #[tokio::test]
    async fn test_execute_job_propagates_transport_error_without_result() {
        let transport = FakeTransport::replying(vec![Err(Error::Transport(
            "connection reset".to_string(),
        ))]);
        let prov = provisioner(transport, true);

        let job = Job::logs("lab", "lab", "fleet", "collector-0");
        let err = prov.execute_job(&job).await.unwrap_err();
        match err {
            Error::Transport(msg) => assert_eq!(msg, "connection reset"),
            other => panic!("expected Transport, got {other}"),
        }
    }
}
