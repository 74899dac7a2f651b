//! Remote job envelope and builders.
//!
//! A job is one unit of ad-hoc remote work: built fresh per call,
//! transmitted once to the exec endpoint, discarded after the response is
//! read. It carries no identity beyond the single request/response exchange
//! and is never stored. `result` stays empty until the remote completes the
//! operation and echoes the job back.

use fleetlink_common::WirePayload;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a job operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobResource {
    Node,
    Pod,
    Deployment,
    StatefulSet,
    DaemonSet,
    Service,
    Namespace,
    NetworkPolicy,
    /// Tail logs of a pod instead of describing a resource.
    Logs,
}

impl fmt::Display for JobResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobResource::Node => "node",
            JobResource::Pod => "pod",
            JobResource::Deployment => "deployment",
            JobResource::StatefulSet => "stateful-set",
            JobResource::DaemonSet => "daemon-set",
            JobResource::Service => "service",
            JobResource::Namespace => "namespace",
            JobResource::NetworkPolicy => "network-policy",
            JobResource::Logs => "logs",
        };
        write!(f, "{}", s)
    }
}

/// One ad-hoc remote-execution request/response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Target the operation runs against.
    pub target_id: String,
    /// Host within the target.
    pub host_id: String,
    pub resource: JobResource,
    /// Namespace scope, for namespaced resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Name of the resource the operation addresses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Opaque operation output, populated only by the remote on completion.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub result: Vec<u8>,
}

impl Job {
    fn new(target_id: &str, host_id: &str, resource: JobResource) -> Self {
        Job {
            target_id: target_id.to_string(),
            host_id: host_id.to_string(),
            resource,
            namespace: None,
            name: None,
            result: Vec::new(),
        }
    }

    /// Describe a cluster node.
    pub fn node_details(target_id: &str, host_id: &str, node: &str) -> Self {
        let mut job = Self::new(target_id, host_id, JobResource::Node);
        job.name = Some(node.to_string());
        job
    }

    /// Describe a pod.
    pub fn pod_details(target_id: &str, host_id: &str, namespace: &str, pod: &str) -> Self {
        Self::namespaced(target_id, host_id, JobResource::Pod, namespace, pod)
    }

    /// Describe a deployment.
    pub fn deployment_details(
        target_id: &str,
        host_id: &str,
        namespace: &str,
        name: &str,
    ) -> Self {
        Self::namespaced(target_id, host_id, JobResource::Deployment, namespace, name)
    }

    /// Describe a stateful set.
    pub fn stateful_set_details(
        target_id: &str,
        host_id: &str,
        namespace: &str,
        name: &str,
    ) -> Self {
        Self::namespaced(target_id, host_id, JobResource::StatefulSet, namespace, name)
    }

    /// Describe a daemon set.
    pub fn daemon_set_details(
        target_id: &str,
        host_id: &str,
        namespace: &str,
        name: &str,
    ) -> Self {
        Self::namespaced(target_id, host_id, JobResource::DaemonSet, namespace, name)
    }

    /// Describe a service.
    pub fn service_details(target_id: &str, host_id: &str, namespace: &str, name: &str) -> Self {
        Self::namespaced(target_id, host_id, JobResource::Service, namespace, name)
    }

    /// Describe a namespace.
    pub fn namespace_details(target_id: &str, host_id: &str, namespace: &str) -> Self {
        let mut job = Self::new(target_id, host_id, JobResource::Namespace);
        job.name = Some(namespace.to_string());
        job
    }

    /// Describe a network policy.
    pub fn network_policy_details(
        target_id: &str,
        host_id: &str,
        namespace: &str,
        name: &str,
    ) -> Self {
        Self::namespaced(target_id, host_id, JobResource::NetworkPolicy, namespace, name)
    }

    /// Tail the logs of a pod.
    pub fn logs(target_id: &str, host_id: &str, namespace: &str, pod: &str) -> Self {
        Self::namespaced(target_id, host_id, JobResource::Logs, namespace, pod)
    }

    fn namespaced(
        target_id: &str,
        host_id: &str,
        resource: JobResource,
        namespace: &str,
        name: &str,
    ) -> Self {
        let mut job = Self::new(target_id, host_id, resource);
        job.namespace = Some(namespace.to_string());
        job.name = Some(name.to_string());
        job
    }
}

impl WirePayload for Job {
    const PAYLOAD_TYPE: &'static str = "job";
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_job_builders() {
        let job = Job::node_details("lab", "lab", "node4");
        assert_eq!(job.resource, JobResource::Node);
        assert_eq!(job.name.as_deref(), Some("node4"));
        assert!(job.namespace.is_none());
        assert!(job.result.is_empty());

        let job = Job::logs("lab", "lab", "fleet", "collector-0");
        assert_eq!(job.resource, JobResource::Logs);
        assert_eq!(job.namespace.as_deref(), Some("fleet"));
        assert_eq!(job.name.as_deref(), Some("collector-0"));
    }

    #[test]
    fn test_job_wire_shape_omits_empty_result() {
        let job = Job::pod_details("lab", "lab", "kube-system", "kube-dns");
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["resource"], "pod");
        assert!(json.get("result").is_none());

        let mut done = job.clone();
        done.result = b"describe output".to_vec();
        let json = serde_json::to_value(&done).unwrap();
        assert!(json.get("result").is_some());
    }

    #[test]
    fn test_job_builders_are_deterministic() {
        assert_eq!(
            Job::service_details("lab", "lab", "kube-system", "kube-dns"),
            Job::service_details("lab", "lab", "kube-system", "kube-dns"),
        );
    }
}
