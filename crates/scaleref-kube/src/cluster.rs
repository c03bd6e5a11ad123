//! `kube::Api` backed accessor and owner lookup.

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::ReplicationController;
use kube::api::ListParams;
use kube::core::NamespaceResourceScope;
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use tracing::debug;

use scaleref_analyzer::{ClusterAccessor, OwnerLookup};
use scaleref_core::{AccessError, AccessResult, AutoscalerObject, OwnerReference};

use crate::convert;

/// Await `fut` for at most `timeout`, mapping kube errors into [`AccessError`].
pub async fn bounded<T, F>(timeout: Duration, fut: F) -> AccessResult<T>
where
    F: Future<Output = Result<T, kube::Error>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(AccessError::Api(e.to_string())),
        Err(_) => Err(AccessError::Timeout(timeout)),
    }
}

/// Cluster access through a shared kube client.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
    timeout: Duration,
}

impl KubeCluster {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Connect using the ambient kubeconfig or in-cluster service account.
    pub async fn try_default(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::try_default()
            .await
            .context("failed to create kube client")?;
        debug!(timeout_ms = timeout.as_millis() as u64, "kube client ready");
        Ok(Self::new(client, timeout))
    }

    fn namespaced<K>(&self, namespace: &str) -> Api<K>
    where
        K: Resource<Scope = NamespaceResourceScope>,
        <K as Resource>::DynamicType: Default,
    {
        Api::namespaced(self.client.clone(), namespace)
    }

    async fn exists<K>(&self, namespace: &str, name: &str) -> AccessResult<bool>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        <K as Resource>::DynamicType: Default,
    {
        let api = self.namespaced::<K>(namespace);
        let found = bounded(self.timeout, api.get_metadata_opt(name)).await?;
        Ok(found.is_some())
    }

    async fn owners_of<K>(&self, namespace: &str, name: &str) -> AccessResult<Option<Vec<OwnerReference>>>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        <K as Resource>::DynamicType: Default,
    {
        let api = self.namespaced::<K>(namespace);
        let found = bounded(self.timeout, api.get_metadata_opt(name)).await?;
        Ok(found.map(|partial| convert::owner_references(partial.metadata.owner_references)))
    }
}

#[async_trait]
impl ClusterAccessor for KubeCluster {
    async fn list_autoscalers(&self, namespace: Option<&str>) -> AccessResult<Vec<AutoscalerObject>> {
        let api: Api<HorizontalPodAutoscaler> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let list = bounded(self.timeout, api.list(&ListParams::default())).await?;
        Ok(list.items.into_iter().map(convert::autoscaler).collect())
    }

    async fn deployment_exists(&self, namespace: &str, name: &str) -> AccessResult<bool> {
        self.exists::<Deployment>(namespace, name).await
    }

    async fn replication_controller_exists(&self, namespace: &str, name: &str) -> AccessResult<bool> {
        self.exists::<ReplicationController>(namespace, name).await
    }

    async fn replica_set_exists(&self, namespace: &str, name: &str) -> AccessResult<bool> {
        self.exists::<ReplicaSet>(namespace, name).await
    }

    async fn stateful_set_exists(&self, namespace: &str, name: &str) -> AccessResult<bool> {
        self.exists::<StatefulSet>(namespace, name).await
    }
}

#[async_trait]
impl OwnerLookup for KubeCluster {
    async fn owner_references(
        &self,
        kind: &str,
        namespace: &str,
        name: &str,
    ) -> AccessResult<Option<Vec<OwnerReference>>> {
        match kind {
            "Deployment" => self.owners_of::<Deployment>(namespace, name).await,
            "ReplicaSet" => self.owners_of::<ReplicaSet>(namespace, name).await,
            "StatefulSet" => self.owners_of::<StatefulSet>(namespace, name).await,
            "DaemonSet" => self.owners_of::<DaemonSet>(namespace, name).await,
            "ReplicationController" => self.owners_of::<ReplicationController>(namespace, name).await,
            "Job" => self.owners_of::<Job>(namespace, name).await,
            "CronJob" => self.owners_of::<CronJob>(namespace, name).await,
            "HorizontalPodAutoscaler" => {
                self.owners_of::<HorizontalPodAutoscaler>(namespace, name).await
            }
            _ => {
                debug!(%kind, %namespace, %name, "owner kind not resolvable");
                Ok(None)
            }
        }
    }
}
