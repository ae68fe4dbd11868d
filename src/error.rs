//! Error types for connecting to the cluster and fetching a namespace snapshot
//!
//! Resolution and rendering never fail; everything here comes from the
//! outside world (kubeconfig, API server, user input).

/// Errors surfaced to the caller of the tree pipeline
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),

    #[error("namespace '{0}' not found")]
    NamespaceNotFound(String),

    #[error("error building kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("error inferring kubernetes configuration: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),

    #[error("error creating kubernetes client: {0}")]
    Client(#[source] kube::Error),

    #[error("error looking up namespace '{namespace}': {source}")]
    NamespaceLookup {
        namespace: String,
        #[source]
        source: kube::Error,
    },

    #[error("error fetching {kind}: {source}")]
    List {
        kind: &'static str,
        #[source]
        source: kube::Error,
    },
}

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;
