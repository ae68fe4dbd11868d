//! Namespace selection and validation

use crate::error::{TreeError, TreeResult};

/// Namespace used when neither the user nor the kubeconfig names one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Longest name the API server accepts for a namespace
const MAX_NAMESPACE_LEN: usize = 253;

/// Check that a namespace name is usable
pub fn validate_namespace(namespace: &str) -> TreeResult<()> {
    if namespace.is_empty() {
        return Err(TreeError::InvalidNamespace(
            "namespace cannot be empty".to_string(),
        ));
    }

    if namespace.len() > MAX_NAMESPACE_LEN {
        return Err(TreeError::InvalidNamespace(format!(
            "namespace name cannot be longer than {} characters",
            MAX_NAMESPACE_LEN
        )));
    }

    Ok(())
}

/// Pick the namespace to render
///
/// Precedence: the `-n` flag, then the configured default, then the
/// namespace of the current kubeconfig context, then `default`.
/// Only the explicit flag is validated; the other sources fall through when empty.
pub fn resolve_namespace(
    flag: Option<&str>,
    configured: Option<&str>,
    context_namespace: Option<&str>,
) -> TreeResult<String> {
    if let Some(namespace) = flag {
        validate_namespace(namespace)?;
        return Ok(namespace.to_string());
    }

    let namespace = configured
        .filter(|ns| !ns.is_empty())
        .or(context_namespace.filter(|ns| !ns.is_empty()))
        .unwrap_or(DEFAULT_NAMESPACE);

    validate_namespace(namespace)?;
    Ok(namespace.to_string())
}
