//! Typed error hierarchy for the coordinator.
//!
//! Graph lookups fail with `GraphError` from the common crate; the
//! registry wraps those together with its own lock failures.

use chainbuild_common::GraphError;
use thiserror::Error;

/// Errors from the sub-build registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Sub-build registry lock poisoned")]
    LockPoisoned,

    #[error("Failed to refresh sub-builds: {0}")]
    Graph(#[from] GraphError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_converts_from_graph_error() {
        let inner = GraphError::ProjectNotFound("deploy".to_string());
        let err: RegistryError = inner.into();
        match &err {
            RegistryError::Graph(GraphError::ProjectNotFound(name)) => {
                assert_eq!(name, "deploy");
            }
            _ => panic!("Expected RegistryError::Graph(ProjectNotFound(...))"),
        }
        assert!(err.to_string().contains("deploy"));
    }

    #[test]
    fn registry_error_lock_poisoned_is_matchable() {
        let err = RegistryError::LockPoisoned;
        assert!(matches!(err, RegistryError::LockPoisoned));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&RegistryError::LockPoisoned);
        assert_std_error(&RegistryError::Graph(GraphError::Lookup {
            project: "x".into(),
            message: "timeout".into(),
        }));
    }
}
