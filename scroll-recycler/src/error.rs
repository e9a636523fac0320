use std::borrow::Cow;

/// Configuration and lifecycle errors reported by the recycler.
///
/// None of these are fatal: by the time one is returned the recycler has already degraded to
/// a safe state (zero content extent, `on_spawned(0)` fired, no instance touched).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RecycleError {
    #[error("no template registered; call `register_template` before `setup`")]
    MissingTemplate,
    #[error("pools registered without a template for tags [{}]", .0.join(", "))]
    MissingTemplates(Vec<String>),
    #[error("no pool registered for tags [{}]", .0.join(", "))]
    UnregisteredTags(Vec<String>),
    #[error("viewport extent must be finite and non-negative (got {0})")]
    InvalidViewport(f32),
    #[error("cannot append before the recycler has been set up")]
    NotReady,
}

/// Error raised by instance code (`bind`, `dispose`, activation callbacks).
///
/// The recycler catches these per item: the failing item is logged and skipped, the rest of
/// the batch proceeds.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InstanceError {
    message: Cow<'static, str>,
}

impl InstanceError {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&'static str> for InstanceError {
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for InstanceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}
