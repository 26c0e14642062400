use thiserror::Error;

/// Errors surfaced by the fallible query APIs.
///
/// Reducers never return these. An action that does not apply to the
/// current state is logged and ignored so reduction stays total; only
/// lookups against a missing form or field produce an error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormStateError {
    #[error("form `{form}` is not tracked by the store")]
    FormNotFound { form: String },

    #[error("field `{field}` is not registered on form `{form}`")]
    FieldNotRegistered { form: String, field: String },
}
