//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient), one per sandbox
//! record type.

pub mod line_group_client;
pub mod opportunity_client;
pub mod quote_client;
pub mod quote_line_client;

pub use line_group_client::*;
pub use opportunity_client::*;
pub use quote_client::*;
pub use quote_line_client::*;

use actor_framework::FrameworkError;

/// Unwraps an entity's own error from a [`FrameworkError`], so callers can match on it. Anything
/// else becomes the resource error's communication variant via `From<String>`.
pub(crate) fn recover_entity_error<E>(e: FrameworkError) -> E
where
    E: std::error::Error + From<String> + 'static,
{
    match e {
        FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
            Ok(err) => *err,
            Err(other) => E::from(other.to_string()),
        },
        other => E::from(other.to_string()),
    }
}
