//! In-pipeline email message transformations.
//!
//! Transformers run after an [`OutgoingEmail`] is assembled and before
//! dispatch, allowing the body to be rewritten or the header set to be
//! replaced in place. The mail pipeline invokes each transformer
//! synchronously with the request record; none of them performs I/O beyond
//! an in-process settings read. Concrete implementations live in the
//! [`transformers`](crate::transformers) module.

use tracing::debug;

use crate::OutgoingEmail;

/// Trait for message transformers that modify emails in the pipeline.
///
/// Transformers run once per outgoing email, in registration order, with no
/// reentrancy: a transformer never dispatches mail itself.
pub trait MessageTransformer: Send + Sync {
    /// Transforms an outgoing email in place.
    fn transform(&self, mail: &mut OutgoingEmail);

    /// Returns the name of this transformer.
    fn name(&self) -> &str;
}

/// Applies a list of transformers to an email in order.
pub fn apply_transformers(transformers: &[Box<dyn MessageTransformer>], mail: &mut OutgoingEmail) {
    for transformer in transformers {
        debug!(transformer = transformer.name(), "Applying transformer");
        transformer.transform(mail);
    }
}
