use crate::{MetadataError, UntypedMap};

/// A value that can be built from the untyped attachments of a framework record.
pub trait Payload: Sized {
    fn make(from: &UntypedMap) -> Result<Self, MetadataError>;
}
