mod metadata;
mod timestamp;
mod untyped;
mod value;

pub use metadata::Metadata;
pub use timestamp::Timestamp;
pub use untyped::{AnyValue, UntypedMap};
pub use value::{MetadataValue, ValueType};
