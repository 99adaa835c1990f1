//! Named nullable wrappers, one per supported base type.
//!
//! Wrappers whose behaviour is exactly the generic container's are type
//! aliases of [`Nullable`](crate::Nullable). The rest embed a container and
//! override the boundary methods that differ; call those through
//! [`NullableValue`](crate::NullableValue).
//!
//! `types::String` shadows the standard string type when glob-imported, so
//! prefer importing wrappers by name.

mod byte;
mod bytes;
mod int;
mod json;
mod scalar;
mod time;
mod uint;
mod uuid;

pub use self::byte::Byte;
pub use self::bytes::Bytes;
pub use self::int::{Int, Int8, Int16, Int32, Int64};
pub use self::json::Json;
pub use self::scalar::{Bool, Float32, Float64, String};
pub use self::time::Time;
pub use self::uint::{Uint, Uint8, Uint16, Uint32, Uint64};
pub use self::uuid::Uuid;
