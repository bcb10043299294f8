#[cfg(any(test, feature = "test_utilities"))]
pub mod test_helpers;

mod error;
mod helpers;
mod identifiers;
mod models;
mod relations;
mod sql_reader;
mod storage;
mod subset;

pub use error::*;
pub use models::*;
pub use relations::*;
pub use sql_reader::*;
pub use storage::*;
pub use subset::*;

pub(crate) fn default<T: Default>() -> T {
    T::default()
}
