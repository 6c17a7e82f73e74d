mod api;
mod api_type;
mod field;

pub use api::{Api, ApiError, Function, Module};
pub use api_type::{bare_name, ApiType, NumberType, TypeId};
pub use field::{Const, ConstValue, Field};
