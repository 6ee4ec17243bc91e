//! The static type universe, interning and subtyping for cadence.

pub mod composite;
pub mod location;
pub mod primitive;
pub mod static_type;
pub mod subtype;
pub mod type_id;

pub use composite::{CompositeId, CompositeInfo, FieldInfo, FunctionMember, InterfaceId, InterfaceInfo, NominalRegistry, RequiredFunction};
pub use location::{Address, Location};
pub use primitive::Primitive;
pub use static_type::{to_static, StaticLocation, StaticType};
pub use subtype::SubtypeChecker;
pub use type_id::{FunctionShape, ParamInfo, TypeData, TypeId, TypeInterner};
