pub mod descriptor;
pub mod owner;

pub use descriptor::{UnitDescriptor, UnitDescriptorBuilder};
pub use owner::{Domain, Owner, Service};
