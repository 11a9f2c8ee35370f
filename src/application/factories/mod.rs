mod registry_factory;

pub use registry_factory::{RegistryEndpoints, RegistryFactory, RegistrySet};
