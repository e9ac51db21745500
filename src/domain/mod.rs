// Domain layer: query/response models, resource descriptors and ports.

pub mod filters;
pub mod model;
pub mod ports;
pub mod resource;
