// Domain layer: value objects and ports. No transport or framework types.

pub mod model;
pub mod ports;
