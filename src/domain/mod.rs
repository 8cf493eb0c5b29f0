// Domain layer: form models and ports. No HTTP or config dependencies here.

pub mod model;
pub mod ports;
