// Domain layer: lexicon model, ports, and rendering services.

pub mod model;
pub mod ports;
pub mod services;
