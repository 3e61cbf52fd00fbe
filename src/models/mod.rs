// Module exports for models

pub mod settings;
