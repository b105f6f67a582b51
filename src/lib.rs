// ParcelGuard: contraband screening for shipment descriptions
//
// This is the library root. The screening core is pure and synchronous;
// everything else is the caller side (policy, output, config) used by the CLI.

pub mod config;
pub mod manifest;
pub mod output;
pub mod screening;
