//! data_runtime: data schemas and loaders for the survival sim.
//!
//! Species stat blocks, resource archetypes, weapon/tool specs and telemetry
//! settings live as TOML under the workspace `data/config/` directory. This
//! crate stays free of sim types; the sim converts configs into its own
//! component structs on spawn.

pub mod loader;

pub mod configs {
    pub mod resources;
    pub mod species;
    pub mod telemetry;
    pub mod weapons;
}
