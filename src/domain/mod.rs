//! Domain types shared by the engine and its collaborators.
mod run;

pub use run::RunConfig;
