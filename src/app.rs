pub mod audio;
pub mod events;
pub mod launch;
pub mod profile;
pub mod settings;
pub mod state;
