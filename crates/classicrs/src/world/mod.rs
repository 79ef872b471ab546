pub mod automaton;
pub mod block;
pub mod grid;
pub mod persist;

pub use grid::World;

use std::path::Path;

use tracing::info;

/// Loads `world.gw` if it exists, otherwise generates a fresh flat world of the given
/// dimensions and writes it out immediately so a restart doesn't silently regenerate terrain.
pub fn load_or_generate(path: &Path, size_x: i16, size_y: i16, size_z: i16) -> std::io::Result<World> {
    if path.exists() {
        info!("loading world...");
        return persist::load(path);
    }

    info!("generating new world...");
    let world = World::generate(size_x, size_y, size_z);
    persist::save(path, &world)?;
    Ok(world)
}
