//! Cellular-automaton rules for water, lava, sponges and falling sand/gravel.
//!
//! Every mutation goes through [`set_block`], which mutates the grid, lets the sink broadcast
//! the change, then cascades into whatever follow-up update that cell triggers — exactly the
//! `server.SetBlock` -> `World.UpdateBlock` chain the reference server runs. Periodic sweeps
//! (`update_water`/`update_lava`) collect the cells to update before applying any of them, so a
//! block mutated mid-sweep can't change what later cells in the same sweep see — a different,
//! and simpler, guarantee than the reference server's reverse-order deferred execution.

use super::block::*;
use super::grid::World;

/// Capability a tick function needs: read/write access to the grid, plus a way to broadcast
/// a single block change to connected clients. Kept generic (rather than a direct back-pointer
/// to the server) so these functions don't need to know about players, channels or sockets.
pub trait BlockSink {
    fn world(&self) -> &World;
    fn world_mut(&mut self) -> &mut World;

    /// Broadcasts `block` having been placed at `(x, y, z)`. Does not recurse into
    /// [`update_block`] — callers that want the cascading behavior use [`set_block`].
    async fn broadcast_block(&mut self, x: i16, y: i16, z: i16, block: Block);
}

/// Mutates the grid, broadcasts the change, then runs whatever follow-up the new block state
/// triggers (sand falling, sponges drying out their surroundings, water ticking).
pub async fn set_block<S: BlockSink>(sink: &mut S, x: i16, y: i16, z: i16, block: Block) {
    sink.world_mut().set_block(x, y, z, block);
    sink.broadcast_block(x, y, z, block).await;
    Box::pin(update_block(sink, x, y, z)).await;
}

async fn update_block<S: BlockSink>(sink: &mut S, x: i16, y: i16, z: i16) {
    let block = sink.world().get_block(x, y, z);
    match block {
        BLOCK_SAND | BLOCK_GRAVEL => fall_sand(sink, x, y, z).await,
        BLOCK_SPONGE => tick_sponge(sink, x, y, z).await,
        BLOCK_WATER_FLOWING | BLOCK_WATER_STATIONARY => update_sponge(sink).await,
        _ => {}
    }

    if sink.world().valid(x, y + 1, z) {
        let above = sink.world().get_block(x, y + 1, z);
        if matches!(above, BLOCK_SAND | BLOCK_GRAVEL) {
            Box::pin(fall_sand(sink, x, y + 1, z)).await;
        }
    }
}

/// Drops a sand/gravel block straight down through air, water or lava until it lands on the
/// first solid support (or reaches bedrock level).
async fn fall_sand<S: BlockSink>(sink: &mut S, x: i16, y: i16, z: i16) {
    let block_type = sink.world().get_block(x, y, z);
    if !(sink.world().valid(x, y - 1, z) && can_sand_pass(sink.world().get_block(x, y - 1, z))) {
        return;
    }

    Box::pin(set_block(sink, x, y, z, BLOCK_AIR)).await;

    let mut ny = y - 1;
    while ny >= 0 {
        let under = sink.world().get_block(x, ny, z);
        if !can_sand_pass(under) && sink.world().valid(x, ny + 1, z) {
            Box::pin(set_block(sink, x, ny + 1, z, block_type)).await;
            return;
        }
        ny -= 1;
    }

    Box::pin(set_block(sink, x, 0, z, block_type)).await;
}

const NEIGHBORS: [(i16, i16, i16); 5] = [(0, -1, 0), (1, 0, 0), (-1, 0, 0), (0, 0, 1), (0, 0, -1)];

async fn tick_lava<S: BlockSink>(sink: &mut S, x: i16, y: i16, z: i16) {
    for (dx, dy, dz) in NEIGHBORS {
        let (nx, ny, nz) = (x + dx, y + dy, z + dz);
        if !sink.world().valid(nx, ny, nz) {
            continue;
        }
        match sink.world().get_block(nx, ny, nz) {
            BLOCK_AIR => Box::pin(set_block(sink, nx, ny, nz, BLOCK_LAVA_FLOWING)).await,
            BLOCK_WATER_FLOWING | BLOCK_WATER_STATIONARY => {
                Box::pin(set_block(sink, nx, ny, nz, BLOCK_STONE)).await
            }
            _ => {}
        }
    }
}

async fn tick_water<S: BlockSink>(sink: &mut S, x: i16, y: i16, z: i16) {
    for (dx, dy, dz) in NEIGHBORS {
        let (nx, ny, nz) = (x + dx, y + dy, z + dz);
        if !sink.world().valid(nx, ny, nz) {
            continue;
        }
        match sink.world().get_block(nx, ny, nz) {
            BLOCK_AIR => Box::pin(set_block(sink, nx, ny, nz, BLOCK_WATER_FLOWING)).await,
            BLOCK_LAVA_FLOWING | BLOCK_LAVA_STATIONARY => {
                Box::pin(set_block(sink, nx, ny, nz, BLOCK_STONE)).await
            }
            _ => {}
        }
    }
}

async fn tick_sponge<S: BlockSink>(sink: &mut S, x: i16, y: i16, z: i16) {
    for dy in -2..=2i16 {
        for dz in -2..=2i16 {
            for dx in -2..=2i16 {
                let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                if !sink.world().valid(nx, ny, nz) {
                    continue;
                }
                if matches!(
                    sink.world().get_block(nx, ny, nz),
                    BLOCK_WATER_FLOWING | BLOCK_WATER_STATIONARY
                ) {
                    Box::pin(set_block(sink, nx, ny, nz, BLOCK_AIR)).await;
                }
            }
        }
    }
}

/// Sweeps the whole grid drying out the area around every sponge.
pub async fn update_sponge<S: BlockSink>(sink: &mut S) {
    let sponges = collect(sink.world(), BLOCK_SPONGE);
    for (x, y, z) in sponges {
        Box::pin(tick_sponge(sink, x, y, z)).await;
    }
}

/// Runs one water tick: every currently-flowing water cell spreads, then sponges dry out.
pub async fn update_water<S: BlockSink>(sink: &mut S) {
    let cells = collect(sink.world(), BLOCK_WATER_FLOWING);
    for (x, y, z) in cells {
        tick_water(sink, x, y, z).await;
    }
    update_sponge(sink).await;
}

/// Runs one lava tick: every currently-flowing lava cell spreads or solidifies neighboring water.
pub async fn update_lava<S: BlockSink>(sink: &mut S) {
    let cells = collect(sink.world(), BLOCK_LAVA_FLOWING);
    for (x, y, z) in cells {
        tick_lava(sink, x, y, z).await;
    }
}

fn collect(world: &World, target: Block) -> Vec<(i16, i16, i16)> {
    let mut cells = Vec::new();
    for y in 0..world.size_y {
        for z in 0..world.size_z {
            for x in 0..world.size_x {
                if world.get_block(x, y, z) == target {
                    cells.push((x, y, z));
                }
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSink {
        world: World,
        broadcasts: Vec<(i16, i16, i16, Block)>,
    }

    impl BlockSink for FakeSink {
        fn world(&self) -> &World {
            &self.world
        }

        fn world_mut(&mut self) -> &mut World {
            &mut self.world
        }

        async fn broadcast_block(&mut self, x: i16, y: i16, z: i16, block: Block) {
            self.broadcasts.push((x, y, z, block));
        }
    }

    #[tokio::test]
    async fn water_spreads_into_adjacent_air() {
        let mut world = World::empty(3, 3, 3);
        world.set_block(1, 1, 1, BLOCK_WATER_FLOWING);
        let mut sink = FakeSink { world, broadcasts: Vec::new() };

        update_water(&mut sink).await;

        assert_eq!(sink.world().get_block(1, 0, 1), BLOCK_WATER_FLOWING);
        assert_eq!(sink.world().get_block(2, 1, 1), BLOCK_WATER_FLOWING);
    }

    #[tokio::test]
    async fn lava_and_water_meeting_becomes_stone() {
        let mut world = World::empty(3, 3, 3);
        world.set_block(1, 1, 1, BLOCK_LAVA_FLOWING);
        world.set_block(2, 1, 1, BLOCK_WATER_STATIONARY);
        let mut sink = FakeSink { world, broadcasts: Vec::new() };

        update_lava(&mut sink).await;

        assert_eq!(sink.world().get_block(2, 1, 1), BLOCK_STONE);
    }

    #[tokio::test]
    async fn sand_falls_through_air_onto_solid_ground() {
        let mut world = World::empty(1, 5, 1);
        world.set_block(0, 0, 0, BLOCK_STONE);
        world.set_block(0, 3, 0, BLOCK_SAND);
        let mut sink = FakeSink { world, broadcasts: Vec::new() };

        fall_sand(&mut sink, 0, 3, 0).await;

        assert_eq!(sink.world().get_block(0, 3, 0), BLOCK_AIR);
        assert_eq!(sink.world().get_block(0, 1, 0), BLOCK_SAND);
    }

    #[tokio::test]
    async fn sponge_dries_out_surrounding_water() {
        let mut world = World::empty(5, 5, 5);
        world.set_block(2, 2, 2, BLOCK_SPONGE);
        world.set_block(2, 2, 3, BLOCK_WATER_STATIONARY);
        world.set_block(2, 2, 0, BLOCK_WATER_STATIONARY);
        let mut sink = FakeSink { world, broadcasts: Vec::new() };

        update_sponge(&mut sink).await;

        assert_eq!(sink.world().get_block(2, 2, 3), BLOCK_AIR);
        assert_eq!(sink.world().get_block(2, 2, 0), BLOCK_AIR);
    }
}
