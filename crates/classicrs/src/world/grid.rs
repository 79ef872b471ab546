use super::block::{BLOCK_AIR, BLOCK_DIRT, BLOCK_GRASS_BLOCK, Block};

/// The voxel grid plus spawn point. Blocks are stored flattened in `[y][z][x]` order, matching
/// the reference server's nested-slice layout and its on-disk/wire byte ordering.
#[derive(Debug, Clone)]
pub struct World {
    pub size_x: i16,
    pub size_y: i16,
    pub size_z: i16,
    pub spawn_x: f64,
    pub spawn_y: f64,
    pub spawn_z: f64,
    pub spawn_yaw: u8,
    pub spawn_pitch: u8,
    blocks: Vec<Block>,
}

impl World {
    #[must_use]
    pub fn empty(size_x: i16, size_y: i16, size_z: i16) -> Self {
        let cells = size_x as usize * size_y as usize * size_z as usize;
        Self {
            size_x,
            size_y,
            size_z,
            spawn_x: 0.0,
            spawn_y: 0.0,
            spawn_z: 0.0,
            spawn_yaw: 0,
            spawn_pitch: 0,
            blocks: vec![BLOCK_AIR; cells],
        }
    }

    /// Builds a fresh flat-earth world: dirt filling the lower half, a single grass layer on
    /// top, spawning the player just above the highest solid block at the world's center.
    #[must_use]
    pub fn generate(size_x: i16, size_y: i16, size_z: i16) -> Self {
        let mut world = Self::empty(size_x, size_y, size_z);

        let ground_top = size_y / 2 + 1;
        for y in 0..=ground_top {
            let top = y == ground_top;
            for z in 0..size_z {
                for x in 0..size_x {
                    world.set_block(x, y, z, if top { BLOCK_GRASS_BLOCK } else { BLOCK_DIRT });
                }
            }
        }

        world.spawn_x = (size_x as f64 / 2.0).floor() + 0.5;
        world.spawn_z = (size_z as f64 / 2.0).floor() + 0.5;
        for y in (0..size_y).rev() {
            if world.get_block(world.spawn_x as i16, y, world.spawn_z as i16) != BLOCK_AIR {
                world.spawn_y = y as f64 + 2.0;
                break;
            }
        }

        world
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    #[inline]
    fn index(&self, x: i16, y: i16, z: i16) -> usize {
        (y as usize * self.size_z as usize + z as usize) * self.size_x as usize + x as usize
    }

    #[must_use]
    pub fn valid(&self, x: i16, y: i16, z: i16) -> bool {
        x >= 0 && y >= 0 && z >= 0 && x < self.size_x && y < self.size_y && z < self.size_z
    }

    #[must_use]
    pub fn get_block(&self, x: i16, y: i16, z: i16) -> Block {
        self.blocks[self.index(x, y, z)]
    }

    pub fn set_block(&mut self, x: i16, y: i16, z: i16, block: Block) {
        let idx = self.index(x, y, z);
        self.blocks[idx] = block;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_fills_lower_half_with_dirt_and_caps_with_grass() {
        let world = World::generate(8, 10, 8);
        assert_eq!(world.get_block(0, 0, 0), BLOCK_DIRT);
        assert_eq!(world.get_block(0, 6, 0), BLOCK_GRASS_BLOCK);
        assert_eq!(world.get_block(0, 7, 0), BLOCK_AIR);
    }

    #[test]
    fn generate_centers_spawn_above_ground() {
        let world = World::generate(8, 10, 8);
        assert_eq!(world.spawn_x, 4.5);
        assert_eq!(world.spawn_z, 4.5);
        assert_eq!(world.spawn_y, 8.0);
    }

    #[test]
    fn valid_rejects_out_of_bounds_coordinates() {
        let world = World::empty(4, 4, 4);
        assert!(world.valid(0, 0, 0));
        assert!(world.valid(3, 3, 3));
        assert!(!world.valid(-1, 0, 0));
        assert!(!world.valid(4, 0, 0));
    }
}
