pub type Block = u8;

pub const BUILD_DESTROY: u8 = 0;
pub const BUILD_PLACE: u8 = 1;

pub const BLOCK_AIR: Block = 0;
pub const BLOCK_STONE: Block = 1;
pub const BLOCK_GRASS_BLOCK: Block = 2;
pub const BLOCK_DIRT: Block = 3;
pub const BLOCK_COBBLESTONE: Block = 4;
pub const BLOCK_PLANKS: Block = 5;
pub const BLOCK_SAPLING: Block = 6;
pub const BLOCK_BEDROCK: Block = 7;
pub const BLOCK_WATER_FLOWING: Block = 8;
pub const BLOCK_WATER_STATIONARY: Block = 9;
pub const BLOCK_LAVA_FLOWING: Block = 10;
pub const BLOCK_LAVA_STATIONARY: Block = 11;
pub const BLOCK_SAND: Block = 12;
pub const BLOCK_GRAVEL: Block = 13;
pub const BLOCK_GOLD_ORE: Block = 14;
pub const BLOCK_IRON_ORE: Block = 15;
pub const BLOCK_COAL_ORE: Block = 16;
pub const BLOCK_WOOD: Block = 17;
pub const BLOCK_LEAVES: Block = 18;
pub const BLOCK_SPONGE: Block = 19;
pub const BLOCK_GLASS: Block = 20;
pub const BLOCK_CLOTH_RED: Block = 21;
pub const BLOCK_CLOTH_ORANGE: Block = 22;
pub const BLOCK_CLOTH_YELLOW: Block = 23;
pub const BLOCK_CLOTH_CHARTREUSE: Block = 24;
pub const BLOCK_CLOTH_GREEN: Block = 25;
pub const BLOCK_CLOTH_SPRING_GREEN: Block = 26;
pub const BLOCK_CLOTH_CYAN: Block = 27;
pub const BLOCK_CLOTH_CAPRI: Block = 28;
pub const BLOCK_CLOTH_ULTRAMARINE: Block = 29;
pub const BLOCK_CLOTH_VIOLET: Block = 30;
pub const BLOCK_CLOTH_PURPLE: Block = 31;
pub const BLOCK_CLOTH_MAGENTA: Block = 32;
pub const BLOCK_CLOTH_ROSE: Block = 33;
pub const BLOCK_CLOTH_DARK_GRAY: Block = 34;
pub const BLOCK_CLOTH_LIGHT_GRAY: Block = 35;
pub const BLOCK_CLOTH_WHITE: Block = 36;
pub const BLOCK_FLOWER: Block = 37;
pub const BLOCK_ROSE: Block = 38;
pub const BLOCK_BROWN_MUSHROOM: Block = 39;
pub const BLOCK_RED_MUSHROOM: Block = 40;
pub const BLOCK_BLOCK_OF_GOLD: Block = 41;
pub const BLOCK_BLOCK_OF_IRON: Block = 42;
pub const BLOCK_SLAB_DOUBLE: Block = 43;
pub const BLOCK_SLAB: Block = 44;
pub const BLOCK_BRICKS: Block = 45;
pub const BLOCK_TNT: Block = 46;
pub const BLOCK_BOOKSHELF: Block = 47;
pub const BLOCK_MOSSY_COBBLESTONE: Block = 48;
pub const BLOCK_OBSIDIAN: Block = 49;

#[must_use]
pub fn name(block: Block) -> &'static str {
    match block {
        BLOCK_AIR => "Air",
        BLOCK_STONE => "Stone",
        BLOCK_GRASS_BLOCK => "Grass Block",
        BLOCK_DIRT => "Dirt",
        BLOCK_COBBLESTONE => "Cobblestone",
        BLOCK_PLANKS => "Planks",
        BLOCK_SAPLING => "Sapling",
        BLOCK_BEDROCK => "Bedrock",
        BLOCK_WATER_FLOWING => "Flowing Water",
        BLOCK_WATER_STATIONARY => "Stationary Water",
        BLOCK_LAVA_FLOWING => "Flowing Lava",
        BLOCK_LAVA_STATIONARY => "Stationary Lava",
        BLOCK_SAND => "Sand",
        BLOCK_GRAVEL => "Gravel",
        BLOCK_GOLD_ORE => "Gold Ore",
        BLOCK_IRON_ORE => "Iron Ore",
        BLOCK_COAL_ORE => "Coal Ore",
        BLOCK_WOOD => "Wood",
        BLOCK_LEAVES => "Leaves",
        BLOCK_SPONGE => "Sponge",
        BLOCK_GLASS => "Glass",
        BLOCK_FLOWER => "Flower",
        BLOCK_ROSE => "Rose",
        BLOCK_BROWN_MUSHROOM => "Brown Mushroom",
        BLOCK_RED_MUSHROOM => "Red Mushroom",
        BLOCK_BLOCK_OF_GOLD => "Block of Gold",
        BLOCK_BLOCK_OF_IRON => "Block of Iron",
        BLOCK_SLAB_DOUBLE => "Slab Double",
        BLOCK_SLAB => "Slab",
        BLOCK_BRICKS => "Bricks",
        BLOCK_TNT => "TNT",
        BLOCK_BOOKSHELF => "Bookshelf",
        BLOCK_MOSSY_COBBLESTONE => "Mossy Cobblestone",
        BLOCK_OBSIDIAN => "Obsidian",
        _ => "Cloth",
    }
}

#[must_use]
pub fn can_sand_pass(block: Block) -> bool {
    matches!(
        block,
        BLOCK_AIR | BLOCK_WATER_FLOWING | BLOCK_WATER_STATIONARY | BLOCK_LAVA_FLOWING | BLOCK_LAVA_STATIONARY
    )
}
