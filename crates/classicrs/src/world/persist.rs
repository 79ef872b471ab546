//! Gzip framing for the on-disk world file and for the one-time transfer sent to joining
//! clients. The two formats share nothing but the compression: `world.gw` carries a header
//! (size, spawn) ahead of the blocks, the transfer format is just a cell count ahead of them.

use std::io::{self, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use super::grid::World;
use crate::consts::LEVEL_CHUNK_LEN;

pub fn save(path: &Path, world: &World) -> io::Result<()> {
    let mut gz = GzEncoder::new(Vec::new(), Compression::default());

    gz.write_all(&world.size_x.to_be_bytes())?;
    gz.write_all(&world.size_y.to_be_bytes())?;
    gz.write_all(&world.size_z.to_be_bytes())?;

    gz.write_all(&world.spawn_x.to_be_bytes())?;
    gz.write_all(&world.spawn_y.to_be_bytes())?;
    gz.write_all(&world.spawn_z.to_be_bytes())?;

    gz.write_all(&[world.spawn_yaw, world.spawn_pitch])?;
    gz.write_all(world.blocks())?;

    let data = gz.finish()?;
    std::fs::write(path, data)
}

pub fn load(path: &Path) -> io::Result<World> {
    let contents = std::fs::read(path)?;
    let mut gz = GzDecoder::new(contents.as_slice());

    let mut shorts = [0u8; 6];
    gz.read_exact(&mut shorts)?;
    let size_x = i16::from_be_bytes([shorts[0], shorts[1]]);
    let size_y = i16::from_be_bytes([shorts[2], shorts[3]]);
    let size_z = i16::from_be_bytes([shorts[4], shorts[5]]);

    let mut floats = [0u8; 24];
    gz.read_exact(&mut floats)?;
    let spawn_x = f64::from_be_bytes(floats[0..8].try_into().unwrap());
    let spawn_y = f64::from_be_bytes(floats[8..16].try_into().unwrap());
    let spawn_z = f64::from_be_bytes(floats[16..24].try_into().unwrap());

    let mut angles = [0u8; 2];
    gz.read_exact(&mut angles)?;

    let mut world = World::empty(size_x, size_y, size_z);
    world.spawn_x = spawn_x;
    world.spawn_y = spawn_y;
    world.spawn_z = spawn_z;
    world.spawn_yaw = angles[0];
    world.spawn_pitch = angles[1];

    read_blocks(&mut gz, world.blocks_mut())?;

    Ok(world)
}

/// Reads the block array one cell at a time, tolerating an `UnexpectedEof` only on the very last
/// cell — a save truncated by exactly one trailing byte still loads, matching the reference
/// loader's behavior of only forgiving an `io.EOF` hit on the final `(SizeX-1, SizeY-1, SizeZ-1)`
/// cell.
fn read_blocks(gz: &mut GzDecoder<&[u8]>, blocks: &mut [u8]) -> io::Result<()> {
    let Some((last, rest)) = blocks.split_last_mut() else { return Ok(()) };

    for block in rest {
        gz.read_exact(std::slice::from_mut(block))?;
    }

    match gz.read_exact(std::slice::from_mut(last)) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(()),
        Err(err) => Err(err),
    }
}

/// Gzips the raw block array prefixed by a 4-byte big-endian cell count, the exact payload the
/// reference server streams to a joining client across `LevelInit`/`LevelDataChunk*`.
#[must_use]
pub fn build_transfer_payload(world: &World) -> io::Result<Vec<u8>> {
    let mut gz = GzEncoder::new(Vec::new(), Compression::default());
    gz.write_all(&(world.cell_count() as u32).to_be_bytes())?;
    gz.write_all(world.blocks())?;
    gz.finish()
}

/// Slices a gzipped transfer payload into fixed 1024-byte chunks, zero-padding the last one,
/// alongside the unpadded length and join-progress percentage for each.
#[must_use]
pub fn chunk_transfer_payload(data: &[u8]) -> Vec<([u8; LEVEL_CHUNK_LEN], i16, u8)> {
    let chunk_count = data.len().div_ceil(LEVEL_CHUNK_LEN).max(1);
    data.chunks(LEVEL_CHUNK_LEN)
        .enumerate()
        .map(|(i, chunk)| {
            let mut padded = [0u8; LEVEL_CHUNK_LEN];
            padded[..chunk.len()].copy_from_slice(chunk);
            let percent = ((255 * i) / chunk_count) as u8;
            (padded, chunk.len() as i16, percent)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_round_trips_through_a_temp_file() {
        let mut world = World::generate(4, 4, 4);
        world.spawn_yaw = 12;
        world.spawn_pitch = 34;

        let path = std::env::temp_dir().join("classicrs_world_roundtrip_test.gw");
        save(&path, &world).unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.size_x, world.size_x);
        assert_eq!(loaded.spawn_yaw, 12);
        assert_eq!(loaded.spawn_pitch, 34);
        assert_eq!(loaded.blocks(), world.blocks());
    }

    #[test]
    fn chunking_pads_the_last_chunk_and_tracks_unpadded_length() {
        let data = vec![7u8; LEVEL_CHUNK_LEN + 10];
        let chunks = chunk_transfer_payload(&data);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].1, LEVEL_CHUNK_LEN as i16);
        assert_eq!(chunks[1].1, 10);
        assert_eq!(chunks[1].0[10], 0);
    }
}
