use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::World;

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Export the world to JSONL files in the given output directory.
///
/// Creates the output directory if it does not exist. Writes 4 files:
/// - `regions.jsonl`: one Region per line
/// - `factions.jsonl`: one Faction per line
/// - `alliances.jsonl`: one Alliance per line
/// - `events.jsonl`: one Event per line, in order of occurrence
pub fn flush_to_jsonl(world: &World, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(&output_dir.join("regions.jsonl"), world.regions.values())?;
    write_jsonl(&output_dir.join("factions.jsonl"), world.factions.values())?;
    write_jsonl(&output_dir.join("alliances.jsonl"), world.alliances.iter())?;
    write_jsonl(&output_dir.join("events.jsonl"), world.events.iter())?;

    Ok(())
}
