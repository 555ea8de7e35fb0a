//! JSON persistence of curve instances
//!
//! Instances are stored as pretty-printed JSON. Cached parametrization is not
//! serialized, so every curve is rebuilt after reading.
//!
//! # Example
//! ```rust,no_run
//! use contour_edit::io::{read_instance, write_instance};
//!
//! let instance = read_instance("profile.json").unwrap();
//! write_instance(&instance, "profile_copy.json").unwrap();
//! ```

use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::brep::SpaceInstance;
use crate::Result;

/// Parse an instance from JSON text and rebuild its curve.
pub fn instance_from_json(text: &str) -> Result<SpaceInstance> {
    let mut instance: SpaceInstance = serde_json::from_str(text)?;
    instance.curve.rebuild_all()?;
    Ok(instance)
}

/// Serialize an instance to pretty-printed JSON.
pub fn instance_to_json(instance: &SpaceInstance) -> Result<String> {
    Ok(serde_json::to_string_pretty(instance)?)
}

/// Read an instance from a JSON file, or from any reader with [`read_instance_from`].
pub fn read_instance(path: impl AsRef<Path>) -> Result<SpaceInstance> {
    let path = path.as_ref();
    debug!("Reading {}", path.display());
    read_instance_from(BufReader::new(File::open(path)?))
}

pub fn read_instance_from<R: Read>(mut reader: R) -> Result<SpaceInstance> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    instance_from_json(&text)
}

/// Write an instance to a JSON file.
pub fn write_instance(instance: &SpaceInstance, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing {}", path.display());
    let mut writer = BufWriter::new(File::create(path)?);
    write_instance_to(instance, &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_instance_to<W: Write>(instance: &SpaceInstance, mut writer: W) -> Result<()> {
    writer.write_all(instance_to_json(instance)?.as_bytes())?;
    writeln!(writer)?;
    Ok(())
}
