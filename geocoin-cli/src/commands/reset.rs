//! Standalone reset command.
//!
//! Deletes the save file without starting a session, for wiping state from
//! scripts or when the save is beyond loading.

use std::error::Error;
use std::fs;
use std::io;
use std::path::Path;

/// Delete the saved game, if any.
pub fn run(data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let path = super::save_path(data_dir);
    match fs::remove_file(&path) {
        Ok(()) => {
            println!("deleted {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            println!("no saved game at {}", path.display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
