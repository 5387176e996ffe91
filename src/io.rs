use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

use crate::result::Result;

/// Open the log file for appending, creating it if needed.
///
/// Without a path, a new file `clipmark-<random>.log` is created in the
/// temporary directory. It is kept after the program ends so it can be read.
pub fn open_log_file(path: Option<&Path>) -> Result<(File, PathBuf)> {
    match path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Ok((file, path.to_path_buf()))
        }
        None => {
            let (file, path) = tempfile::Builder::new()
                .prefix("clipmark-")
                .suffix(".log")
                .tempfile()?
                .keep()
                .map_err(|err| err.error)?;
            Ok((file, path))
        }
    }
}
