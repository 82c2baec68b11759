//! Loading of odds snapshots from disk.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Decodes the JSON document at `path`. Malformed content surfaces as [`io::ErrorKind::InvalidData`].
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, io::Error> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(io::Error::from)
}

/// Loads any deserializable type, such as an [`OddsQuote`](crate::quote::OddsQuote), from a JSON file.
pub trait FromJsonFile: DeserializeOwned {
    fn from_json_file(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        read_json(path)
    }
}

impl<D: DeserializeOwned> FromJsonFile for D {}
