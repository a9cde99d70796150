use std::path::{Path, PathBuf};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Text of one file of the build, as the host sees it.
#[salsa::input(debug)]
pub struct SourceFile {
    #[returns(ref)]
    pub path: PathBuf,
    #[returns(ref)]
    pub text: String,
}

/// Byte offsets of every line separator in the file.
///
/// A `\r\n` pair is recorded at its `\n`; a lone `\r` counts as a separator.
#[salsa::tracked]
pub fn line_separator_positions(db: &dyn salsa::Database, file: SourceFile) -> Vec<i32> {
    let bytes = file.text(db).as_bytes();
    let mut separators = Vec::new();
    for (i, byte) in bytes.iter().enumerate() {
        match byte {
            b'\n' => separators.push(i as i32),
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => separators.push(i as i32),
            _ => {}
        }
    }
    separators
}

/// Offset of the last byte of the file (`-1` for an empty file).
#[salsa::tracked]
pub fn source_end(db: &dyn salsa::Database, file: SourceFile) -> i32 {
    file.text(db).len() as i32 - 1
}

#[derive(Default, Clone)]
#[salsa::db]
pub struct BridgeDatabase {
    storage: salsa::Storage<Self>,
    /// Cache of registered source files, keyed by path.
    files: DashMap<PathBuf, SourceFile>,
}

#[salsa::db]
impl salsa::Database for BridgeDatabase {}

impl BridgeDatabase {
    /// Register the text of `path`, or return the file already registered.
    pub fn input(&self, path: impl AsRef<Path>, text: impl Into<String>) -> SourceFile {
        let path = path.as_ref().to_path_buf();
        match self.files.entry(path) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let file = SourceFile::new(self, entry.key().clone(), text.into());
                *entry.insert(file)
            }
        }
    }

    pub fn file(&self, path: &Path) -> Option<SourceFile> {
        self.files.get(path).map(|entry| *entry)
    }
}
