//! Common fixture builders shared between integration tests

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes `files` (paths relative to `base`) as a directory tree.
pub fn write_dir(base: &Path, files: &[(&str, &str)]) {
    for (path, contents) in files {
        let path = base.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

/// Writes `files` into a new zip archive at `base/name` and returns its path.
pub fn write_zip(base: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let entries: Vec<(&str, &[u8])> = files.iter().map(|(entry, text)| (*entry, text.as_bytes())).collect();
    write_zip_bytes(base, name, &entries)
}

/// Like [`write_zip`], with raw entry contents.
pub fn write_zip_bytes(base: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let path = base.join(name);
    let mut zip = ZipWriter::new(fs::File::create(&path).unwrap());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (entry, contents) in files {
        zip.start_file(*entry, options).unwrap();
        zip.write_all(contents).unwrap();
    }
    zip.finish().unwrap();
    path
}
