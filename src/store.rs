//! Load and save for `manifest.json` and `page-types.json`.
//!
//! Saves are staged: both documents are written to temp files beside their
//! destinations and renamed into place only once both are on disk. If the
//! second rename fails, the first file is restored from the loaded bytes.
use crate::paths::DataPaths;
use crate::schema::{ManifestDocument, PageTypesDocument};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// The content system writes its data files with four-space indentation.
const JSON_INDENT: &[u8] = b"    ";

/// A data file as it was when loaded.
#[derive(Debug, Clone, Default)]
struct RawFile {
    bytes: Vec<u8>,
    /// Top-level key order, reapplied on save.
    key_order: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    manifest: RawFile,
    page_types: RawFile,
}

#[derive(Debug)]
pub struct LoadedDocuments {
    pub manifest: ManifestDocument,
    pub page_types: PageTypesDocument,
    pub snapshot: Snapshot,
}

/// Load both documents; nothing is written if either fails.
pub fn load_documents(paths: &DataPaths) -> Result<LoadedDocuments> {
    let (manifest, manifest_raw) = load_document(&paths.manifest_path(), "manifest")?;
    let (page_types, page_types_raw) = load_document(&paths.page_types_path(), "page types")?;
    Ok(LoadedDocuments {
        manifest,
        page_types,
        snapshot: Snapshot {
            manifest: manifest_raw,
            page_types: page_types_raw,
        },
    })
}

fn load_document<T: DeserializeOwned>(path: &Path, label: &str) -> Result<(T, RawFile)> {
    let bytes = fs::read(path).with_context(|| format!("read {label} {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse {label} JSON {}", path.display()))?;
    let key_order = match &value {
        Value::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    };
    let document = serde_json::from_value(value)
        .with_context(|| format!("parse {label} JSON {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded {label}");
    Ok((document, RawFile { bytes, key_order }))
}

/// Put top-level keys back in the order they were read; new keys go last.
fn restore_key_order(value: Value, key_order: &[String]) -> Value {
    let mut map = match value {
        Value::Object(map) => map,
        other => return other,
    };
    let mut ordered = Map::new();
    for key in key_order {
        if let Some((key, value)) = map.remove_entry(key) {
            ordered.insert(key, value);
        }
    }
    ordered.extend(map);
    Value::Object(ordered)
}

/// Serialize with the data directory's formatting: four-space indent,
/// literal UTF-8, no trailing newline.
pub fn to_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("serialize JSON document")?;
    Ok(buf)
}

/// Replace both files with the given documents.
pub fn save_documents(
    paths: &DataPaths,
    manifest: &ManifestDocument,
    page_types: &PageTypesDocument,
    snapshot: &Snapshot,
) -> Result<()> {
    let staged = vec![
        stage_json(&paths.manifest_path(), manifest, &snapshot.manifest)?,
        stage_json(&paths.page_types_path(), page_types, &snapshot.page_types)?,
    ];
    publish(staged)
}

struct StagedFile<'a> {
    dest: PathBuf,
    temp: NamedTempFile,
    original: &'a RawFile,
}

fn stage_json<'a, T: Serialize>(
    dest: &Path,
    document: &T,
    original: &'a RawFile,
) -> Result<StagedFile<'a>> {
    let value = serde_json::to_value(document)
        .with_context(|| format!("serialize {}", dest.display()))?;
    let bytes = to_json_bytes(&restore_key_order(value, &original.key_order))?;
    // Replace the link target, not a symlink standing in for the data file.
    let dest = fs::canonicalize(dest).unwrap_or_else(|_| dest.to_path_buf());
    let dir = dest
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("create staging file in {}", dir.display()))?;
    temp.write_all(&bytes)
        .with_context(|| format!("stage {}", dest.display()))?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("stage {}", dest.display()))?;
    // Temp files are created 0600; keep whatever mode the destination had.
    if let Ok(metadata) = fs::metadata(&dest) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("copy permissions of {}", dest.display()))?;
    }
    tracing::debug!(path = %dest.display(), bytes = bytes.len(), "staged");
    Ok(StagedFile {
        dest,
        temp,
        original,
    })
}

fn publish(staged: Vec<StagedFile<'_>>) -> Result<()> {
    let mut published: Vec<(PathBuf, &RawFile)> = Vec::new();
    for file in staged {
        let StagedFile {
            dest,
            temp,
            original,
        } = file;
        let result = temp
            .persist(&dest)
            .map_err(|err| err.error)
            .with_context(|| format!("replace {}", dest.display()));
        if let Err(err) = result {
            rollback(&published);
            return Err(err);
        }
        tracing::debug!(path = %dest.display(), "published");
        published.push((dest, original));
    }
    Ok(())
}

fn rollback(published: &[(PathBuf, &RawFile)]) {
    for (dest, original) in published {
        match fs::write(dest, &original.bytes) {
            Ok(()) => tracing::info!(path = %dest.display(), "restored after failed save"),
            Err(err) => tracing::warn!(
                path = %dest.display(),
                error = %err,
                "could not restore after failed save; data files may disagree"
            ),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
