// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Data file helpers:
/// JSON conversion with legacy tolerance, and the atomic temp-file writer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DocumentJson {
    #[serde(default)]
    participants: Option<BTreeMap<String, u32>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    disabled: BTreeMap<String, bool>,
    #[serde(default)]
    tunes: Option<Vec<TuneJson>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TuneJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "added_at_json")]
    added_at: Option<OffsetDateTime>,
}

/// RFC 3339 timestamps. Older files carry the zero time (`0001-01-01T00:00:00Z`) for entries
/// that were never stamped; those load as unset.
mod added_at_json {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    pub(super) fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => {
                let text = ts.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&text)
            }
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let ts = OffsetDateTime::parse(text, &Rfc3339).map_err(serde::de::Error::custom)?;
        if ts.year() <= 1 {
            return Ok(None);
        }
        Ok(Some(ts))
    }
}

fn document_to_json(doc: &Document) -> DocumentJson {
    DocumentJson {
        participants: Some(doc.participants().clone()),
        disabled: doc
            .disabled()
            .iter()
            .map(|name| (name.clone(), true))
            .collect(),
        tunes: Some(
            doc.tunes()
                .iter()
                .map(|tune| TuneJson {
                    name: tune.name().to_owned(),
                    link: tune.link().to_owned(),
                    id: tune.id().to_owned(),
                    provider: tune.provider().to_owned(),
                    added_at: tune.added_at(),
                })
                .collect(),
        ),
    }
}

fn document_from_json(path: &Path, doc_json: DocumentJson) -> Result<Document, StoreError> {
    let mut doc = Document::new();

    for (name, count) in doc_json.participants.unwrap_or_default() {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidDocument {
                path: path.to_path_buf(),
                reason: "participant name must not be empty".to_owned(),
            });
        }
        doc.participants_mut().insert(name, count);
    }

    // `false` entries are leftovers from re-activated participants; unknown names are leftovers
    // from removals made by older versions.
    for (name, disabled) in doc_json.disabled {
        if disabled && doc.has_participant(&name) {
            doc.disabled_mut().insert(name);
        }
    }

    for tune_json in doc_json.tunes.unwrap_or_default() {
        let tune = Tune::new(tune_json.name, tune_json.link, tune_json.id, tune_json.provider)
            .with_added_at(tune_json.added_at);
        doc.tunes_mut().push(tune);
    }

    Ok(doc)
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn temp_path_for(path: &Path) -> Result<PathBuf, StoreError> {
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_name = format!(".tunesday.tmp.{}.{}", file_name.to_string_lossy(), nanos);
    Ok(match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    })
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let tmp_path = temp_path_for(path)?;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    let written = file.write_all(contents).and_then(|()| file.flush()).and_then(|()| {
        if durability == WriteDurability::Durable {
            file.sync_all()
        } else {
            Ok(())
        }
    });
    drop(file);

    if let Err(source) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: tmp_path,
            source,
        });
    }

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let parent = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
