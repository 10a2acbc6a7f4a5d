//! Catalogue parser: folds classified lines into normalized entries.
//!
//! The parser threads an explicit accumulator over the line stream: a
//! section header opens a new entry, the `CRC` key supplies the content
//! hash and resets all direct config fields to their defaults, and every
//! other recognized key mutates exactly one field. Cheat strings are
//! interned into the caller-owned [`StringTable`].

use tracing::warn;

use romdat_model::{
    Config, DirectConfig, Entry, IdentityKey, ModelError, SaveKind, StringTable,
    truncate_display_name,
};

use crate::error::IngestError;
use crate::scanner::{LineKind, scan_lines};

/// Parser behavior switches.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Treat unknown keys as fatal instead of warn-and-skip.
    pub strict: bool,
}

/// Accumulator for the section currently being read.
struct EntryBuilder {
    md5: IdentityKey,
    crc: u64,
    config: DirectConfig,
    ref_md5: Option<IdentityKey>,
    good_name: String,
}

impl EntryBuilder {
    fn new(md5: IdentityKey) -> Self {
        Self {
            md5,
            crc: 0,
            config: DirectConfig::default(),
            ref_md5: None,
            good_name: String::new(),
        }
    }

    fn finish(self) -> Entry {
        Entry {
            crc: self.crc,
            config: Config::Direct(self.config),
            md5: self.md5,
            ref_md5: self.ref_md5,
            ref_crc: None,
            good_name: self.good_name,
        }
    }
}

/// Parses catalogue text into entries, interning cheat strings into `table`.
///
/// The whole batch aborts on the first structural or value error; unknown
/// keys are logged and skipped unless `options.strict` is set.
pub fn parse_catalogue(
    text: &str,
    table: &mut StringTable,
    options: &ParseOptions,
) -> Result<Vec<Entry>, IngestError> {
    let lines = scan_lines(text)?;
    let mut entries = Vec::new();
    let mut current: Option<EntryBuilder> = None;

    for line in &lines {
        match &line.kind {
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Section(key) => {
                let md5 =
                    IdentityKey::new(*key).map_err(|error| IngestError::MalformedLine {
                        line: line.number,
                        message: error.to_string(),
                    })?;
                if let Some(done) = current.take() {
                    entries.push(done.finish());
                }
                current = Some(EntryBuilder::new(md5));
            }
            LineKind::KeyValue { key, value } => {
                let Some(builder) = current.as_mut() else {
                    return Err(IngestError::KeyOutsideSection {
                        line: line.number,
                        key: (*key).to_string(),
                    });
                };
                apply_key(builder, table, line.number, key, value, options)?;
            }
        }
    }
    if let Some(done) = current.take() {
        entries.push(done.finish());
    }
    Ok(entries)
}

fn apply_key(
    builder: &mut EntryBuilder,
    table: &mut StringTable,
    line: usize,
    key: &str,
    value: &str,
    options: &ParseOptions,
) -> Result<(), IngestError> {
    let section = builder.md5.to_string();
    let invalid = |message: String| IngestError::InvalidValue {
        line,
        section: section.clone(),
        key: key.to_string(),
        message,
    };
    let model = |source: ModelError| IngestError::Model {
        line,
        section: section.clone(),
        key: key.to_string(),
        source,
    };

    match key {
        "CRC" => {
            builder.crc = parse_crc(value).map_err(invalid)?;
            // The CRC key doubles as the section's config reset point.
            builder.config = DirectConfig::default();
        }
        "RefMD5" => {
            let target = IdentityKey::new(value).map_err(model)?;
            builder.ref_md5 = Some(target);
        }
        "SaveType" => {
            builder.config.save_kind = SaveKind::parse_token(value).map_err(model)?;
        }
        "Status" => {
            let status = parse_int(value).map_err(invalid)?;
            builder.config.set_status(status).map_err(model)?;
        }
        "Players" => {
            let players = parse_int(value).map_err(invalid)?;
            builder.config.set_players(players).map_err(model)?;
        }
        "CountPerOp" => {
            let count = parse_int(value).map_err(invalid)?;
            builder.config.set_count_per_op(count).map_err(model)?;
        }
        "Rumble" => builder.config.rumble = value.starts_with('Y'),
        "Transferpak" => builder.config.transfer_pak = value.starts_with('Y'),
        "Mempak" => builder.config.memory_pak = value.starts_with('Y'),
        "Biopak" => builder.config.bio_pak = value.starts_with('Y'),
        "DisableExtraMem" => builder.config.disable_extra_mem = value.starts_with('1'),
        "SiDmaDuration" => {
            if value != "1" {
                return Err(invalid(format!("expected \"1\", got {value:?}")));
            }
            builder.config.si_dma_duration = true;
        }
        "Cheat0" => {
            let index = table.intern(value, &builder.good_name).map_err(model)?;
            builder.config.cheat_ref = index;
        }
        "GoodName" => {
            builder.good_name = truncate_display_name(value).to_string();
        }
        _ => {
            if options.strict {
                return Err(IngestError::UnknownKey {
                    line,
                    section: section.clone(),
                    key: key.to_string(),
                });
            }
            warn!(line, section = %section, key, "skipping unknown catalogue key");
        }
    }
    Ok(())
}

/// Parses the `CRC` value: two space-separated 8-hex-digit fields,
/// big-endian-concatenated into a u64.
fn parse_crc(value: &str) -> Result<u64, String> {
    let Some((high, low)) = value.split_once(' ') else {
        return Err(format!("expected two space-separated fields, got {value:?}"));
    };
    let high = parse_crc_half(high)?;
    let low = parse_crc_half(low)?;
    Ok((u64::from(high) << 32) | u64::from(low))
}

fn parse_crc_half(field: &str) -> Result<u32, String> {
    if field.len() != 8 {
        return Err(format!("expected 8 hex digits, got {field:?}"));
    }
    u32::from_str_radix(field, 16).map_err(|_| format!("expected 8 hex digits, got {field:?}"))
}

fn parse_int(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("expected an integer, got {value:?}"))
}
