use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use glob::Pattern;
use log::{debug, warn};
use regex::Regex;
use relative_path::RelativePath;
use serde::Serialize;
use uuid::Uuid;

use crate::io::{IoError, scan_vault_folder, vault_relative};
use crate::models::Note;
use crate::parsing::blocks::{Block, TagHook};
use crate::parsing::Segmenter;

use super::config_note::{DefMap, VaultConfig};
use super::error::ImportError;

/// One tagged block turned into a dataset entry.
///
/// Serializes with the underscore-prefixed field names used by the
/// dataset format; point values are flattened alongside them, keyed by
/// point id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    #[serde(rename = "_eid")]
    pub eid: String,
    #[serde(rename = "_note")]
    pub note: String,
    #[serde(rename = "_period")]
    pub period: String,
    #[serde(rename = "_did")]
    pub did: String,
    #[serde(rename = "_source")]
    pub source: String,
    #[serde(rename = "_uid")]
    pub uid: String,
    #[serde(rename = "_deleted")]
    pub deleted: bool,
    #[serde(rename = "_created")]
    pub created: String,
    #[serde(rename = "_updated")]
    pub updated: String,
    /// Entry-type label taken from `#<tag>/<subtag>`.
    #[serde(skip)]
    pub subtag: String,
    #[serde(flatten)]
    pub points: BTreeMap<String, String>,
}

/// Reads entry records out of the periodic notes of a vault.
#[derive(Debug, Clone)]
pub struct Importer {
    config: VaultConfig,
    vault_root: PathBuf,
    ignore: Vec<Pattern>,
}

impl Importer {
    pub fn new(config: VaultConfig, vault_root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            vault_root: vault_root.into(),
            ignore: vec![],
        }
    }

    /// Glob patterns, relative to the vault root, for paths to skip.
    pub fn with_ignore(mut self, ignore: Vec<Pattern>) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn vault_root(&self) -> &Path {
        &self.vault_root
    }

    /// Note path for log messages, relative to the vault when possible.
    fn display_path(&self, note: &Note) -> String {
        vault_relative(&self.vault_root, note.path())
            .map(|p| p.to_string())
            .unwrap_or_else(|| note.path().display().to_string())
    }

    fn segmenter(&self) -> Segmenter {
        Segmenter::new()
            .include_empty_blocks(false)
            .with_hook(TagHook::new(&self.config.tag))
    }

    /// Loads every note in the configured period folders, in folder order.
    /// Folders missing from the vault are skipped.
    pub fn load_notes(&self) -> Result<Vec<Note>, ImportError> {
        let segmenter = self.segmenter();
        let mut notes = vec![];

        for folder in self.config.folders.iter() {
            let files =
                match scan_vault_folder(&self.vault_root, RelativePath::new(folder), &self.ignore)
                {
                    Ok(files) => files,
                    Err(IoError::NotFound(dir)) => {
                        warn!("Period folder {} does not exist, skipping", dir.display());
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };

            debug!("Found {} notes in {folder}", files.len());
            for path in files {
                notes.push(Note::load_with(path, &segmenter)?);
            }
        }

        Ok(notes)
    }

    /// Imports every entry in the vault.
    pub fn import(&self) -> Result<Vec<EntryRecord>, ImportError> {
        let mut records = vec![];
        for note in self.load_notes()? {
            records.extend(self.entries_in(&note)?);
        }
        Ok(records)
    }

    /// Entries found in one note, in document order.
    pub fn entries_in(&self, note: &Note) -> Result<Vec<EntryRecord>, ImportError> {
        note.blocks()
            .iter()
            .filter(|block| self.is_entry(block))
            .map(|block| self.block_to_entry(block, note))
            .collect()
    }

    /// Whether the block's first line carries the entry tag.
    pub fn is_entry(&self, block: &Block) -> bool {
        block.first_line().contains(&format!("#{}", self.config.tag))
    }

    fn block_to_entry(&self, block: &Block, note: &Note) -> Result<EntryRecord, ImportError> {
        let first_line = block.first_line();
        let subtag = subtag(first_line, &self.config.tag).ok_or_else(|| {
            ImportError::MissingSubtag {
                tag: self.config.tag.clone(),
                path: note.path().to_path_buf(),
            }
        })?;

        let fallback;
        let def = match self.config.find_def(subtag) {
            Some(def) => def,
            None => {
                warn!(
                    "No def found for {subtag} in {}, using it as the def id",
                    self.display_path(note)
                );
                fallback = DefMap {
                    did: subtag.to_string(),
                    label: subtag.to_string(),
                    points: vec![],
                };
                &fallback
            }
        };

        let uid = match block.id() {
            Some(id) => id.to_string(),
            None => {
                let id = generate_id();
                warn!(
                    "Block without id in {}, generated {id}",
                    self.display_path(note)
                );
                id
            }
        };

        let mut period = note
            .file_stem()
            .ok_or_else(|| ImportError::MissingPeriod(note.path().to_path_buf()))?
            .to_string();
        if let Some(time) = block_time(first_line) {
            period = format!("{period}T{time}");
        }

        let mut eid = None;
        let mut created = None;
        let mut updated = None;
        let mut source = None;
        let mut entry_note = None;
        let mut points = BTreeMap::new();

        for prop in block.props() {
            let key = prop.key.trim();
            let value = prop.value.trim().to_string();
            match key {
                "eid" => eid = Some(value),
                "created" => created = Some(value),
                "updated" => updated = Some(value),
                "source" => source = Some(value),
                "note" => entry_note = Some(value),
                // Serialized record fields start with `_`.
                _ if key.starts_with('_') => warn!(
                    "Skipping reserved prop key {key} in {}",
                    self.display_path(note)
                ),
                _ => {
                    let pid = match def.find_point(key) {
                        Some(point) => point.pid.clone(),
                        None => {
                            warn!(
                                "No point labeled {key} under {} in {}",
                                def.label,
                                self.display_path(note)
                            );
                            key.to_string()
                        }
                    };
                    if pid.starts_with('_') {
                        warn!(
                            "Skipping point {key} mapped to reserved id {pid} in {}",
                            self.display_path(note)
                        );
                        continue;
                    }
                    points.insert(pid, value);
                }
            }
        }

        Ok(EntryRecord {
            eid: eid.unwrap_or_else(|| uid.clone()),
            note: entry_note.unwrap_or_default(),
            period,
            did: def.did.clone(),
            source: source.unwrap_or_default(),
            uid,
            deleted: false,
            created: created.unwrap_or_else(|| base36_millis(note.created())),
            updated: updated.unwrap_or_else(|| base36_millis(note.modified())),
            subtag: subtag.to_string(),
            points,
        })
    }
}

/// Text after `#<tag>/` in the first word that starts with it.
fn subtag<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let prefix = format!("#{tag}/");
    line.split_whitespace()
        .find_map(|word| word.strip_prefix(prefix.as_str()))
        .and_then(|rest| rest.split('/').next())
        .filter(|s| !s.is_empty())
}

/// First 24-hour `HH:MM` time on the line.
fn block_time(line: &str) -> Option<&str> {
    static TIME: OnceLock<Regex> = OnceLock::new();
    TIME.get_or_init(|| Regex::new(r"([01][0-9]|2[0-3]):[0-5][0-9]").expect("Invalid time regex"))
        .find(line)
        .map(|m| m.as_str())
}

fn base36_millis(time: SystemTime) -> String {
    let millis = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    base36(millis)
}

fn base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = vec![];
    loop {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Base-36 timestamp plus a short random suffix, e.g. `loyw3v28-4f1`.
fn generate_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", base36_millis(SystemTime::now()), &suffix[..3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_notes_dir};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::time::Duration;

    const CONFIG: &str = "\
# Tag
- [tag::pdw]
# Paths
- [daily::Daily]
- [weekly::Weekly]
# Defs
- [hz44::New_Experiences]
    - [4eiv::Thing]
- [8mkn::Saw_Friends]
";

    fn importer(root: &Path) -> Importer {
        Importer::new(VaultConfig::parse(CONFIG).unwrap(), root)
    }

    fn note(name: &str, content: &str) -> Note {
        let created = UNIX_EPOCH + Duration::from_millis(1_700_000_000_000);
        let modified = UNIX_EPOCH + Duration::from_millis(1_700_000_060_000);
        Note::from_content(format!("/vault/Daily/{name}"), content, created, modified).unwrap()
    }

    #[rstest]
    #[case("- #pdw/Saw_Friends at lunch", Some("Saw_Friends"))]
    #[case("- went out #pdw/Saw_Friends/extra", Some("Saw_Friends"))]
    #[case("- #pdw alone", None)]
    #[case("- #pdw/ trailing", None)]
    #[case("- #other/Saw_Friends", None)]
    fn subtag_cases(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(subtag(line, "pdw"), expected);
    }

    #[rstest]
    #[case("- 09:15 #pdw/x", Some("09:15"))]
    #[case("- #pdw/x 23:59 then 07:00", Some("23:59"))]
    #[case("- #pdw/x 24:00", None)]
    #[case("- #pdw/x no time", None)]
    fn block_time_cases(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(block_time(line), expected);
    }

    #[test]
    fn base36_digits() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
        assert_eq!(base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn full_entry() {
        let importer = importer(Path::new("/vault"));
        let note = note(
            "2024-03-01.md",
            "- 14:30 #pdw/new_experiences [thing::Sky diving] [mood::great] ^e1\n",
        );

        let records = importer.entries_in(&note).unwrap();

        assert_eq!(
            records,
            vec![EntryRecord {
                eid: "e1".into(),
                note: String::new(),
                period: "2024-03-01T14:30".into(),
                did: "hz44".into(),
                source: String::new(),
                uid: "e1".into(),
                deleted: false,
                created: "loyw3v28".into(),
                updated: "loyw55cw".into(),
                subtag: "new_experiences".into(),
                points: BTreeMap::from([
                    ("4eiv".to_string(), "Sky diving".to_string()),
                    ("mood".to_string(), "great".to_string()),
                ]),
            }]
        );
    }

    #[test]
    fn reserved_props_override_defaults() {
        let importer = importer(Path::new("/vault"));
        let note = note(
            "2024-03-02.md",
            "- #pdw/Saw_Friends [eid::abc] [created::k1] [updated::k2] [source::phone] [note::Lunch] ^u1",
        );

        let record = importer.entries_in(&note).unwrap().remove(0);

        assert_eq!(record.eid, "abc");
        assert_eq!(record.uid, "u1");
        assert_eq!(record.created, "k1");
        assert_eq!(record.updated, "k2");
        assert_eq!(record.source, "phone");
        assert_eq!(record.note, "Lunch");
        assert_eq!(record.period, "2024-03-02");
        assert!(record.points.is_empty());
    }

    #[test]
    fn underscore_keys_do_not_shadow_record_fields() {
        let importer = importer(Path::new("/vault"));
        let note = note(
            "2024-03-02.md",
            "- #pdw/Saw_Friends [_uid::x] [_eid::y] [mood::ok] ^u",
        );

        let record = importer.entries_in(&note).unwrap().remove(0);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(record.uid, "u");
        assert_eq!(record.eid, "u");
        assert_eq!(record.points, BTreeMap::from([("mood".into(), "ok".into())]));
        assert_eq!(json["_uid"], "u");
        assert_eq!(json["_eid"], "u");
    }

    #[test]
    fn unknown_def_and_missing_id() {
        let importer = importer(Path::new("/vault"));
        let note = note("2024-03-03.md", "- #pdw/Unlisted [a::1] [a::2]");

        let record = importer.entries_in(&note).unwrap().remove(0);

        assert_eq!(record.did, "Unlisted");
        assert!(!record.uid.is_empty());
        assert_eq!(record.eid, record.uid);
        assert_eq!(record.points, BTreeMap::from([("a".into(), "2".into())]));
    }

    #[test]
    fn untagged_blocks_are_not_entries() {
        let importer = importer(Path::new("/vault"));
        let note = note(
            "2024-03-04.md",
            "# Day\n\nJust a paragraph.\n\n- a mention of pdw\n- #pdw/Saw_Friends ^x",
        );

        let records = importer.entries_in(&note).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].uid, "x");
    }

    #[test]
    fn tag_without_subtag_is_an_error() {
        let importer = importer(Path::new("/vault"));
        let note = note("2024-03-05.md", "- #pdw on its own");

        let err = importer.entries_in(&note).unwrap_err();
        assert!(matches!(err, ImportError::MissingSubtag { ref tag, .. } if tag == "pdw"));
    }

    #[test]
    fn record_serializes_with_dataset_names() {
        let importer = importer(Path::new("/vault"));
        let note = note("2024-03-06.md", "- #pdw/New_Experiences [thing::x] ^id");

        let record = importer.entries_in(&note).unwrap().remove(0);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["_uid"], "id");
        assert_eq!(json["_did"], "hz44");
        assert_eq!(json["_deleted"], false);
        assert_eq!(json["4eiv"], "x");
        assert!(json.get("subtag").is_none());
    }

    #[test]
    fn import_walks_configured_folders() {
        let dir = create_test_notes_dir();
        create_test_file(&dir, "Daily/2024-01-02.md", "- #pdw/Saw_Friends ^b");
        create_test_file(&dir, "Daily/2024-01-01.md", "- #pdw/Saw_Friends ^a\n- 08:00 #pdw/Saw_Friends ^a2");
        create_test_file(&dir, "Weekly/2024-W01.md", "- #pdw/New_Experiences ^w");
        create_test_file(&dir, "Other/2024-01-01.md", "- #pdw/Saw_Friends ^skipped");
        create_test_file(&dir, "Daily/.hidden/x.md", "- #pdw/Saw_Friends ^hidden");

        let records = importer(dir.path()).import().unwrap();

        let uids: Vec<_> = records.iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(uids, vec!["a", "a2", "b", "w"]);
        assert_eq!(records[1].period, "2024-01-01T08:00");
        assert_eq!(records[3].did, "hz44");
    }

    #[test]
    fn import_respects_ignore_patterns() {
        let dir = create_test_notes_dir();
        create_test_file(&dir, "Daily/2024-01-01.md", "- #pdw/Saw_Friends ^a");
        create_test_file(&dir, "Daily/Templates/Day.md", "- #pdw/Saw_Friends ^t");

        let records = importer(dir.path())
            .with_ignore(vec![Pattern::new("Daily/Templates").unwrap()])
            .import()
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].uid, "a");
    }

    #[test]
    fn loaded_entries_are_tagged() {
        let dir = create_test_notes_dir();
        create_test_file(&dir, "Daily/2024-01-01.md", "- #pdw/Saw_Friends ^a\n\ntext");

        let notes = importer(dir.path()).load_notes().unwrap();

        assert_eq!(notes.len(), 1);
        assert_eq!(
            notes[0].blocks()[0].block_type(),
            crate::parsing::BlockType::TaggedEntry
        );
    }
}
