use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use relative_path::RelativePath;
use serde::Serialize;

use crate::io::read_file;
use crate::parsing::Segmenter;
use crate::parsing::blocks::{Prop, extract_props};

use super::error::ImportError;

const TEMPLATE: &str = "\
# Tag
- [tag::pdw] %%don't include the hashtag%%
# Paths
- [daily::Periods/1 - Daily] %%required%%
- [weekly::Periods/2 - Weekly]
- [monthly::Periods/3 - Monthly]
- [quarterly:: Periods/4 - Quarterly]
- [yearly::Periods/5 - Yearly]
# Defs
- [hz44::New_Experiences] %%did::label to use in Obsidian%%
    - [4eiv::Thing] %%pid::label to use in Obsidian%%
- [8mkn::Saw_Friends]
";

/// Markers every config note must contain.
const REQUIRED: [&str; 5] = ["# Tag", "[tag::", "# Paths", "daily::", "# Defs"];

/// Folders holding periodic notes, relative to the vault root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodFolders {
    pub daily: String,
    pub weekly: Option<String>,
    pub monthly: Option<String>,
    pub quarterly: Option<String>,
    pub yearly: Option<String>,
}

impl PeriodFolders {
    /// Configured folders, daily first, then coarser periods.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.daily.as_str()).chain(
            [&self.weekly, &self.monthly, &self.quarterly, &self.yearly]
                .into_iter()
                .filter_map(|f| f.as_deref()),
        )
    }
}

/// Maps a point label used in notes to its point id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointMap {
    pub pid: String,
    pub label: String,
}

/// Maps an entry-type label (the tag's subtag) to its definition id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefMap {
    pub did: String,
    pub label: String,
    pub points: Vec<PointMap>,
}

impl DefMap {
    pub fn find_point(&self, label: &str) -> Option<&PointMap> {
        self.points
            .iter()
            .find(|p| p.label.eq_ignore_ascii_case(label))
    }
}

/// Import settings read from a config note inside the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultConfig {
    /// Entry tag, without `#`.
    pub tag: String,
    pub folders: PeriodFolders,
    pub defs: Vec<DefMap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Tag,
    Paths,
    Defs,
    Other,
}

impl Section {
    fn from_heading(line: &str) -> Self {
        let title = line.trim().trim_start_matches('#').trim();
        if title.eq_ignore_ascii_case("tag") {
            Section::Tag
        } else if title.eq_ignore_ascii_case("paths") {
            Section::Paths
        } else if title.eq_ignore_ascii_case("defs") {
            Section::Defs
        } else {
            Section::Other
        }
    }
}

impl VaultConfig {
    /// The expected shape of a config note.
    pub fn template() -> &'static str {
        TEMPLATE
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ImportError::ConfigNoteRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Loads the config note at `note`, relative to the vault root.
    pub fn load_from_vault(vault_root: &Path, note: &RelativePath) -> Result<Self, ImportError> {
        Self::parse(&read_file(note, vault_root)?)
    }

    /// Parses a config note.
    ///
    /// Headings split the note into sections; within each, list blocks'
    /// `[key::value]` props carry the settings. Each Defs block's first prop
    /// is a definition and the props of its indented children are points.
    /// `%%comments%%` are ignored.
    pub fn parse(text: &str) -> Result<Self, ImportError> {
        if let Some(missing) = REQUIRED.iter().find(|m| !text.contains(**m)) {
            return Err(ImportError::InvalidConfigNote(format!(
                "missing \"{missing}\""
            )));
        }

        let blocks = Segmenter::new().include_empty_blocks(false).segment(text)?;

        let mut section = Section::Preamble;
        let mut tag = None;
        let mut folders = PeriodFolders::default();
        let mut daily = None;
        let mut defs = vec![];

        for block in &blocks {
            if block.block_type().is_heading() {
                section = Section::from_heading(block.first_line());
                continue;
            }
            let props = extract_props(&strip_comments(block.text()));
            match section {
                Section::Tag => {
                    if tag.is_none() {
                        tag = props
                            .iter()
                            .find(|p| p.key.trim() == "tag")
                            .map(|p| p.value.trim().trim_start_matches('#').to_string());
                    }
                }
                Section::Paths => {
                    for Prop { key, value } in props {
                        let value = value.trim().to_string();
                        match key.trim() {
                            "daily" => daily = Some(value),
                            "weekly" => folders.weekly = Some(value),
                            "monthly" => folders.monthly = Some(value),
                            "quarterly" => folders.quarterly = Some(value),
                            "yearly" => folders.yearly = Some(value),
                            _ => {}
                        }
                    }
                }
                Section::Defs => {
                    if let Some((def, points)) = props.split_first() {
                        defs.push(DefMap {
                            did: def.key.trim().to_string(),
                            label: def.value.trim().to_string(),
                            points: points
                                .iter()
                                .map(|p| PointMap {
                                    pid: p.key.trim().to_string(),
                                    label: p.value.trim().to_string(),
                                })
                                .collect(),
                        });
                    }
                }
                Section::Preamble | Section::Other => {}
            }
        }

        let tag = tag
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ImportError::InvalidConfigNote("no tag under # Tag".into()))?;
        folders.daily = daily
            .filter(|d| !d.is_empty())
            .ok_or_else(|| ImportError::InvalidConfigNote("no daily folder under # Paths".into()))?;

        Ok(Self { tag, folders, defs })
    }

    /// Definition whose label matches `label`, ignoring ASCII case.
    pub fn find_def(&self, label: &str) -> Option<&DefMap> {
        self.defs.iter().find(|d| d.label.eq_ignore_ascii_case(label))
    }
}

fn strip_comments(text: &str) -> String {
    static COMMENT: OnceLock<Regex> = OnceLock::new();
    COMMENT
        .get_or_init(|| Regex::new(r"(?s)%%.*?%%").expect("Invalid comment regex"))
        .replace_all(text, "")
        .into_owned()
}
