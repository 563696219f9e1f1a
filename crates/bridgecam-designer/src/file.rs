//! Toolpath file records.
//!
//! A [`ToolpathFile`] is one loaded toolpath source (gerber, drill, generated
//! toolpath...) together with the scene items built from it. The persisted
//! form is a JSON array whose element order is the format:
//!
//! `[id, lines, name, merged_paths, grouped_paths, side, color, date, visible]`
//!
//! There is no version field.

use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path as FsPath;

use bridgecam_core::{BoardSide, Color};
use chrono::{DateTime, Utc};

use crate::error::DesignerResult;
use crate::geometry::{Paths, Pathss};
use crate::items::{GeometryItem, ItemType};

/// Items derived from a file, shown or hidden together.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemGroup {
    items: Vec<GeometryItem>,
    visible: bool,
}

impl ItemGroup {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            visible: true,
        }
    }

    pub fn push(&mut self, mut item: GeometryItem) {
        item.visible = self.visible;
        self.items.push(item);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[GeometryItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<GeometryItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        for item in &mut self.items {
            item.visible = visible;
        }
    }
}

impl Default for ItemGroup {
    fn default() -> Self {
        Self::new()
    }
}

type Record = (
    i32,
    Vec<String>,
    String,
    Paths,
    Pathss,
    BoardSide,
    Color,
    DateTime<Utc>,
    bool,
);

#[derive(Debug, Clone, PartialEq)]
pub struct ToolpathFile {
    id: i32,
    lines: Vec<String>,
    name: String,
    merged_paths: Paths,
    grouped_paths: Pathss,
    side: BoardSide,
    color: Color,
    date: DateTime<Utc>,
    kind: ItemType,
    item_group: ItemGroup,
}

impl ToolpathFile {
    /// Empty record whose derived items will be of type `kind`.
    pub fn new(id: i32, name: impl Into<String>, kind: ItemType) -> Self {
        Self {
            id,
            lines: Vec::new(),
            name: name.into(),
            merged_paths: Paths::new(),
            grouped_paths: Pathss::new(),
            side: BoardSide::default(),
            color: Color::default(),
            date: Utc::now(),
            kind,
            item_group: ItemGroup::new(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_file_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// File-name component of [`Self::name`].
    pub fn short_name(&self) -> String {
        FsPath::new(&self.name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut Vec<String> {
        &mut self.lines
    }

    /// Stored merged paths, or all grouped paths flattened when none are
    /// stored.
    pub fn merged_paths(&self) -> Paths {
        if self.merged_paths.is_empty() {
            self.merge()
        } else {
            self.merged_paths.clone()
        }
    }

    pub fn set_merged_paths(&mut self, paths: Paths) {
        self.merged_paths = paths;
    }

    pub fn grouped_paths(&self) -> &Pathss {
        &self.grouped_paths
    }

    pub fn set_grouped_paths(&mut self, paths: Pathss) {
        self.grouped_paths = paths;
    }

    pub fn side(&self) -> BoardSide {
        self.side
    }

    pub fn set_side(&mut self, side: BoardSide) {
        self.side = side;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn kind(&self) -> ItemType {
        self.kind
    }

    pub fn item_group(&self) -> &ItemGroup {
        &self.item_group
    }

    pub fn item_group_mut(&mut self) -> &mut ItemGroup {
        &mut self.item_group
    }

    /// Rebuilds the item group: one item per path group, or a single item
    /// over the merged paths when there are no groups.
    pub fn create_items(&mut self) {
        self.item_group.clear();
        if self.grouped_paths.is_empty() {
            let merged = self.merged_paths();
            if !merged.is_empty() {
                self.item_group
                    .push(GeometryItem::new(self.kind, merged).with_color(self.color));
            }
        } else {
            for group in &self.grouped_paths {
                self.item_group
                    .push(GeometryItem::new(self.kind, group.clone()).with_color(self.color));
            }
        }
    }

    fn merge(&self) -> Paths {
        self.grouped_paths.iter().flatten().cloned().collect()
    }

    pub fn write<W: Write>(&self, writer: W) -> DesignerResult<()> {
        let record = (
            self.id,
            &self.lines,
            &self.name,
            &self.merged_paths,
            &self.grouped_paths,
            self.side,
            self.color,
            self.date,
            self.item_group.is_visible(),
        );
        serde_json::to_writer(writer, &record)?;
        Ok(())
    }

    /// Replaces this record's contents with the stored ones. Items are
    /// rebuilt before the stored visibility is applied.
    pub fn read<R: Read>(&mut self, reader: R) -> DesignerResult<()> {
        let (id, lines, name, merged_paths, grouped_paths, side, color, date, visible): Record =
            serde_json::from_reader(reader)?;
        self.id = id;
        self.lines = lines;
        self.name = name;
        self.merged_paths = merged_paths;
        self.grouped_paths = grouped_paths;
        self.side = side;
        self.color = color;
        self.date = date;
        self.create_items();
        self.item_group.set_visible(visible);
        Ok(())
    }

    pub fn save_to_file(&self, path: impl AsRef<FsPath>) -> DesignerResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()?;
        tracing::debug!("Saved toolpath file {} to {:?}", self.id, path.as_ref());
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<FsPath>, kind: ItemType) -> DesignerResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut record = Self::new(0, String::new(), kind);
        record.read(BufReader::new(file))?;
        Ok(record)
    }
}
