//! Scene items and the collision query used by bridge snapping.

use std::collections::BTreeMap;
use std::fmt;

use bridgecam_core::Color;
use serde::{Deserialize, Serialize};

use crate::bridge::BridgeMarker;
use crate::geometry::{Bounds, Path, Paths};

/// Scene-unique item handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Item type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Generated toolpath contour.
    Toolpath,
    /// Gerber aperture or region.
    Gerber,
    /// Drill hole.
    Drill,
    /// Unprocessed imported geometry.
    Raw,
    /// Bridge marker.
    Bridge,
}

impl ItemType {
    /// True for item kinds whose paths a bridge may snap onto.
    pub fn carries_paths(self) -> bool {
        !matches!(self, ItemType::Bridge)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemType::Toolpath => "toolpath",
            ItemType::Gerber => "gerber",
            ItemType::Drill => "drill",
            ItemType::Raw => "raw",
            ItemType::Bridge => "bridge",
        };
        write!(f, "{}", name)
    }
}

/// Common interface of everything placed in a scene.
pub trait GraphicsItem {
    fn item_type(&self) -> ItemType;

    /// Scene-space bounding box.
    fn bounds(&self) -> Bounds;

    fn is_selected(&self) -> bool;

    /// Closed fixed-point paths carried by the item.
    fn paths(&self) -> &[Path];

    /// Draw priority; higher values are drawn on top.
    fn z_value(&self) -> f64;

    fn is_visible(&self) -> bool {
        true
    }
}

/// Spatial lookup offered by a scene.
pub trait SceneQuery {
    /// Items whose bounds overlap `region`, in insertion order.
    fn colliding_items(&self, region: &Bounds) -> Vec<&dyn GraphicsItem>;
}

/// Path-carrying item (toolpath, gerber, drill or raw geometry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryItem {
    pub item_type: ItemType,
    pub paths: Paths,
    pub selected: bool,
    pub visible: bool,
    pub color: Color,
    pub z_value: f64,
    #[serde(skip, default = "Bounds::empty")]
    bounds: Bounds,
}

impl GeometryItem {
    pub fn new(item_type: ItemType, paths: Paths) -> Self {
        let bounds = Bounds::from_paths(&paths);
        Self {
            item_type,
            paths,
            selected: false,
            visible: true,
            color: Color::default(),
            z_value: 0.0,
            bounds,
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn set_paths(&mut self, paths: Paths) {
        self.bounds = Bounds::from_paths(&paths);
        self.paths = paths;
    }
}

impl GraphicsItem for GeometryItem {
    fn item_type(&self) -> ItemType {
        self.item_type
    }

    fn bounds(&self) -> Bounds {
        if self.bounds.is_empty() {
            Bounds::from_paths(&self.paths)
        } else {
            self.bounds
        }
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn paths(&self) -> &[Path] {
        &self.paths
    }

    fn z_value(&self) -> f64 {
        self.z_value
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Anything a [`crate::Scene`] can hold.
#[derive(Debug)]
pub enum SceneItem {
    Geometry(GeometryItem),
    Bridge(BridgeMarker),
}

impl SceneItem {
    pub fn as_bridge(&self) -> Option<&BridgeMarker> {
        match self {
            SceneItem::Bridge(marker) => Some(marker),
            SceneItem::Geometry(_) => None,
        }
    }

    pub fn as_bridge_mut(&mut self) -> Option<&mut BridgeMarker> {
        match self {
            SceneItem::Bridge(marker) => Some(marker),
            SceneItem::Geometry(_) => None,
        }
    }

    pub fn as_geometry(&self) -> Option<&GeometryItem> {
        match self {
            SceneItem::Geometry(item) => Some(item),
            SceneItem::Bridge(_) => None,
        }
    }

    pub fn as_geometry_mut(&mut self) -> Option<&mut GeometryItem> {
        match self {
            SceneItem::Geometry(item) => Some(item),
            SceneItem::Bridge(_) => None,
        }
    }

    fn as_graphics(&self) -> &dyn GraphicsItem {
        match self {
            SceneItem::Geometry(item) => item,
            SceneItem::Bridge(marker) => marker,
        }
    }
}

impl GraphicsItem for SceneItem {
    fn item_type(&self) -> ItemType {
        self.as_graphics().item_type()
    }

    fn bounds(&self) -> Bounds {
        self.as_graphics().bounds()
    }

    fn is_selected(&self) -> bool {
        self.as_graphics().is_selected()
    }

    fn paths(&self) -> &[Path] {
        self.as_graphics().paths()
    }

    fn z_value(&self) -> f64 {
        self.as_graphics().z_value()
    }

    fn is_visible(&self) -> bool {
        self.as_graphics().is_visible()
    }
}

impl From<GeometryItem> for SceneItem {
    fn from(item: GeometryItem) -> Self {
        SceneItem::Geometry(item)
    }
}

impl From<BridgeMarker> for SceneItem {
    fn from(marker: BridgeMarker) -> Self {
        SceneItem::Bridge(marker)
    }
}

/// Id-ordered item collection. Ids are allocated monotonically, so
/// iteration order is insertion order.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: BTreeMap<ItemId, SceneItem>,
    next_id: u64,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: SceneItem) -> ItemId {
        self.next_id += 1;
        let id = ItemId(self.next_id);
        self.items.insert(id, item);
        id
    }

    /// Puts an item back under an id previously returned by [`Self::take`].
    pub(crate) fn restore(&mut self, id: ItemId, item: SceneItem) {
        self.items.insert(id, item);
    }

    pub fn take(&mut self, id: ItemId) -> Option<SceneItem> {
        self.items.remove(&id)
    }

    pub fn get(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut SceneItem> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &SceneItem)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ItemId, &mut SceneItem)> {
        self.items.iter_mut().map(|(id, item)| (*id, item))
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.keys().copied().collect()
    }
}

impl SceneQuery for ItemStore {
    fn colliding_items(&self, region: &Bounds) -> Vec<&dyn GraphicsItem> {
        self.items
            .values()
            .filter(|item| item.bounds().intersects(region))
            .map(|item| item as &dyn GraphicsItem)
            .collect()
    }
}

/// Plain list of items, for snapping against geometry outside a scene.
impl SceneQuery for Vec<GeometryItem> {
    fn colliding_items(&self, region: &Bounds) -> Vec<&dyn GraphicsItem> {
        self.iter()
            .filter(|item| item.bounds().intersects(region))
            .map(|item| item as &dyn GraphicsItem)
            .collect()
    }
}
