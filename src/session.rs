//! Scripted input sessions.
//!
//! A session script describes toolpath geometry and an ordered list of
//! pointer events. Replaying it drives a [`Scene`] exactly the way
//! interactive input would: pointer moves go out on the event bus, presses,
//! drags and releases go to a marker, and the scene ticks after every event.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use bridgecam_core::{AppEvent, SideOfMilling};
use bridgecam_designer::{
    path_from_points, ActiveBridgeSlot, BridgeCut, BridgeGlyph, BridgeParams, GeometryItem,
    ItemId, ItemType, Point, RenderStyle, Scene,
};
use bridgecam_settings::Config;
use serde::{Deserialize, Serialize};

/// Geometry item in a session script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptItem {
    #[serde(rename = "type", default = "default_item_type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub selected: bool,
    /// Closed paths as `[x, y]` pairs.
    pub paths: Vec<Vec<[f64; 2]>>,
}

fn default_item_type() -> ItemType {
    ItemType::Toolpath
}

/// One input event. Marker events go to `target` when given, otherwise to
/// the active marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerMove {
        x: f64,
        y: f64,
    },
    Press {
        #[serde(default)]
        target: Option<u64>,
    },
    Drag {
        x: f64,
        y: f64,
        #[serde(default)]
        target: Option<u64>,
    },
    Release {
        #[serde(default)]
        target: Option<u64>,
    },
    DoubleClick {
        #[serde(default)]
        target: Option<u64>,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub items: Vec<ScriptItem>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl SessionScript {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid session script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session script {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse session script {}", path.display()))
    }
}

/// Final state of one marker after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerReport {
    pub id: ItemId,
    pub pos: Point,
    pub ok: bool,
    pub angle: f64,
    pub glyph: BridgeGlyph,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub side: SideOfMilling,
    pub cuts: Vec<BridgeCut>,
    pub markers: Vec<MarkerReport>,
}

pub fn bridge_params(config: &Config) -> BridgeParams {
    BridgeParams::new(
        config.bridge.capture_diameter,
        config.bridge.tab_width,
        config.bridge.side,
    )
}

pub fn render_style(config: &Config) -> RenderStyle {
    RenderStyle {
        valid_color: config.render.valid_color,
        invalid_color: config.render.invalid_color,
        outline_color: config.render.outline_color,
        view_scale: config.render.view_scale,
    }
}

/// Replays `script` against a fresh scene configured from `config`.
pub fn replay(script: &SessionScript, config: &Config) -> Result<SessionOutcome> {
    config.validate().context("Invalid configuration")?;

    let mut scene = Scene::default();
    for item in &script.items {
        let paths = item
            .paths
            .iter()
            .map(|path| {
                let points: Vec<Point> = path.iter().map(|[x, y]| Point::new(*x, *y)).collect();
                path_from_points(&points)
            })
            .collect();
        scene.add_item(GeometryItem::new(item.item_type, paths).with_selected(item.selected));
    }

    let slot = ActiveBridgeSlot::new();
    scene
        .spawn_bridge(bridge_params(config), &slot)
        .context("Failed to create the first bridge")?;

    for (index, event) in script.events.iter().enumerate() {
        apply_event(&mut scene, &slot, event)
            .with_context(|| format!("Event #{} ({:?}) failed", index, event))?;
        scene.process_events();
    }

    let side = config.bridge.side;
    let style = render_style(config);
    let markers = scene
        .bridges()
        .map(|(id, marker)| MarkerReport {
            id,
            pos: marker.pos(),
            ok: marker.ok(),
            angle: marker.angle(),
            glyph: marker.glyph(&style),
        })
        .collect();

    let cuts = scene.bridge_cuts(side);
    tracing::info!("Session replay produced {} bridge cuts", cuts.len());
    Ok(SessionOutcome {
        side,
        cuts,
        markers,
    })
}

fn apply_event(scene: &mut Scene, slot: &ActiveBridgeSlot, event: &ScriptEvent) -> Result<()> {
    let target = |explicit: Option<u64>| -> Result<ItemId> {
        explicit
            .map(ItemId)
            .or_else(|| slot.get())
            .ok_or_else(|| anyhow!("No active bridge"))
    };

    match *event {
        ScriptEvent::PointerMove { x, y } => {
            if let Err(e) = scene.bus().publish(AppEvent::pointer_moved(x, y)) {
                tracing::debug!("Pointer move not delivered: {}", e);
            }
        }
        ScriptEvent::Press { target: t } => {
            scene.mouse_press(target(t)?)?;
        }
        ScriptEvent::Drag { x, y, target: t } => {
            scene.mouse_move(target(t)?, Point::new(x, y))?;
        }
        ScriptEvent::Release { target: t } => {
            let outcome = scene.mouse_release(target(t)?)?;
            tracing::debug!("Release: {:?}", outcome);
        }
        ScriptEvent::DoubleClick { target: t } => {
            scene.double_click(target(t)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_events() {
        let script = SessionScript::from_json(
            r#"{
                "items": [{"type": "gerber", "selected": true, "paths": [[[0, 0], [1, 0], [1, 1]]]}],
                "events": [
                    {"event": "pointer_move", "x": 1.0, "y": 2.0},
                    {"event": "press"},
                    {"event": "drag", "x": 3.0, "y": 4.0, "target": 2},
                    {"event": "release"},
                    {"event": "double_click", "target": 2}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(script.items[0].item_type, ItemType::Gerber);
        assert_eq!(script.events.len(), 5);
        assert_eq!(
            script.events[2],
            ScriptEvent::Drag {
                x: 3.0,
                y: 4.0,
                target: Some(2)
            }
        );
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        assert!(SessionScript::from_json(r#"{"events": [{"event": "wheel"}]}"#).is_err());
    }

    #[test]
    fn test_empty_script_has_no_cuts() {
        let outcome = replay(&SessionScript::default(), &Config::default()).unwrap();
        assert!(outcome.cuts.is_empty());
        assert_eq!(outcome.markers.len(), 1);
    }

    const SQUARE_SESSION: &str = r#"{
        "items": [
            {"type": "toolpath", "selected": true,
             "paths": [[[0, 0], [10, 0], [10, 10], [0, 10]]]}
        ],
        "events": [
            {"event": "pointer_move", "x": 5.0, "y": 0.4},
            {"event": "press"},
            {"event": "release"},
            {"event": "pointer_move", "x": 9.7, "y": 5.0},
            {"event": "press"},
            {"event": "release"}
        ]
    }"#;

    #[test]
    fn test_chain_of_two_confirmed_bridges() {
        let script = SessionScript::from_json(SQUARE_SESSION).unwrap();
        let outcome = replay(&script, &Config::default()).unwrap();

        // Two confirmed markers plus the third one still following the pointer.
        assert_eq!(outcome.markers.len(), 3);
        assert_eq!(outcome.cuts.len(), 2);
        assert_eq!(outcome.side, SideOfMilling::Outer);

        let first = outcome.cuts[0].point.to_point();
        assert!((first.x - 5.0).abs() < 1e-4);
        assert!((first.y + 0.5).abs() < 1e-4);

        let second = outcome.cuts[1].point.to_point();
        assert!((second.x - 10.5).abs() < 1e-4);
        assert!((second.y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_drop_off_toolpath_removes_marker() {
        let script = SessionScript::from_json(
            r#"{
                "items": [{"selected": true, "paths": [[[0, 0], [10, 0], [10, 10], [0, 10]]]}],
                "events": [
                    {"event": "press"},
                    {"event": "drag", "x": 5.0, "y": 40.0},
                    {"event": "release"}
                ]
            }"#,
        )
        .unwrap();
        let outcome = replay(&script, &Config::default()).unwrap();
        assert!(outcome.markers.is_empty());
        assert!(outcome.cuts.is_empty());
    }

    #[test]
    fn test_event_without_active_bridge_fails() {
        let script = SessionScript::from_json(
            r#"{
                "events": [
                    {"event": "double_click"},
                    {"event": "press"}
                ]
            }"#,
        )
        .unwrap();
        let err = replay(&script, &Config::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("No active bridge"));
    }

    #[test]
    fn test_config_side_selects_cut_points() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[bridge]\ncapture_diameter = 2.0\ntab_width = 2.0\nside = \"inner\"\n",
        )
        .unwrap();
        let config = Config::load_from_file(&config_path).unwrap();

        let script_path = temp_dir.path().join("session.json");
        std::fs::write(&script_path, SQUARE_SESSION).unwrap();
        let script = SessionScript::load(&script_path).unwrap();

        let outcome = replay(&script, &config).unwrap();
        let first = outcome.cuts[0].point.to_point();
        assert!((first.x - 5.0).abs() < 1e-4);
        assert!((first.y - 1.0).abs() < 1e-4);
        assert!((outcome.cuts[0].path.length() - 2.04).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.bridge.tab_width = 0.0;
        assert!(replay(&SessionScript::default(), &config).is_err());
    }
}
