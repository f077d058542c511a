//! Versioned layout persistence.
//!
//! A [`LayoutSnapshot`] carries the flattened relationship list plus, per
//! tab group, the ordered child key list and the selected key. Identity is
//! by part key (host-stable strings), never by runtime id.
//!
//! # Schema versioning policy
//!
//! - **Additive fields** may be carried in the `extensions` map without a
//!   version bump.
//! - **Breaking changes** (field removal, semantic changes) require
//!   incrementing [`LAYOUT_SNAPSHOT_SCHEMA_VERSION`] and adding a migration
//!   path.
//! - Snapshots carry their schema version; loaders reject unknown versions
//!   with actionable diagnostics.
//!
//! Save and restore report aggregated success as a `bool`; per-record
//! trouble is logged and worked around (missing parts restore as
//! placeholders), never surfaced as a failure.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use casement_core::{LayoutPart, PartKind, StackChildEntry, StackSurface as _};
use serde::{Deserialize, Serialize};

use crate::container::{
    PartId, Relationship, RelationshipInfo, SashContainer, SavedRelation,
};
use crate::placeholder::PartPlaceholder;
use crate::stack::PartStack;
use crate::tree::LayoutTree;

/// Current layout snapshot schema version.
pub const LAYOUT_SNAPSHOT_SCHEMA_VERSION: u16 = 1;

/// Serialized part classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKindRecord {
    Pane,
    Stack,
    Placeholder,
    EditorArea,
}

impl From<PartKind> for PartKindRecord {
    fn from(kind: PartKind) -> Self {
        match kind {
            PartKind::Pane => Self::Pane,
            PartKind::Stack => Self::Stack,
            PartKind::Placeholder => Self::Placeholder,
            PartKind::EditorArea => Self::EditorArea,
        }
    }
}

impl From<PartKindRecord> for PartKind {
    fn from(record: PartKindRecord) -> Self {
        match record {
            PartKindRecord::Pane => Self::Pane,
            PartKindRecord::Stack => Self::Stack,
            PartKindRecord::Placeholder => Self::Placeholder,
            PartKindRecord::EditorArea => Self::EditorArea,
        }
    }
}

/// One persisted split relation (or, first in the list, the root anchor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub part: String,
    #[serde(default)]
    pub relative: Option<String>,
    pub relationship: Relationship,
    pub left: i32,
    pub right: i32,
    pub kind: PartKindRecord,
}

/// One persisted stack child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackChildRecord {
    pub key: String,
    #[serde(default)]
    pub placeholder: bool,
}

/// Persisted state of one tab group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackRecord {
    pub key: String,
    pub children: Vec<StackChildRecord>,
    #[serde(default)]
    pub selected: Option<String>,
}

/// Persisted layout: relationship list plus stack contents.
///
/// Forward-compatible: unknown fields land in `extensions` for
/// round-tripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LayoutSnapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u16,
    #[serde(default)]
    pub relations: Vec<RelationRecord>,
    #[serde(default)]
    pub stacks: Vec<StackRecord>,
    /// Which part had focus when the layout was persisted.
    #[serde(default)]
    pub active_part: Option<String>,
    /// Forward-compatible extension bag.
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
}

fn default_schema_version() -> u16 {
    LAYOUT_SNAPSHOT_SCHEMA_VERSION
}

impl LayoutSnapshot {
    /// Empty v1 snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema_version: LAYOUT_SNAPSHOT_SCHEMA_VERSION,
            ..Self::default()
        }
    }

    /// Validate schema and structural invariants.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.schema_version != LAYOUT_SNAPSHOT_SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.schema_version,
                expected: LAYOUT_SNAPSHOT_SCHEMA_VERSION,
            });
        }

        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for (index, record) in self.relations.iter().enumerate() {
            if record.part.is_empty() {
                return Err(SnapshotError::EmptyPartKey { index });
            }
            if !seen.insert(record.part.as_str()) {
                return Err(SnapshotError::DuplicatePartKey {
                    key: record.part.clone(),
                });
            }
            match (&record.relative, index) {
                (Some(_), 0) => {
                    return Err(SnapshotError::AnchorHasRelative {
                        key: record.part.clone(),
                    });
                }
                (None, 0) => {}
                (None, _) => {
                    return Err(SnapshotError::MissingRelative {
                        key: record.part.clone(),
                    });
                }
                (Some(relative), _) => {
                    // Relatives must be materialized before they are named,
                    // or replay cannot reproduce the tree.
                    if !seen.contains(relative.as_str()) {
                        return Err(SnapshotError::RelativeOutOfOrder {
                            key: record.part.clone(),
                            relative: relative.clone(),
                        });
                    }
                }
            }
        }

        for stack in &self.stacks {
            let declared = self
                .relations
                .iter()
                .find(|record| record.part == stack.key);
            match declared {
                Some(record) if record.kind == PartKindRecord::Stack => {}
                _ => {
                    return Err(SnapshotError::UnknownStackKey {
                        key: stack.key.clone(),
                    });
                }
            }
            if let Some(selected) = &stack.selected {
                let member = stack
                    .children
                    .iter()
                    .any(|child| &child.key == selected && !child.placeholder);
                if !member {
                    return Err(SnapshotError::SelectedNotMember {
                        stack: stack.key.clone(),
                        selected: selected.clone(),
                    });
                }
            }
        }

        if let Some(active) = &self.active_part
            && !self.relations.iter().any(|record| &record.part == active)
        {
            return Err(SnapshotError::ActivePartNotFound {
                key: active.clone(),
            });
        }

        Ok(())
    }

    /// Canonicalize for deterministic serialization. Relation order is
    /// load-bearing and untouched; stacks sort by key.
    pub fn canonicalize(&mut self) {
        self.stacks.sort_by(|a, b| a.key.cmp(&b.key));
    }

    /// Deterministic hash for state diagnostics.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.schema_version.hash(&mut hasher);
        for record in &self.relations {
            record.part.hash(&mut hasher);
            record.relative.hash(&mut hasher);
            (record.relationship as u8).hash(&mut hasher);
            record.left.hash(&mut hasher);
            record.right.hash(&mut hasher);
        }
        for stack in &self.stacks {
            stack.key.hash(&mut hasher);
            stack.selected.hash(&mut hasher);
            for child in &stack.children {
                child.key.hash(&mut hasher);
                child.placeholder.hash(&mut hasher);
            }
        }
        self.active_part.hash(&mut hasher);
        for (key, value) in &self.extensions {
            key.hash(&mut hasher);
            value.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Errors from snapshot validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    UnsupportedVersion { found: u16, expected: u16 },
    EmptyPartKey { index: usize },
    DuplicatePartKey { key: String },
    AnchorHasRelative { key: String },
    MissingRelative { key: String },
    RelativeOutOfOrder { key: String, relative: String },
    UnknownStackKey { key: String },
    SelectedNotMember { stack: String, selected: String },
    ActivePartNotFound { key: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported layout snapshot schema version {found} (expected {expected})"
                )
            }
            Self::EmptyPartKey { index } => {
                write!(f, "relation {index} has an empty part key")
            }
            Self::DuplicatePartKey { key } => {
                write!(f, "part key {key:?} appears more than once")
            }
            Self::AnchorHasRelative { key } => {
                write!(f, "anchor record {key:?} must not name a relative")
            }
            Self::MissingRelative { key } => {
                write!(f, "relation {key:?} names no relative")
            }
            Self::RelativeOutOfOrder { key, relative } => {
                write!(
                    f,
                    "relation {key:?} names relative {relative:?} before it is materialized"
                )
            }
            Self::UnknownStackKey { key } => {
                write!(f, "stack record {key:?} has no stack relation")
            }
            Self::SelectedNotMember { stack, selected } => {
                write!(
                    f,
                    "stack {stack:?} selects {selected:?} which is not a presentable member"
                )
            }
            Self::ActivePartNotFound { key } => {
                write!(f, "active part {key:?} not present in the layout")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

// =========================================================================
// Migration scaffolding
// =========================================================================

/// Errors from snapshot migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotMigrationError {
    /// Version is newer than this build understands.
    UnsupportedVersion { version: u16 },
    /// Migration from the given version is not implemented.
    NoMigrationPath { from: u16, to: u16 },
}

impl fmt::Display for SnapshotMigrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { version } => {
                write!(f, "unsupported schema version {version} for migration")
            }
            Self::NoMigrationPath { from, to } => {
                write!(f, "no migration path from v{from} to v{to}")
            }
        }
    }
}

impl std::error::Error for SnapshotMigrationError {}

/// Migrate a snapshot to the current schema version.
///
/// For v1 (current) this is the identity; future versions chain through
/// each intermediate version.
pub fn migrate_snapshot(
    snapshot: LayoutSnapshot,
) -> Result<LayoutSnapshot, SnapshotMigrationError> {
    match snapshot.schema_version {
        LAYOUT_SNAPSHOT_SCHEMA_VERSION => Ok(snapshot),
        version if version > LAYOUT_SNAPSHOT_SCHEMA_VERSION => {
            Err(SnapshotMigrationError::UnsupportedVersion { version })
        }
        version => Err(SnapshotMigrationError::NoMigrationPath {
            from: version,
            to: LAYOUT_SNAPSHOT_SCHEMA_VERSION,
        }),
    }
}

/// Whether a snapshot requires migration before restore.
#[must_use]
pub fn needs_migration(snapshot: &LayoutSnapshot) -> bool {
    snapshot.schema_version != LAYOUT_SNAPSHOT_SCHEMA_VERSION
}

// =========================================================================
// Container save/restore
// =========================================================================

impl SashContainer {
    /// Write the current layout into `snapshot`, replacing its contents.
    ///
    /// Returns aggregated success; per-record trouble is logged and the
    /// record skipped.
    pub fn save_state(&self, snapshot: &mut LayoutSnapshot) -> bool {
        let mut complete = true;
        snapshot.schema_version = LAYOUT_SNAPSHOT_SCHEMA_VERSION;
        snapshot.relations.clear();
        snapshot.stacks.clear();

        for info in self.compute_relation() {
            let Some(part) = self.part(info.part) else {
                tracing::warn!(part = info.part.get(), "relation names unregistered part");
                complete = false;
                continue;
            };
            let relative = match info.relative {
                Some(relative_id) => match self.part(relative_id) {
                    Some(relative) => Some(relative.key().to_string()),
                    None => {
                        tracing::warn!(
                            part = info.part.get(),
                            relative = relative_id.get(),
                            "relation relative unregistered; dropped"
                        );
                        complete = false;
                        continue;
                    }
                },
                None => None,
            };
            snapshot.relations.push(RelationRecord {
                part: part.key().to_string(),
                relative,
                relationship: info.relationship,
                left: info.left,
                right: info.right,
                kind: part.kind().into(),
            });
        }

        for id in self.children().collect::<Vec<_>>() {
            let Some(part) = self.part(id) else {
                continue;
            };
            let Some(stack) = part.as_stack() else {
                continue;
            };
            snapshot.stacks.push(StackRecord {
                key: part.key().to_string(),
                children: stack
                    .entries()
                    .into_iter()
                    .map(|entry| StackChildRecord {
                        key: entry.key,
                        placeholder: entry.placeholder,
                    })
                    .collect(),
                selected: stack.displayed(),
            });
        }
        snapshot.canonicalize();
        complete
    }

    /// Rebuild the layout from a snapshot.
    ///
    /// `factory` materializes parts by key and kind; whatever it declines is
    /// restored as a placeholder (or an empty stack for stack records), so a
    /// part opened later can take its saved spot through
    /// [`SashContainer::add_for_placeholder`]. Returns aggregated success; a
    /// snapshot that fails validation is rejected without touching the
    /// current layout.
    pub fn restore_state(
        &mut self,
        snapshot: &LayoutSnapshot,
        factory: &mut dyn FnMut(&str, PartKind) -> Option<Box<dyn LayoutPart>>,
    ) -> bool {
        if let Err(error) = snapshot.validate() {
            tracing::warn!(%error, "layout snapshot rejected");
            return false;
        }

        self.tree = LayoutTree::new();
        self.parts.clear();
        self.saved_relations.clear();

        let mut complete = true;
        let mut ids_by_key: BTreeMap<&str, PartId> = BTreeMap::new();
        let mut infos = Vec::with_capacity(snapshot.relations.len());

        for record in &snapshot.relations {
            let kind = PartKind::from(record.kind);
            let part = factory(&record.part, kind).unwrap_or_else(|| {
                if kind == PartKind::Stack {
                    Box::new(PartStack::new(record.part.clone()))
                } else {
                    Box::new(PartPlaceholder::new(record.part.clone()))
                }
            });
            let id = self.register(part);
            ids_by_key.insert(record.part.as_str(), id);

            let relative = record
                .relative
                .as_deref()
                .and_then(|key| ids_by_key.get(key).copied());
            if record.relative.is_some() && relative.is_none() {
                // validate() makes this unreachable; belt and braces.
                tracing::warn!(part = record.part.as_str(), "relative vanished during restore");
                complete = false;
            }
            infos.push(RelationshipInfo {
                part: id,
                relative,
                relationship: record.relationship,
                left: record.left,
                right: record.right,
            });
        }

        complete &= self.replay_relations(&infos);

        for stack_record in &snapshot.stacks {
            let Some(id) = ids_by_key.get(stack_record.key.as_str()) else {
                complete = false;
                continue;
            };
            let Some(stack) = self
                .part_mut(*id)
                .and_then(|part| part.as_stack_mut())
            else {
                tracing::warn!(
                    key = stack_record.key.as_str(),
                    "stack record restored onto a non-stack part"
                );
                complete = false;
                continue;
            };
            let children = stack_record
                .children
                .iter()
                .map(|child| StackChildEntry {
                    key: child.key.clone(),
                    placeholder: child.placeholder,
                })
                .collect();
            complete &= stack.restore_children(children, stack_record.selected.clone());
        }

        // Remember every relation by key so placeholders that never
        // materialized (or get closed later) can reclaim their spot.
        self.saved_relations = snapshot
            .relations
            .iter()
            .map(|record| SavedRelation {
                part_key: record.part.clone(),
                relative_key: record.relative.clone(),
                relationship: record.relationship,
                left: record.left,
                right: record.right,
            })
            .collect();

        complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{LayoutConfig, Relationship};
    use crate::fixtures::FixturePart;
    use casement_core::{Rect, StackSurface};

    fn populated_container() -> SashContainer {
        let mut container = SashContainer::new(LayoutConfig::default());
        container.set_active(true);
        let editor = container.add(
            Box::new(FixturePart::editor_area("editor")),
            Relationship::Left,
            0.5,
            None,
        );
        let mut stack = PartStack::new("stack.views");
        stack.add_child("views:outline");
        stack.add_child("views:problems");
        stack.add_placeholder("views:tasks");
        stack.commit_selection();
        let _ = container.add(Box::new(stack), Relationship::Right, 0.25, Some(editor));
        container.set_bounds(Rect::new(0, 0, 1000, 600));
        container
    }

    fn saved_snapshot() -> LayoutSnapshot {
        let container = populated_container();
        let mut snapshot = LayoutSnapshot::new();
        assert!(container.save_state(&mut snapshot));
        snapshot
    }

    // ---- Save ----

    #[test]
    fn save_emits_anchor_then_relations() {
        let snapshot = saved_snapshot();
        assert_eq!(snapshot.relations.len(), 2);
        assert_eq!(snapshot.relations[0].part, "editor");
        assert_eq!(snapshot.relations[0].relative, None);
        assert_eq!(snapshot.relations[1].part, "stack.views");
        assert_eq!(snapshot.relations[1].relative, Some("editor".to_string()));
        assert_eq!(snapshot.relations[1].relationship, Relationship::Right);
    }

    #[test]
    fn save_records_stack_children_and_selection() {
        let snapshot = saved_snapshot();
        assert_eq!(snapshot.stacks.len(), 1);
        let stack = &snapshot.stacks[0];
        assert_eq!(stack.key, "stack.views");
        assert_eq!(stack.children.len(), 3);
        assert!(stack.children[2].placeholder);
        assert_eq!(stack.selected, Some("views:problems".to_string()));
    }

    #[test]
    fn saved_snapshot_validates() {
        assert!(saved_snapshot().validate().is_ok());
    }

    // ---- Validation ----

    #[test]
    fn validate_rejects_wrong_version() {
        let mut snapshot = saved_snapshot();
        snapshot.schema_version = 99;
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::UnsupportedVersion {
                found: 99,
                expected: 1
            })
        );
    }

    #[test]
    fn validate_rejects_duplicate_keys() {
        let mut snapshot = saved_snapshot();
        let mut duplicate = snapshot.relations[1].clone();
        duplicate.relative = Some("editor".to_string());
        snapshot.relations.push(duplicate);
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::DuplicatePartKey { .. })
        ));
    }

    #[test]
    fn validate_rejects_forward_relative() {
        let mut snapshot = saved_snapshot();
        snapshot.relations[1].relative = Some("not-yet".to_string());
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::RelativeOutOfOrder { .. })
        ));
    }

    #[test]
    fn validate_rejects_placeholder_selection() {
        let mut snapshot = saved_snapshot();
        snapshot.stacks[0].selected = Some("views:tasks".to_string());
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::SelectedNotMember { .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_stack() {
        let mut snapshot = saved_snapshot();
        snapshot.stacks[0].key = "stranger".to_string();
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::UnknownStackKey { .. })
        ));
    }

    #[test]
    fn validate_rejects_missing_active_part() {
        let mut snapshot = saved_snapshot();
        snapshot.active_part = Some("gone".to_string());
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::ActivePartNotFound { .. })
        ));
    }

    // ---- Restore ----

    #[test]
    fn restore_rebuilds_isomorphic_layout() {
        let snapshot = saved_snapshot();
        let mut restored = SashContainer::new(LayoutConfig::default());
        restored.set_active(true);
        restored.set_bounds(Rect::new(0, 0, 1000, 600));
        let ok = restored.restore_state(&mut snapshot.clone(), &mut |key, kind| {
            (kind == PartKind::EditorArea).then(|| {
                Box::new(FixturePart::editor_area(key)) as Box<dyn LayoutPart>
            })
        });
        assert!(ok);

        let mut resaved = LayoutSnapshot::new();
        assert!(restored.save_state(&mut resaved));
        assert_eq!(resaved.state_hash(), snapshot.state_hash());
        restored.tree().validate().unwrap();
    }

    #[test]
    fn restore_materializes_missing_parts_as_placeholders() {
        let snapshot = saved_snapshot();
        let mut restored = SashContainer::new(LayoutConfig::default());
        // Factory declines everything: the editor becomes a placeholder, the
        // stack an empty stack.
        assert!(restored.restore_state(&snapshot, &mut |_, _| None));

        let editor = restored.part_id_by_key("editor").unwrap();
        assert_eq!(
            restored.part(editor).map(|part| part.kind()),
            Some(PartKind::Placeholder)
        );
        let stack = restored.part_id_by_key("stack.views").unwrap();
        assert_eq!(
            restored.part(stack).map(|part| part.kind()),
            Some(PartKind::Stack)
        );
    }

    #[test]
    fn restore_rejects_invalid_snapshot_without_mutation() {
        let mut snapshot = saved_snapshot();
        snapshot.schema_version = 7;
        let mut container = populated_container();
        let parts_before: Vec<_> = container.children().collect();
        assert!(!container.restore_state(&snapshot, &mut |_, _| None));
        assert_eq!(container.children().collect::<Vec<_>>(), parts_before);
    }

    #[test]
    fn live_placeholder_swaps_in_place() {
        let snapshot = saved_snapshot();
        let mut restored = SashContainer::new(LayoutConfig::default());
        restored.set_active(true);
        restored.set_bounds(Rect::new(0, 0, 1000, 600));
        assert!(restored.restore_state(&snapshot, &mut |_, _| None));

        // "editor" restored as a live placeholder; the real part takes over
        // its exact leaf.
        let placeholder = restored.part_id_by_key("editor").unwrap();
        let leaf = restored.tree().leaf_for_part(placeholder).unwrap();
        let editor = restored
            .add_for_placeholder(Box::new(FixturePart::editor_area("editor")), "editor");
        assert_eq!(restored.tree().leaf_for_part(editor), Some(leaf));
        assert_eq!(restored.part_id_by_key("editor"), Some(editor));
        restored.tree().validate().unwrap();
    }

    #[test]
    fn culled_part_reclaims_spot_via_saved_relations() {
        let snapshot = saved_snapshot();
        let mut restored = SashContainer::new(LayoutConfig::default());
        restored.set_active(true);
        restored.set_bounds(Rect::new(0, 0, 1000, 600));
        assert!(restored.restore_state(&snapshot, &mut |_, _| None));

        // Cull the restored stack entirely, then reopen it: the remembered
        // relationship list places it back beside the editor.
        let stack = restored.part_id_by_key("stack.views").unwrap();
        drop(restored.remove(stack));
        assert_eq!(restored.tree().leaf_count(), 1);

        let reopened = restored.add_for_placeholder(
            Box::new(PartStack::with_child("stack.views", "views:outline")),
            "stack.views",
        );
        assert!(restored.part(reopened).is_some());
        assert_eq!(restored.tree().leaf_count(), 2);
        restored.tree().validate().unwrap();
    }

    // ---- Serde ----

    #[test]
    fn snapshot_json_wire_shape() {
        let snapshot = saved_snapshot();
        let json = serde_json::to_value(&snapshot).expect("snapshot should serialize");
        assert_eq!(json["schema_version"], serde_json::json!(1));
        assert_eq!(json["relations"][0]["part"], serde_json::json!("editor"));
        assert_eq!(json["relations"][1]["relationship"], serde_json::json!("right"));
        assert_eq!(json["relations"][1]["kind"], serde_json::json!("stack"));
        assert!(json["stacks"][0]["children"].is_array());
    }

    #[test]
    fn snapshot_json_round_trip() {
        let snapshot = saved_snapshot();
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let back: LayoutSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, snapshot);
        assert_eq!(back.state_hash(), snapshot.state_hash());
    }

    #[test]
    fn snapshot_json_defaults_missing_fields() {
        let json = r#"{
            "relations": [
                {"part": "editor", "relationship": "left", "left": 0, "right": 0, "kind": "editor_area"}
            ]
        }"#;
        let snapshot: LayoutSnapshot = serde_json::from_str(json).expect("deserialize");
        assert_eq!(snapshot.schema_version, LAYOUT_SNAPSHOT_SCHEMA_VERSION);
        assert!(snapshot.stacks.is_empty());
        assert!(snapshot.active_part.is_none());
        assert!(snapshot.validate().is_ok());
    }

    // ---- Migration ----

    #[test]
    fn migrate_current_version_is_identity() {
        let snapshot = saved_snapshot();
        let migrated = migrate_snapshot(snapshot.clone()).expect("identity migration");
        assert_eq!(migrated, snapshot);
        assert!(!needs_migration(&migrated));
    }

    #[test]
    fn migrate_future_version_fails() {
        let mut snapshot = saved_snapshot();
        snapshot.schema_version = 9;
        assert_eq!(
            migrate_snapshot(snapshot),
            Err(SnapshotMigrationError::UnsupportedVersion { version: 9 })
        );
    }

    #[test]
    fn migrate_ancient_version_has_no_path() {
        let mut snapshot = saved_snapshot();
        snapshot.schema_version = 0;
        assert_eq!(
            migrate_snapshot(snapshot),
            Err(SnapshotMigrationError::NoMigrationPath { from: 0, to: 1 })
        );
        let mut old = LayoutSnapshot::new();
        old.schema_version = 0;
        assert!(needs_migration(&old));
    }

    // ---- Hashing ----

    #[test]
    fn state_hash_tracks_content() {
        let snapshot = saved_snapshot();
        let mut changed = snapshot.clone();
        changed.relations[1].left = snapshot.relations[1].left + 1;
        assert_ne!(snapshot.state_hash(), changed.state_hash());
        assert_eq!(snapshot.state_hash(), saved_snapshot().state_hash());
    }
}
