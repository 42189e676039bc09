// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end scenarios through the public editor facade, exercising the
//! graph, history, grouping, clipboard, merge, and store surfaces together.

use galatea::merge::MergeDiff;
use galatea::model::Position;
use galatea::store::{DiagramStore, JsonFileStore};
use galatea::workflow::Editor;

#[test]
fn build_group_undo_redo_session() {
    let mut editor = Editor::new();

    let api = editor.add_node("API", "service", Position::new(0.0, 0.0));
    let db = editor.add_node("DB", "database", Position::new(240.0, 0.0));
    let cache = editor.add_node("Cache", "cache", Position::new(480.0, 0.0));

    let group = editor
        .create_group(&[api.clone(), db.clone()], "Backend")
        .expect("two root siblings form a group");
    assert!(editor.graph().is_group(&group));
    assert_eq!(editor.graph().nodes()[&api].depth(), 1);
    assert_eq!(editor.graph().nodes()[&api].z_order(), 10);
    assert_eq!(editor.graph().nodes()[&cache].depth(), 0);

    // Undo unwinds grouping, then each node creation, and stops cleanly.
    assert!(editor.undo());
    assert_eq!(editor.graph().nodes()[&api].parent_id(), None);
    assert!(editor.undo());
    assert!(editor.undo());
    assert!(editor.undo());
    assert!(editor.graph().nodes().is_empty());
    assert!(!editor.undo());

    // Redo replays the whole session.
    while editor.redo() {}
    assert_eq!(editor.graph().nodes().len(), 4);
    assert!(editor.graph().is_consistent());
}

#[test]
fn merge_is_one_undo_step_and_reconciles_ids() {
    let mut editor = Editor::new();
    editor.add_node("Existing", "service", Position::new(0.0, 0.0));

    let diff: MergeDiff = serde_json::from_str(
        r#"{
            "nodes_to_add": [
                {
                    "id": "web_1",
                    "type": "custom",
                    "position": { "x": 100, "y": 0 },
                    "data": { "label": "Web", "nodeType": "frontend" }
                },
                {
                    "id": "node_41",
                    "type": "custom",
                    "position": { "x": 200, "y": 0 },
                    "data": { "label": "Worker", "nodeType": "service", "tags": ["async"] }
                }
            ],
            "edges_to_add": [
                { "id": "e_web_worker", "source": "web_1", "target": "node_41" },
                { "id": "e_bad", "source": "web_1", "target": "missing" }
            ],
            "groups_to_create": [
                {
                    "group_id": "group_9",
                    "group_label": "Frontend",
                    "node_ids": ["web_1", "node_41"]
                }
            ]
        }"#,
    )
    .expect("diff parses");

    let outcome = editor.merge_diagram_changes(&diff);
    assert_eq!(outcome.nodes_added, 2);
    assert_eq!(outcome.edges_added, 1);
    assert_eq!(outcome.groups_created, 1);
    assert_eq!(outcome.skipped, 1);
    assert!(editor.graph().is_consistent());

    // Locally minted ids land strictly above everything the diff introduced.
    let fresh = editor.add_node("Next", "service", Position::default());
    assert_eq!(fresh.as_str(), "node_42");

    // The whole merge unwinds as a single step.
    assert!(editor.undo());
    assert!(editor.undo());
    assert_eq!(editor.graph().nodes().len(), 1);
}

#[test]
fn copy_paste_merge_and_persist_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("diagram.json"));

    let mut editor = Editor::new();
    let api = editor.add_node("API", "service", Position::new(10.0, 20.0));
    editor.add_node_tag(&api, "critical");
    editor.set_node_selected(&api, true);
    editor.copy_selected_nodes();
    let pasted = editor.paste_nodes();
    assert_eq!(pasted.len(), 1);
    assert_eq!(
        editor.graph().nodes()[&pasted[0]].position(),
        Position::new(50.0, 60.0)
    );

    store
        .save(editor.graph().nodes(), editor.graph().edges())
        .expect("save");

    let (nodes, edges) = store.load().expect("load").expect("present");
    let mut restored = Editor::new();
    restored.load_diagram(nodes, edges);

    assert_eq!(restored.graph().nodes().len(), 2);
    assert_eq!(restored.graph().nodes()[&api].data().tags(), ["critical"]);
    assert!(restored.graph().is_consistent());
    assert!(!restored.can_undo());

    // Counters continue past the persisted ids.
    let next = restored.add_node("New", "service", Position::default());
    assert!(restored.graph().nodes().contains_key(&next));
    assert_ne!(next, api);
    assert_ne!(next, pasted[0]);
}
