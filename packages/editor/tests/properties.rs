//! Property tests for tree invariants under arbitrary edit sequences

use std::collections::HashSet;

use mailcraft_editor::Editor;
use mailcraft_model::{collect_ids, validate_forest, ComponentId, ComponentType};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add { type_index: usize, parent: Option<usize> },
    Duplicate(usize),
    Move { node: usize, parent: Option<usize>, index: usize },
    Remove(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..ComponentType::ALL.len(), proptest::option::of(0usize..64))
            .prop_map(|(type_index, parent)| Op::Add { type_index, parent }),
        2 => (0usize..64).prop_map(Op::Duplicate),
        2 => (0usize..64, proptest::option::of(0usize..64), 0usize..8)
            .prop_map(|(node, parent, index)| Op::Move { node, parent, index }),
        1 => (0usize..64).prop_map(Op::Remove),
    ]
}

/// Pick an existing id by index, wrapping around
fn pick(editor: &Editor, index: usize) -> Option<ComponentId> {
    let ids = collect_ids(&editor.template().components);
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()].clone())
    }
}

fn run(ops: &[Op]) -> Editor {
    let mut editor = Editor::new();
    for op in ops {
        match op {
            Op::Add { type_index, parent } => {
                let parent = parent.and_then(|p| pick(&editor, p));
                editor.add_component(ComponentType::ALL[*type_index], parent.as_ref());
            }
            Op::Duplicate(node) => {
                if let Some(id) = pick(&editor, *node) {
                    editor.duplicate_component(&id);
                }
            }
            Op::Move { node, parent, index } => {
                if let Some(id) = pick(&editor, *node) {
                    let parent = parent.and_then(|p| pick(&editor, p));
                    editor.move_component(&id, *index, parent.as_ref());
                }
            }
            Op::Remove(node) => {
                if let Some(id) = pick(&editor, *node) {
                    editor.remove_component(&id);
                }
            }
        }
    }
    editor
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn ids_stay_unique(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let editor = run(&ops);

        let ids = collect_ids(&editor.template().components);
        let unique: HashSet<&ComponentId> = ids.iter().collect();
        prop_assert_eq!(ids.len(), unique.len());
        prop_assert!(validate_forest(&editor.template().components).is_ok());
    }

    #[test]
    fn moving_into_own_subtree_changes_nothing(
        ops in proptest::collection::vec(op_strategy(), 1..30),
        node in 0usize..64,
        target in 0usize..64,
    ) {
        let mut editor = run(&ops);
        let Some(id) = pick(&editor, node) else {
            return Ok(());
        };
        let subtree = collect_ids(std::slice::from_ref(editor.find_component(&id).unwrap()));
        let parent = subtree[target % subtree.len()].clone();
        let before = editor.snapshot();

        prop_assert!(!editor.move_component(&id, 0, Some(&parent)));
        prop_assert_eq!(editor.template(), before.as_ref());
    }

    #[test]
    fn remove_drops_whole_subtree(
        ops in proptest::collection::vec(op_strategy(), 1..30),
        node in 0usize..64,
    ) {
        let mut editor = run(&ops);
        let Some(id) = pick(&editor, node) else {
            return Ok(());
        };
        let subtree_size = editor.find_component(&id).unwrap().node_count();
        let before = editor.template().node_count();

        prop_assert!(editor.remove_component(&id));
        prop_assert_eq!(editor.template().node_count(), before - subtree_size);
    }

    #[test]
    fn export_is_idempotent(ops in proptest::collection::vec(op_strategy(), 0..30)) {
        let editor = run(&ops);

        prop_assert_eq!(editor.export_html(), editor.export_html());
    }
}
