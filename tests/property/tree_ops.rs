//! Property-based tests for depot tree operations

use depot::changelist::{ChangeKind, ChangeList};
use depot::tree::{DepotPath, DepotTree};
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Depth-2 paths (dir/file) so no generated path can be a strict prefix of
/// another.
fn file_map() -> impl Strategy<Value = BTreeMap<(String, String), String>> {
    proptest::collection::btree_map(
        ("[a-e]{1,4}", "[a-e]{1,4}"),
        "[a-z ]{0,12}",
        1..12,
    )
}

#[test]
fn test_inserted_files_are_enumerated_exactly() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&file_map(), |files| {
            let mut tree = DepotTree::new();
            for ((dir, name), content) in &files {
                let path = DepotPath::new(&format!("{}/{}", dir, name));
                tree.add(&path, Some(content.clone())).unwrap();
            }

            // every inserted path exists with its content
            for ((dir, name), content) in &files {
                let path = DepotPath::new(&format!("{}/{}", dir, name));
                prop_assert!(tree.exists(&path));
                let got = tree.get(&path, &path);
                prop_assert_eq!(&got[0].1, content);
            }

            // enumeration from the root yields exactly the inserted set,
            // in sorted order
            let listed: Vec<String> = tree
                .get(&DepotPath::root(), &DepotPath::root())
                .into_iter()
                .map(|(p, _)| p.to_string())
                .collect();
            let expected: Vec<String> = files
                .keys()
                .map(|(dir, name)| format!("{}/{}", dir, name))
                .collect();
            prop_assert_eq!(listed, expected);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_delete_removes_only_the_target() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&file_map(), |files| {
            let mut tree = DepotTree::new();
            for ((dir, name), content) in &files {
                let path = DepotPath::new(&format!("{}/{}", dir, name));
                tree.add(&path, Some(content.clone())).unwrap();
            }

            let (victim_dir, victim_name) = files.keys().next().unwrap().clone();
            let victim = DepotPath::new(&format!("{}/{}", victim_dir, victim_name));
            tree.add(&victim, None).unwrap();

            prop_assert!(!tree.exists(&victim));
            for (dir, name) in files.keys() {
                if (dir, name) == (&victim_dir, &victim_name) {
                    continue;
                }
                let path = DepotPath::new(&format!("{}/{}", dir, name));
                prop_assert!(tree.exists(&path));
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_add_only_changelist_on_fresh_paths_always_applies() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&file_map(), |files| {
            let mut tree = DepotTree::new();
            let list = ChangeList::from_contents(
                ChangeKind::Add,
                files
                    .iter()
                    .map(|((dir, name), content)| {
                        (format!("{}/{}", dir, name), content.clone())
                    }),
            );

            let root = DepotPath::new("depot");
            prop_assert!(list.validate(&tree, &root).is_ok());
            list.apply(&mut tree, &root).unwrap();

            for ((dir, name), content) in &files {
                let path = root.combine(&DepotPath::new(&format!("{}/{}", dir, name)));
                prop_assert!(tree.exists(&path));
                let got = tree.get(&path, &path);
                prop_assert_eq!(&got[0].1, content);
            }
            Ok(())
        })
        .unwrap();
}
