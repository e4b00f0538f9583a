use xmlweave::{Document, ElementId, ErrorKind, NamedCollector, Visitor};

fn name(document: &Document, id: ElementId) -> &str {
    document.get(id).map(|el| el.name()).unwrap_or_default()
}

#[test]
fn descendants_cover_every_added_element_once() -> Result<(), Box<dyn std::error::Error>> {
    let mut document = Document::new();
    let root = document.new_element("root");
    let mut added = Vec::new();
    // three subtrees of different shapes under one root
    for subtree in 0..3 {
        let branch = document.new_element(format!("branch{subtree}"));
        document.add_child(root, branch);
        added.push(branch);
        for leaf in 0..subtree {
            let node = document.new_element(format!("leaf{subtree}_{leaf}"));
            document.add_child(branch, node);
            added.push(node);
        }
    }
    document.set_root(root);

    let descendants = document.descendants(root);
    assert_eq!(descendants.len(), added.len());
    // pre-order: branch0, branch1, leaf1_0, branch2, leaf2_0, leaf2_1
    let names: Vec<_> = descendants.iter().map(|&id| name(&document, id)).collect();
    assert_eq!(
        names,
        vec!["branch0", "branch1", "leaf1_0", "branch2", "leaf2_0", "leaf2_1"]
    );
    Ok(())
}

#[test]
fn ancestry_is_inverse_of_descent() {
    let mut document = Document::new();
    let root = document.new_element("root");
    let mut chain = vec![root];
    let mut current = root;
    for depth in 0..4 {
        let next = document.new_element(format!("level{depth}"));
        document.add_child(current, next);
        chain.push(next);
        current = next;
    }
    document.set_root(root);

    let leaf = *chain.last().expect("chain is non-empty");
    let expected: Vec<ElementId> = chain[..chain.len() - 1].to_vec();
    assert_eq!(document.ancestry(leaf), expected);
}

#[test]
fn detached_subtree_is_unreachable_but_alive() {
    let mut document = Document::new();
    let root = document.new_element("root");
    let branch = document.new_element("branch");
    let leaf = document.new_element("leaf");
    document.add_child(root, branch);
    document.add_child(branch, leaf);
    document.set_root(root);

    document.remove_child(root, branch);
    assert!(document.descendants(root).is_empty());
    // the detached branch still carries its own subtree
    assert_eq!(document.descendants(branch), vec![leaf]);
    assert_eq!(
        document.get(branch).map(|el| el.name().to_string()),
        Some("branch".to_string())
    );
}

#[test]
fn global_edit_pipeline() -> Result<(), Box<dyn std::error::Error>> {
    let mut document = Document::new();
    let root = document.new_element("catalog");
    let first = document.new_element("entry");
    let second = document.new_element("entry");
    let other = document.new_element("note");
    document.add_child(root, first);
    document.add_child(root, second);
    document.add_child(root, other);
    document.set_root(root);

    assert_eq!(document.add_attributes_global("entry", "state", "new")?, 2);
    assert_eq!(
        document.rename_attributes_global("entry", "state", "status")?,
        2
    );
    assert_eq!(document.rename_elements_global("entry", "item")?, 2);

    assert_eq!(
        document.pretty_print(),
        "<catalog>\n\t<item status=\"new\"/>\n\t<item status=\"new\"/>\n\t<note/>\n</catalog>\n"
    );
    Ok(())
}

#[test]
fn missing_root_is_explicit() {
    let mut document = Document::new();
    let err = document
        .add_attributes_global("entry", "k", "v")
        .expect_err("rootless");
    assert_eq!(err.kind(), &ErrorKind::MissingRoot);
    // pretty_print is the one documented exception: empty string
    assert_eq!(document.pretty_print(), "");
}

#[test]
fn visitor_sees_whole_tree_in_preorder() -> Result<(), Box<dyn std::error::Error>> {
    struct NameLog(Vec<String>);

    impl Visitor for NameLog {
        fn visit(&mut self, document: &Document, element: ElementId) {
            self.0.push(name(document, element).to_string());
        }
    }

    let mut document = Document::new();
    let root = document.new_element("root");
    let a = document.new_element("a");
    let b = document.new_element("b");
    document.add_child(root, a);
    document.add_child(root, b);
    document.set_root(root);

    let mut log = NameLog(Vec::new());
    document.accept(&mut log)?;
    assert_eq!(log.0, vec!["root", "a", "b"]);
    Ok(())
}

#[test]
fn named_collector_finds_matches_in_preorder() {
    let mut document = Document::new();
    let root = document.new_element("root");
    let first = document.new_element("entry");
    let nested = document.new_element("entry");
    document.add_child(root, first);
    document.add_child(first, nested);
    document.set_root(root);

    let mut collector = NamedCollector::new("entry");
    document.walk(root, &mut collector);
    assert_eq!(collector.into_matches(), vec![first, nested]);
}
