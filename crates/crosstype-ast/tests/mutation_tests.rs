use super::*;
use crate::factories::NodeInit;

fn property(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let value = arena.create_integer(NodeInit::new()).unwrap();
    arena
        .create_property_declaration(name, value, NodeInit::new())
        .unwrap()
}

fn member_keys(arena: &NodeArena, object: NodeIndex) -> Vec<String> {
    arena
        .node(object)
        .unwrap()
        .child_map(keys::MEMBERS)
        .map(|members| members.keys().map(str::to_owned).collect())
        .unwrap_or_default()
}

struct Fixture {
    arena: NodeArena,
    class: NodeIndex,
    x: NodeIndex,
}

/// Definition "Point" > Class "Point" > Property "x" > Integer
fn point() -> Fixture {
    let mut arena = NodeArena::new();
    let x = property(&mut arena, "x");
    let class = arena
        .create_class_declaration("Point", [x], NodeInit::new())
        .unwrap();
    arena
        .create_definition("Point", [class], NodeInit::new())
        .unwrap();
    Fixture { arena, class, x }
}

// =============================================================================
// Names
// =============================================================================

#[test]
fn test_rename_rekeys_parent_map_in_place() {
    let mut arena = NodeArena::new();
    let a = property(&mut arena, "a");
    let b = property(&mut arena, "b");
    let interface = arena
        .create_interface_declaration("I", [a, b], NodeInit::new())
        .unwrap();

    arena.set_name(a, "renamed").unwrap();
    assert_eq!(member_keys(&arena, interface), vec!["renamed", "b"]);

    arena
        .update_properties(b, |node| node.name = Some("other".to_string()))
        .unwrap();
    assert_eq!(member_keys(&arena, interface), vec!["renamed", "other"]);
}

#[test]
fn test_rename_onto_sibling_name_detaches_sibling() {
    let mut arena = NodeArena::new();
    let a = property(&mut arena, "a");
    let b = property(&mut arena, "b");
    let interface = arena
        .create_interface_declaration("I", [a, b], NodeInit::new())
        .unwrap();

    arena.set_name(a, "b").unwrap();

    assert_eq!(member_keys(&arena, interface), vec!["b"]);
    let members = arena.node(interface).unwrap().child_map(keys::MEMBERS).unwrap();
    assert_eq!(members.get("b"), Some(a));
    assert!(arena.is_live(b));
    assert_eq!(arena.parent_of(b), None);
}

#[test]
fn test_losing_name_detaches_map_member() {
    let mut f = point();
    f.arena.update_properties(f.x, |node| node.name = None).unwrap();

    assert!(member_keys(&f.arena, f.class).is_empty());
    assert_eq!(f.arena.parent_of(f.x), None);
}

#[test]
fn test_type_parameter_rename_rekeys_bound_type_arguments() {
    let mut arena = NodeArena::new();
    let type_parameter = arena
        .create_type_parameter_declaration("T", None, NodeInit::new())
        .unwrap();
    let class = arena
        .create_class_declaration(
            "Box",
            [],
            NodeInit::new().map(keys::TYPE_PARAMETERS, [type_parameter]),
        )
        .unwrap();
    let argument_type = arena.create_string(NodeInit::new()).unwrap();
    let argument = arena
        .create_type_argument(type_parameter, argument_type, NodeInit::new())
        .unwrap();
    let definition = arena
        .create_definition(
            "Box",
            [class],
            NodeInit::new().map(keys::TYPE_ARGUMENTS, [argument]),
        )
        .unwrap();

    arena.set_name(type_parameter, "U").unwrap();

    let parameters = arena.node(class).unwrap().child_map(keys::TYPE_PARAMETERS).unwrap();
    assert_eq!(parameters.get("U"), Some(type_parameter));
    let arguments = arena
        .node(definition)
        .unwrap()
        .child_map(keys::TYPE_ARGUMENTS)
        .unwrap();
    assert_eq!(arguments.keys().collect::<Vec<_>>(), vec!["U"]);
    assert_eq!(arguments.get("U"), Some(argument));
}

// =============================================================================
// Child placement
// =============================================================================

#[test]
fn test_set_child_clones_parented_child_and_detaches_old() {
    let mut arena = NodeArena::new();
    let shared = arena.create_string(NodeInit::new()).unwrap();
    let a = arena
        .create_property_declaration("a", shared, NodeInit::new())
        .unwrap();
    let old_value = arena.create_integer(NodeInit::new()).unwrap();
    let b = arena
        .create_property_declaration("b", old_value, NodeInit::new())
        .unwrap();

    arena
        .set_child(b, keys::VALUE, Some(ChildValue::Node(shared)))
        .unwrap();

    let placed = arena.node(b).unwrap().child_node(keys::VALUE).unwrap();
    assert_ne!(placed, shared);
    assert_eq!(arena.kind_of(placed), Some(NodeKind::String));
    assert_eq!(arena.parent_of(placed), Some(b));
    assert_eq!(arena.parent_of(shared), Some(a));
    assert_eq!(arena.parent_of(old_value), None);
}

#[test]
fn test_set_child_rejects_unknown_property() {
    let mut f = point();
    let err = f.arena.set_child(f.x, keys::MEMBERS, None).unwrap_err();
    assert_eq!(
        err,
        AstError::UnknownChildProperty {
            kind: NodeKind::PropertyDeclaration,
            key: keys::MEMBERS.to_string(),
        }
    );
}

#[test]
fn test_insert_child_grows_containers() {
    let mut f = point();
    let y = property(&mut f.arena, "y");
    assert_eq!(f.arena.insert_child(f.class, keys::MEMBERS, y).unwrap(), y);
    assert_eq!(member_keys(&f.arena, f.class), vec!["x", "y"]);
    assert_eq!(f.arena.parent_of(y), Some(f.class));

    // Empty optional map property gets a fresh map.
    let type_parameter = f
        .arena
        .create_type_parameter_declaration("T", None, NodeInit::new())
        .unwrap();
    f.arena
        .insert_child(f.class, keys::TYPE_PARAMETERS, type_parameter)
        .unwrap();
    let parameters = f.arena.node(f.class).unwrap().child_map(keys::TYPE_PARAMETERS);
    assert_eq!(parameters.and_then(|p| p.get("T")), Some(type_parameter));

    // A node already placed elsewhere is cloned.
    let other = f
        .arena
        .create_interface_declaration("Other", [], NodeInit::new())
        .unwrap();
    let inserted = f.arena.insert_child(other, keys::MEMBERS, f.x).unwrap();
    assert_ne!(inserted, f.x);
    assert_eq!(f.arena.parent_of(inserted), Some(other));
    assert_eq!(f.arena.parent_of(f.x), Some(f.class));
    assert_eq!(member_keys(&f.arena, other), vec!["x"]);
}

#[test]
fn test_insert_unnamed_child_into_map_is_rejected() {
    let mut f = point();
    let value = f.arena.create_integer(NodeInit::new()).unwrap();

    let err = f.arena.insert_child(f.class, keys::MEMBERS, value).unwrap_err();

    assert_eq!(
        err,
        AstError::UnnamedMapMember {
            kind: NodeKind::ClassDeclaration,
            key: keys::MEMBERS,
            node: value,
        }
    );
    assert_eq!(f.arena.parent_of(value), None);
    assert_eq!(member_keys(&f.arena, f.class), vec!["x"]);
}

#[test]
fn test_insert_same_name_detaches_displaced_member() {
    let mut f = point();
    let second_x = property(&mut f.arena, "x");

    assert_eq!(
        f.arena.insert_child(f.class, keys::MEMBERS, second_x).unwrap(),
        second_x
    );

    let members = f.arena.node(f.class).unwrap().child_map(keys::MEMBERS).unwrap();
    assert_eq!(members.get("x"), Some(second_x));
    assert_eq!(members.len(), 1);
    assert!(f.arena.is_live(f.x));
    assert_eq!(f.arena.parent_of(f.x), None);
    assert_eq!(f.arena.parent_of(second_x), Some(f.class));
}

#[test]
fn test_set_child_clones_child_held_in_another_property() {
    let mut arena = NodeArena::new();
    let index_type = arena.create_string(NodeInit::new()).unwrap();
    let class = arena
        .create_class_declaration("Dict", [], NodeInit::new().child(keys::INDEX_TYPE, index_type))
        .unwrap();

    arena
        .set_child(class, keys::VALUE_TYPE, Some(ChildValue::Node(index_type)))
        .unwrap();

    let node = arena.node(class).unwrap();
    let value_type = node.child_node(keys::VALUE_TYPE).unwrap();
    assert_ne!(value_type, index_type);
    assert_eq!(node.child_node(keys::INDEX_TYPE), Some(index_type));
    assert_eq!(arena.parent_of(value_type), Some(class));
    assert_eq!(arena.parent_of(index_type), Some(class));
}

#[test]
fn test_set_child_rejects_duplicate_map_names() {
    let mut f = point();
    let first = property(&mut f.arena, "a");
    let second = property(&mut f.arena, "a");
    let mut map = NodeMap::new();
    map.set("first", first);
    map.set("second", second);

    let err = f
        .arena
        .set_child(f.class, keys::MEMBERS, Some(ChildValue::Map(map)))
        .unwrap_err();

    assert!(matches!(err, AstError::DuplicateMapMember { ref name, .. } if name == "a"));
    assert_eq!(member_keys(&f.arena, f.class), vec!["x"]);
    assert_eq!(f.arena.parent_of(first), None);
}

// =============================================================================
// Cleanup / fixup
// =============================================================================

#[test]
fn test_cleanup_clears_empty_optionals_and_keeps_required() {
    let mut arena = NodeArena::new();
    let member = property(&mut arena, "a");
    let return_type = arena.create_nothing(NodeInit::new()).unwrap();
    let construct = arena
        .create_signature(return_type, [], NodeInit::new())
        .unwrap();
    let interface = arena
        .create_interface_declaration(
            "I",
            [member],
            NodeInit::new().set(keys::CONSTRUCT_SIGNATURES, [construct]),
        )
        .unwrap();

    arena.tombstone(member);
    arena.tombstone(construct);
    arena.cleanup(interface).unwrap();

    let node = arena.node(interface).unwrap();
    assert!(node.child_map(keys::MEMBERS).is_some_and(|m| m.is_empty()));
    assert!(node.child(keys::CONSTRUCT_SIGNATURES).is_none());

    let before: Vec<Option<ChildValue>> = node.children.to_vec();
    arena.cleanup(interface).unwrap();
    assert_eq!(arena.node(interface).unwrap().children.to_vec(), before);
}

#[test]
fn test_cleanup_drops_dead_single_child_and_back_references() {
    let mut arena = NodeArena::new();
    let parameter_type = arena.create_string(NodeInit::new()).unwrap();
    let parameter = arena
        .create_parameter("a", Some(parameter_type), NodeInit::new())
        .unwrap();
    let reference = arena
        .create_reference(Some(parameter), NodeInit::new())
        .unwrap();

    arena.tombstone(parameter_type);
    arena.tombstone(reference);
    arena.cleanup(parameter).unwrap();

    assert!(arena.node(parameter).unwrap().child(keys::TYPE).is_none());
    assert!(arena.references_to(parameter).unwrap().is_empty());
}

#[test]
fn test_fixup_restores_parent_links() {
    let mut f = point();
    let value = f.arena.node(f.x).unwrap().child_node(keys::VALUE).unwrap();
    f.arena
        .update_properties(f.x, |node| node.parent = NodeIndex::NONE)
        .unwrap();
    f.arena
        .update_properties(value, |node| node.parent = f.class)
        .unwrap();

    f.arena.fixup(f.class).unwrap();
    assert_eq!(f.arena.parent_of(f.x), Some(f.class));
    assert_eq!(f.arena.parent_of(value), Some(f.x));
}

#[test]
fn test_fixup_checks_depth_before_repairing() {
    let mut arena = NodeArena::new();
    let leaf = arena.create_string(NodeInit::new()).unwrap();
    let mut top = leaf;
    for _ in 0..MAX_TREE_DEPTH {
        top = arena.create_list(top, NodeInit::new()).unwrap();
    }
    arena.update_properties(leaf, |node| node.parent = NodeIndex::NONE).unwrap();

    assert!(matches!(arena.fixup(top), Err(AstError::DepthExceeded { .. })));
    assert_eq!(arena.parent_of(leaf), None);
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_checks_depth_before_deleting() {
    let mut arena = NodeArena::new();
    let leaf = arena.create_string(NodeInit::new()).unwrap();
    let mut top = leaf;
    for _ in 0..MAX_TREE_DEPTH {
        top = arena.create_list(top, NodeInit::new()).unwrap();
    }
    let live = arena.len();

    assert!(matches!(arena.delete(top, None), Err(AstError::DepthExceeded { .. })));
    assert_eq!(arena.len(), live);
    assert!(arena.is_live(top));
    assert!(arena.is_live(leaf));
}

#[test]
fn test_delete_kills_subtree_and_detaches() {
    let mut f = point();
    let value = f.arena.node(f.x).unwrap().child_node(keys::VALUE).unwrap();
    f.arena.delete(f.x, None).unwrap();

    assert!(!f.arena.is_live(f.x));
    assert!(!f.arena.is_live(value));
    assert!(member_keys(&f.arena, f.class).is_empty());
}

#[test]
fn test_delete_leaves_unresolvable_reference_unresolved() {
    let mut f = point();
    let reference = f.arena.create_reference(Some(f.x), NodeInit::new()).unwrap();
    f.arena.delete(f.x, None).unwrap();

    assert!(f.arena.is_live(reference));
    assert_eq!(f.arena.target(reference).unwrap(), None);
    assert_eq!(
        f.arena.reference_data(reference).unwrap().path,
        vec!["Point".to_string(), "x".to_string()]
    );
}

#[test]
fn test_delete_consults_replacer_for_orphaned_references() {
    let mut f = point();
    let reference = f.arena.create_reference(Some(f.x), NodeInit::new()).unwrap();
    let holder = f
        .arena
        .create_property_declaration("uses", reference, NodeInit::new())
        .unwrap();

    let mut calls = Vec::new();
    let mut replacer = |arena: &mut NodeArena, orphan: NodeIndex| -> AstResult<NodeIndex> {
        calls.push(orphan);
        arena.create_anything(NodeInit::new())
    };
    f.arena.delete(f.x, Some(&mut replacer)).unwrap();

    assert_eq!(calls, vec![reference]);
    assert!(!f.arena.is_live(reference));
    let placed = f.arena.node(holder).unwrap().child_node(keys::VALUE).unwrap();
    assert_eq!(f.arena.kind_of(placed), Some(NodeKind::Anything));
    assert_eq!(f.arena.parent_of(placed), Some(holder));
}

#[test]
fn test_replacer_returning_the_reference_keeps_it_in_place() {
    let mut f = point();
    let reference = f.arena.create_reference(Some(f.x), NodeInit::new()).unwrap();
    let holder = f
        .arena
        .create_property_declaration("uses", reference, NodeInit::new())
        .unwrap();

    let mut calls = Vec::new();
    let mut replacer = |_: &mut NodeArena, orphan: NodeIndex| -> AstResult<NodeIndex> {
        calls.push(orphan);
        Ok(orphan)
    };
    f.arena.delete(f.x, Some(&mut replacer)).unwrap();

    assert_eq!(calls, vec![reference]);
    assert!(f.arena.is_live(reference));
    assert_eq!(f.arena.node(holder).unwrap().child_node(keys::VALUE), Some(reference));
    assert_eq!(f.arena.parent_of(reference), Some(holder));
    assert_eq!(f.arena.target(reference).unwrap(), None);
}

#[test]
fn test_delete_skips_stale_back_references() {
    let mut f = point();
    let stranger = f.arena.create_string(NodeInit::new()).unwrap();
    f.arena
        .node_mut(f.x)
        .unwrap()
        .references_to_this
        .add(stranger);

    f.arena.delete(f.x, None).unwrap();

    assert!(!f.arena.is_live(f.x));
    assert!(f.arena.is_live(stranger));
}

#[test]
fn test_delete_re_resolves_to_merged_declaration() {
    let mut arena = NodeArena::new();
    let interface_area = property(&mut arena, "area");
    let interface = arena
        .create_interface_declaration("Shape", [interface_area], NodeInit::new())
        .unwrap();
    let class_area = property(&mut arena, "area");
    let class = arena
        .create_class_declaration("Shape", [class_area], NodeInit::new())
        .unwrap();
    arena
        .create_definition("Shape", [interface, class], NodeInit::new())
        .unwrap();
    let reference = arena
        .create_reference(Some(interface_area), NodeInit::new())
        .unwrap();

    arena.delete(interface_area, None).unwrap();

    assert_eq!(arena.target(reference).unwrap(), Some(class_area));
    assert!(arena.references_to(class_area).unwrap().contains(reference));
}

#[test]
fn test_references_inside_deleted_subtree_are_not_resolved() {
    let mut f = point();
    let inner = f.arena.create_reference(Some(f.class), NodeInit::new()).unwrap();
    let y = f
        .arena
        .create_property_declaration("y", inner, NodeInit::new())
        .unwrap();
    f.arena.insert_child(f.class, keys::MEMBERS, y).unwrap();

    let mut calls = 0;
    let mut replacer = |_: &mut NodeArena, orphan: NodeIndex| -> AstResult<NodeIndex> {
        calls += 1;
        Ok(orphan)
    };
    f.arena.delete(f.class, Some(&mut replacer)).unwrap();

    assert_eq!(calls, 0);
    assert!(!f.arena.is_live(inner));
}

// =============================================================================
// Replace
// =============================================================================

#[test]
fn test_replace_without_reuse_places_new_node() {
    let mut f = point();
    let reference = f.arena.create_reference(Some(f.x), NodeInit::new()).unwrap();
    let new_value = f.arena.create_string(NodeInit::new()).unwrap();
    let new_x = f
        .arena
        .create_property_declaration("x", new_value, NodeInit::new())
        .unwrap();

    let result = f.arena.replace(f.x, new_x, None, false).unwrap();

    assert_eq!(result, new_x);
    assert!(!f.arena.is_live(f.x));
    assert_eq!(f.arena.parent_of(new_x), Some(f.class));
    assert_eq!(member_keys(&f.arena, f.class), vec!["x"]);
    assert_eq!(f.arena.target(reference).unwrap(), Some(new_x));
}

#[test]
fn test_replace_with_reuse_keeps_identity() {
    let mut f = point();
    let original_id = f.arena.node(f.x).unwrap().id;
    let reference = f.arena.create_reference(Some(f.x), NodeInit::new()).unwrap();
    let new_value = f.arena.create_string(NodeInit::new()).unwrap();
    let y = f
        .arena
        .create_property_declaration("y", new_value, NodeInit::new())
        .unwrap();

    let result = f.arena.replace(f.x, y, None, true).unwrap();

    assert_eq!(result, f.x);
    assert!(!f.arena.is_live(y));
    let node = f.arena.node(f.x).unwrap();
    assert_eq!(node.id, original_id);
    assert_eq!(node.name.as_deref(), Some("y"));
    assert_eq!(node.child_node(keys::VALUE), Some(new_value));
    assert_eq!(f.arena.parent_of(new_value), Some(f.x));
    assert_eq!(member_keys(&f.arena, f.class), vec!["y"]);

    assert_eq!(f.arena.target(reference).unwrap(), Some(f.x));
    assert_eq!(
        f.arena.reference_data(reference).unwrap().path,
        vec!["Point".to_string(), "y".to_string()]
    );
}

#[test]
fn test_reuse_replace_of_reference_unlinks_its_target() {
    let mut f = point();
    let reference = f.arena.create_reference(Some(f.x), NodeInit::new()).unwrap();
    let string = f.arena.create_string(NodeInit::new()).unwrap();

    assert_eq!(f.arena.replace(reference, string, None, true).unwrap(), reference);
    assert_eq!(f.arena.kind_of(reference), Some(NodeKind::String));
    assert!(f.arena.references_to(f.x).unwrap().is_empty());

    f.arena.delete(f.x, None).unwrap();
    assert!(!f.arena.is_live(f.x));
    assert!(f.arena.is_live(reference));
}

#[test]
fn test_replace_with_ancestor_is_rejected() {
    let mut f = point();
    let definition = f.arena.parent_of(f.class);

    for reuse_memory in [false, true] {
        let err = f.arena.replace(f.x, f.class, None, reuse_memory).unwrap_err();
        assert_eq!(
            err,
            AstError::ReplaceWithAncestor {
                node: f.x,
                replacement: f.class,
            }
        );
    }
    assert_eq!(f.arena.parent_of(f.class), definition);
    assert_eq!(f.arena.parent_of(f.x), Some(f.class));
    assert!(f.arena.get_lineage(f.x).unwrap().is_some());
}

#[test]
fn test_replace_map_member_with_unnamed_node_is_rejected() {
    let mut f = point();
    let string = f.arena.create_string(NodeInit::new()).unwrap();

    let err = f.arena.replace(f.x, string, None, false).unwrap_err();

    assert!(matches!(err, AstError::UnnamedMapMember { node, .. } if node == string));
    assert!(f.arena.is_live(f.x));
    assert_eq!(member_keys(&f.arena, f.class), vec!["x"]);
    assert_eq!(f.arena.parent_of(string), None);
}

#[test]
fn test_replace_onto_sibling_name_detaches_sibling() {
    let mut f = point();
    let y = property(&mut f.arena, "y");
    f.arena.insert_child(f.class, keys::MEMBERS, y).unwrap();
    let new_y = property(&mut f.arena, "y");

    f.arena.replace(f.x, new_y, None, false).unwrap();

    let members = f.arena.node(f.class).unwrap().child_map(keys::MEMBERS).unwrap();
    assert_eq!(members.to_vec(), vec![new_y]);
    assert_eq!(members.get("y"), Some(new_y));
    assert!(f.arena.is_live(y));
    assert_eq!(f.arena.parent_of(y), None);
}

#[test]
fn test_replace_with_self_is_a_no_op() {
    let mut f = point();
    assert_eq!(f.arena.replace(f.x, f.x, None, false).unwrap(), f.x);
    assert!(f.arena.is_live(f.x));
}
