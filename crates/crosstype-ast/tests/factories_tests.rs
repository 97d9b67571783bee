use super::*;
use crate::containers::NodeIterable;
use crate::origin::NodeOrigin;

#[test]
fn test_kind_defaults_are_applied() {
    let mut arena = NodeArena::new();
    let value_type = arena.create_string(NodeInit::new()).unwrap();
    let array = arena.create_array(value_type, NodeInit::new()).unwrap();

    let node = arena.node(array).unwrap();
    assert!(node.type_flags.contains(TypeFlags::ITERABLE));
    assert!(matches!(
        &node.data,
        NodeData::Iterable(IterableData { order_kind: OrderKind::Index, .. })
    ));
    let index_type = node.child_node(keys::INDEX_TYPE).unwrap();
    assert_eq!(arena.kind_of(index_type), Some(NodeKind::Integer));
    assert_eq!(arena.parent_of(index_type), Some(array));
    assert_eq!(node.child_node(keys::VALUE_TYPE), Some(value_type));
}

#[test]
fn test_caller_flags_and_data_win_over_defaults() {
    let mut arena = NodeArena::new();
    let value_type = arena.create_string(NodeInit::new()).unwrap();
    let init = NodeInit::new()
        .modifiers(ModifierFlags::READ_ONLY)
        .data(NodeData::Iterable(IterableData {
            order_kind: OrderKind::Calculated,
            ..IterableData::default()
        }));
    let array = arena.create_array(value_type, init).unwrap();

    let node = arena.node(array).unwrap();
    assert_eq!(node.modifiers, ModifierFlags::READ_ONLY);
    assert!(matches!(
        &node.data,
        NodeData::Iterable(IterableData { order_kind: OrderKind::Calculated, .. })
    ));
}

#[test]
fn test_named_kinds_carry_their_name() {
    let mut arena = NodeArena::new();
    let source_file = arena
        .create_source_file("lib.rs", Some("rust".to_string()), NodeInit::new())
        .unwrap();
    let node = arena.node(source_file).unwrap();
    assert_eq!(node.name.as_deref(), Some("lib.rs"));
    assert!(node.is_named());
    assert!(matches!(
        &node.data,
        NodeData::Module(ModuleData { language: Some(lang), .. }) if lang == "rust"
    ));

    let definition = arena
        .create_definition("Empty", [], NodeInit::new())
        .unwrap();
    let node = arena.node(definition).unwrap();
    assert!(node.is_definition());
    assert!(matches!(
        &node.data,
        NodeData::Definition(DefinitionData { primary: true, .. })
    ));
}

#[test]
fn test_parented_children_are_cloned() {
    let mut arena = NodeArena::new();
    let value = arena.create_string(NodeInit::new()).unwrap();
    let first = arena
        .create_property_declaration("a", value, NodeInit::new())
        .unwrap();
    let second = arena
        .create_property_declaration("b", value, NodeInit::new())
        .unwrap();

    let second_value = arena.node(second).unwrap().child_node(keys::VALUE).unwrap();
    assert_ne!(second_value, value);
    assert_eq!(arena.parent_of(value), Some(first));
    assert_eq!(arena.parent_of(second_value), Some(second));
}

#[test]
fn test_duplicate_children_in_one_call_are_cloned() {
    let mut arena = NodeArena::new();
    let member = arena.create_null(NodeInit::new()).unwrap();
    let union = arena.create_union([member, member], NodeInit::new()).unwrap();

    let members = arena.node(union).unwrap().child_set(keys::MEMBERS).unwrap();
    assert_eq!(members.len(), 2);
    for child in members.iter() {
        assert_eq!(arena.parent_of(child), Some(union));
    }
}

#[test]
fn test_map_init_rejects_unnamed_members_before_claiming() {
    let mut arena = NodeArena::new();
    let value = arena.create_string(NodeInit::new()).unwrap();
    let named = arena
        .create_property_declaration("a", value, NodeInit::new())
        .unwrap();
    let unnamed = arena.create_null(NodeInit::new()).unwrap();
    let live = arena.len();

    let err = arena
        .create_interface_declaration("I", [named, unnamed], NodeInit::new())
        .unwrap_err();

    assert_eq!(
        err,
        AstError::UnnamedMapMember {
            kind: NodeKind::InterfaceDeclaration,
            key: keys::MEMBERS,
            node: unnamed,
        }
    );
    assert_eq!(arena.len(), live);
    assert_eq!(arena.parent_of(named), None);
}

#[test]
fn test_map_init_rejects_same_named_members() {
    let mut arena = NodeArena::new();
    let first_type = arena.create_string(NodeInit::new()).unwrap();
    let first = arena
        .create_property_declaration("a", first_type, NodeInit::new())
        .unwrap();
    let second_type = arena.create_integer(NodeInit::new()).unwrap();
    let second = arena
        .create_property_declaration("a", second_type, NodeInit::new())
        .unwrap();

    let err = arena
        .create_object([first, second], NodeInit::new())
        .unwrap_err();

    assert!(matches!(err, AstError::DuplicateMapMember { ref name, .. } if name == "a"));
    assert_eq!(arena.parent_of(first), None);
    assert_eq!(arena.parent_of(second), None);
}

#[test]
fn test_repeated_property_keeps_last_value_and_leaves_earlier_untouched() {
    let mut arena = NodeArena::new();
    let caller_index = arena.create_string(NodeInit::new()).unwrap();
    let index_type = arena.create_integer(NodeInit::new()).unwrap();
    let value_type = arena.create_string(NodeInit::new()).unwrap();

    let map = arena
        .create_map(
            index_type,
            value_type,
            NodeInit::new().child(keys::INDEX_TYPE, caller_index),
        )
        .unwrap();

    let node = arena.node(map).unwrap();
    assert_eq!(node.child_node(keys::INDEX_TYPE), Some(index_type));
    assert_eq!(arena.parent_of(index_type), Some(map));
    assert_eq!(arena.parent_of(caller_index), None);
    assert_eq!(arena.roots().len(), 2);
}

#[test]
fn test_unknown_child_property_is_rejected() {
    let mut arena = NodeArena::new();
    let child = arena.create_null(NodeInit::new()).unwrap();
    let err = arena
        .create_node(NodeKind::Boolean, NodeInit::new().child(keys::VALUE, child))
        .unwrap_err();
    assert!(matches!(
        err,
        AstError::UnknownChildProperty { kind: NodeKind::Boolean, .. }
    ));
}

#[test]
fn test_specific_origin_sets_specific_flag() {
    let mut arena = NodeArena::new();
    let plain = arena
        .create_integer(NodeInit::new().origin(NodeOrigin::new("ts")))
        .unwrap();
    let specific = arena
        .create_integer(NodeInit::new().origin(NodeOrigin::new("ts").with_specific_kind(42)))
        .unwrap();

    assert!(!arena.node(plain).unwrap().type_flags.contains(TypeFlags::SPECIFIC));
    assert!(arena.node(specific).unwrap().type_flags.contains(TypeFlags::SPECIFIC));
}

#[test]
fn test_type_argument_requires_type_parameter() {
    let mut arena = NodeArena::new();
    let not_a_parameter = arena.create_string(NodeInit::new()).unwrap();
    let argument_type = arena.create_string(NodeInit::new()).unwrap();
    assert!(matches!(
        arena.create_type_argument(not_a_parameter, argument_type, NodeInit::new()),
        Err(AstError::KindMismatch { .. })
    ));
}

#[test]
fn test_signature_parameters_are_keyed_by_name() {
    let mut arena = NodeArena::new();
    let return_type = arena.create_boolean(NodeInit::new()).unwrap();
    let a = arena.create_parameter("a", None, NodeInit::new()).unwrap();
    let b = arena.create_parameter("b", None, NodeInit::new()).unwrap();
    let signature = arena
        .create_signature(return_type, [a, b], NodeInit::new())
        .unwrap();
    let parameters = arena
        .node(signature)
        .unwrap()
        .child_map(keys::PARAMETERS)
        .unwrap();
    assert_eq!(parameters.keys().collect::<Vec<_>>(), vec!["a", "b"]);

    let bare = arena
        .create_signature(return_type, [], NodeInit::new())
        .unwrap();
    assert!(arena.node(bare).unwrap().child(keys::PARAMETERS).is_none());
}
