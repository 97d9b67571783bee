use super::*;

#[test]
fn test_every_kind_has_an_entry() {
    for &kind in NodeKind::ALL {
        assert_eq!(NodeMetadata::for_kind(kind).kind, kind);
    }
    assert_eq!(NODE_METADATA.len(), NodeKind::COUNT);
}

#[test]
fn test_named_kinds_carry_named_flags() {
    for &kind in NodeKind::ALL {
        let meta = NodeMetadata::for_kind(kind);
        assert_eq!(
            meta.is_named_node,
            meta.base_flags.contains(NodeFlags::NAMED),
            "{kind}"
        );
        assert_eq!(
            meta.is_named_node,
            meta.base_type_flags.contains(TypeFlags::NAMED),
            "{kind}"
        );
    }
    assert!(!NodeMetadata::for_kind(NodeKind::AnonymousClass).is_named_node);
    assert!(!NodeMetadata::for_kind(NodeKind::AnonymousFunction).is_named_node);
}

#[test]
fn test_declaration_kinds() {
    let declarations: Vec<_> = NodeKind::ALL
        .iter()
        .copied()
        .filter(|&k| {
            NodeMetadata::for_kind(k)
                .base_flags
                .contains(NodeFlags::DECLARATION)
        })
        .collect();
    assert_eq!(
        declarations,
        vec![
            NodeKind::FunctionDeclaration,
            NodeKind::EnumDeclaration,
            NodeKind::EnumMemberDeclaration,
            NodeKind::TypeParameterDeclaration,
            NodeKind::ClassDeclaration,
            NodeKind::InterfaceDeclaration,
            NodeKind::PropertyDeclaration,
            NodeKind::MethodDeclaration,
            NodeKind::TypeDeclaration,
            NodeKind::VariableDeclaration,
        ]
    );
}

#[test]
fn test_child_properties_in_declaration_order() {
    let meta = NodeMetadata::for_kind(NodeKind::InterfaceDeclaration);
    let child_keys: Vec<_> = meta.child_container_properties.iter().map(|p| p.key).collect();
    assert_eq!(
        child_keys,
        vec![
            keys::MEMBERS,
            keys::INDEX_TYPE,
            keys::VALUE_TYPE,
            keys::CONSTRUCT_SIGNATURES,
            keys::TYPE_PARAMETERS,
            keys::CALL_SIGNATURES,
        ]
    );
    assert_eq!(meta.child_position(keys::TYPE_PARAMETERS), Some(4));
    assert!(!meta.child_property(keys::MEMBERS).unwrap().optional);
    assert!(meta.child_property(keys::CALL_SIGNATURES).unwrap().optional);
}

#[test]
fn test_leaf_kinds_have_no_children() {
    for kind in [
        NodeKind::Reference,
        NodeKind::StringLiteral,
        NodeKind::Integer,
        NodeKind::Null,
        NodeKind::DateTime,
    ] {
        assert!(!NodeMetadata::for_kind(kind).has_children(), "{kind}");
    }
    assert!(!NodeMetadata::for_kind(NodeKind::Reference).is_child_property(keys::VALUE));
}

#[test]
fn test_object_like_type_flags() {
    for kind in [
        NodeKind::Object,
        NodeKind::ClassDeclaration,
        NodeKind::AnonymousClass,
        NodeKind::InterfaceDeclaration,
    ] {
        assert!(
            NodeMetadata::for_kind(kind)
                .base_type_flags
                .intersects(TypeFlags::OBJECT_LIKE),
            "{kind}"
        );
    }
    assert!(
        !NodeMetadata::for_kind(NodeKind::Object)
            .base_type_flags
            .intersects(TypeFlags::CLASS_LIKE)
    );
}
