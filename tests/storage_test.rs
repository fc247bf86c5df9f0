//! Storage layer composed onto the base.

use tola_stack::prelude::*;

#[derive(Tag)]
pub struct Flag;

#[derive(Tag)]
pub struct Count;

#[derive(Tag)]
pub struct Label;

combine! {
    /// Nodes with three persistent values.
    pub Device = [Storage<tuple_t![Flag: bool, Count: i32, Start: Times]>, Base];
}

#[test]
fn test_node_built_from_initializer() {
    let mut net = NetOf::<Device>::build(&Nil).unwrap();
    let uid = net.spawn(&tuple![Count: 2i32, Start: 1.0f64, Flag: true]).unwrap();
    let node = net.node_mut(uid).unwrap();

    assert!(*node.storage::<Flag, _>());
    assert_eq!(*node.storage::<Count, _>(), 2);
    assert_eq!(*node.storage::<Start, _>(), 1.0);

    *node.storage_mut::<Count, _>() += 1;
    assert_eq!(*node.storage_of(Count), 3);
    assert!(*node.storage_of(Flag));
    assert_eq!(*node.storage::<Start, _>(), 1.0);
    assert_eq!(node.storage_tuple().to_string(), "(flag:true, count:3, start:1)");
}

#[test]
fn test_missing_entries_default() {
    let node = NodeOf::<Device>::build(&tuple![Label: "ignored"]).unwrap();
    assert_eq!(node.uid(), 0);
    assert_eq!(node.storage_tuple().to_string(), "(flag:false, count:0, start:0)");
}

#[test]
fn test_nodes_do_not_share_storage() {
    let mut net = NetOf::<Device>::build(&Nil).unwrap();
    let a = net.spawn(&Nil).unwrap();
    let b = net.spawn(&Nil).unwrap();
    assert_ne!(a, b);
    *net.node_mut(a).unwrap().storage_mut::<Count, _>() = 10;
    assert_eq!(*net.node(b).unwrap().storage::<Count, _>(), 0);
    assert_eq!(net.node_count(), 2);
}

#[test]
fn test_spawn_failure_leaves_net_unchanged() {
    let mut net = NetOf::<Device>::build(&Nil).unwrap();
    let err = net.spawn(&tuple![Count: "two"]).unwrap_err();
    assert_eq!(err, BuildError::TypeMismatch { tag: "count", expected: "i32" });
    assert_eq!(net.node_count(), 0);
}

#[test]
fn test_dynamic_probe_agrees_with_static_access() {
    let mut node = NodeOf::<Device>::build(&tuple![Count: 4i32]).unwrap();
    *node.find_storage_mut::<Count, i32>().unwrap() += 1;
    assert_eq!(*node.storage::<Count, _>(), 5);
    assert!(node.find_storage::<Label, &str>().is_none());
}

#[test]
fn test_manifest() {
    assert_eq!(Device::manifest().to_string(), "storage -> base");
    assert_eq!(Device::validate(), Ok(()));
}
