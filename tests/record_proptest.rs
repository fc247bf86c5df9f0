//! Property tests for tagged tuple storage.

use proptest::prelude::*;
use tola_stack::prelude::*;

#[derive(Tag)]
struct Flag;

#[derive(Tag)]
struct Count;

#[derive(Tag)]
struct Name;

type Data = tuple_t![Flag: bool, Count: i64, Name: String];

proptest! {
    #[test]
    fn prop_write_then_read(flag in any::<bool>(), count in any::<i64>(), name in ".{0,16}") {
        let mut t = Data::default();
        *t.get_mut::<Flag, _>() = flag;
        *t.get_mut::<Count, _>() = count;
        *t.get_mut::<Name, _>() = name.clone();
        prop_assert_eq!(*t.get::<Flag, _>(), flag);
        prop_assert_eq!(*t.get::<Count, _>(), count);
        prop_assert_eq!(t.get::<Name, _>(), &name);
    }

    #[test]
    fn prop_writes_are_isolated(initial in any::<i64>(), update in any::<i64>(), flag in any::<bool>()) {
        let mut t = Data::from_init(&tuple![Count: initial, Flag: flag]).unwrap();
        let before = t.clone();
        *t.get_mut::<Count, _>() = update;
        prop_assert_eq!(*t.get::<Flag, _>(), *before.get::<Flag, _>());
        prop_assert_eq!(t.get::<Name, _>(), before.get::<Name, _>());
        prop_assert_eq!(*t.get::<Count, _>(), update);
    }

    #[test]
    fn prop_initializer_order_irrelevant(count in any::<i64>(), flag in any::<bool>()) {
        let a = Data::from_init(&tuple![Count: count, Flag: flag]).unwrap();
        let b = Data::from_init(&tuple![Flag: flag, Count: count]).unwrap();
        prop_assert_eq!(a.to_string(), b.to_string());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_storage_isolated_between_nodes(values in proptest::collection::vec(any::<i64>(), 1..8)) {
        combine! { Device = [Storage<tuple_t![Count: i64]>, Base]; }

        let mut net = NetOf::<Device>::build(&Nil).unwrap();
        let uids: Vec<_> = values.iter().map(|v| net.spawn(&tuple![Count: *v]).unwrap()).collect();
        for (uid, v) in uids.iter().zip(&values) {
            prop_assert_eq!(*net.node(*uid).unwrap().storage::<Count, _>(), *v);
        }
    }
}
