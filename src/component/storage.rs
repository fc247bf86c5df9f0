//! Persistent per-node storage.
//!
//! `Storage<R>` adds a tagged tuple of type `R` to every node. Entries are
//! taken from the node initializer when supplied and defaulted otherwise.
//! The net is left untouched.
//!
//! Access from a concrete stack is static: [`StorageAccess::storage`]
//! resolves the tag through the layers at compile time, so a tag that no
//! storage layer declares is a type error. Generic layers, which do not
//! know their concrete parent, use the dynamic [`StorageAccess::find_storage`]
//! probe and list the entries in [`Component::Reads`](super::Component::Reads).
//! `combine!` then checks, through [`Provides`], that the layers below store
//! each entry with the same value type, so the probe cannot miss.

use core::any::Any;
use core::marker::PhantomData;

use tracing::trace;

use super::Component;
use super::node::{DeviceId, Layered, Net, Node, Times};
use crate::error::BuildError;
use crate::tuple::{Entry, Field, FromInit, Initializer, Nil, Record, Tag, TagKey, TagList};

/// Storage component holding a record of type `R` on each node.
#[derive(Debug, Clone, Copy, Default)]
pub struct Storage<R>(PhantomData<R>);

impl<R: Record + FromInit> Component for Storage<R> {
    const NAME: &'static str = "storage";
    const TAGS: &'static TagList = R::TAGS;
    const STORES: bool = true;

    type Reads = Nil;
    type Node<P: Node> = StorageNode<R, P>;
    type Net<P: Net> = P;
}

/// Node of the storage layer.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageNode<R, P> {
    parent: P,
    storage: R,
}

impl<R, P> StorageNode<R, P> {
    /// The whole record of this layer.
    #[inline]
    pub fn record(&self) -> &R {
        &self.storage
    }

    #[inline]
    pub fn record_mut(&mut self) -> &mut R {
        &mut self.storage
    }
}

impl<R: Record + FromInit, P: Node> Node for StorageNode<R, P> {
    fn build<I: Initializer + ?Sized>(init: &I) -> Result<Self, BuildError> {
        let parent = P::build(init)?;
        let storage = R::from_init(init)?;
        trace!(uid = parent.uid(), entries = R::LEN, "built storage");
        Ok(StorageNode { parent, storage })
    }

    #[inline]
    fn uid(&self) -> DeviceId {
        self.parent.uid()
    }

    fn storage_entry(&self, key: &TagKey) -> Option<&dyn Any> {
        self.storage.entry(key).or_else(|| self.parent.storage_entry(key))
    }

    fn storage_entry_mut(&mut self, key: &TagKey) -> Option<&mut dyn Any> {
        match self.storage.entry_mut(key) {
            Some(value) => Some(value),
            None => self.parent.storage_entry_mut(key),
        }
    }

    #[inline]
    fn round_start(&mut self, t: Times) {
        self.parent.round_start(t);
    }

    #[inline]
    fn round_main(&mut self, t: Times) {
        self.parent.round_main(t);
    }

    #[inline]
    fn round_end(&mut self, t: Times) {
        self.parent.round_end(t);
    }
}

impl<R, P> Layered for StorageNode<R, P> {
    type Parent = P;

    #[inline]
    fn parent(&self) -> &P {
        &self.parent
    }

    #[inline]
    fn parent_mut(&mut self) -> &mut P {
        &mut self.parent
    }
}

// =============================================================================
// Static lookup across layers
// =============================================================================

/// Index: found in this layer's record at `I`.
pub struct Local<I>(PhantomData<I>);

/// Index: found in the parent layer at `I`.
pub struct Inherited<I>(PhantomData<I>);

/// A node whose storage, in some layer, has a slot for `T`.
#[diagnostic::on_unimplemented(
    message = "no storage layer of `{Self}` declares tag `{T}`",
    label = "tag `{T}` is not stored by this node",
    note = "add `{T}` to the record of a `Storage` component in the stack."
)]
pub trait StorageField<T, I> {
    type Value;

    fn storage_field(&self) -> &Self::Value;

    fn storage_field_mut(&mut self) -> &mut Self::Value;
}

impl<T, I, R: Field<T, I>, P> StorageField<T, Local<I>> for StorageNode<R, P> {
    type Value = R::Value;

    #[inline]
    fn storage_field(&self) -> &R::Value {
        self.storage.field()
    }

    #[inline]
    fn storage_field_mut(&mut self) -> &mut R::Value {
        self.storage.field_mut()
    }
}

impl<T, I, N> StorageField<T, Inherited<I>> for N
where
    N: Layered,
    N::Parent: StorageField<T, I>,
{
    type Value = <N::Parent as StorageField<T, I>>::Value;

    #[inline]
    fn storage_field(&self) -> &Self::Value {
        self.parent().storage_field()
    }

    #[inline]
    fn storage_field_mut(&mut self) -> &mut Self::Value {
        self.parent_mut().storage_field_mut()
    }
}

/// A node with a storage layer somewhere below it.
///
/// `I` is `Local<()>` for the nearest storage layer, wrapped in one
/// `Inherited` per layer above it.
pub trait StorageTuple<I> {
    type Record: Record;

    fn tuple_ref(&self) -> &Self::Record;

    fn tuple_mut(&mut self) -> &mut Self::Record;
}

impl<R: Record, P> StorageTuple<Local<()>> for StorageNode<R, P> {
    type Record = R;

    #[inline]
    fn tuple_ref(&self) -> &R {
        &self.storage
    }

    #[inline]
    fn tuple_mut(&mut self) -> &mut R {
        &mut self.storage
    }
}

impl<I, N> StorageTuple<Inherited<I>> for N
where
    N: Layered,
    N::Parent: StorageTuple<I>,
{
    type Record = <N::Parent as StorageTuple<I>>::Record;

    #[inline]
    fn tuple_ref(&self) -> &Self::Record {
        self.parent().tuple_ref()
    }

    #[inline]
    fn tuple_mut(&mut self) -> &mut Self::Record {
        self.parent_mut().tuple_mut()
    }
}

/// A node whose storage layers hold every entry of the record `R`, each with
/// the value type `R` declares for it.
///
/// `I` collects one [`StorageField`] index per entry and is inferred.
#[diagnostic::on_unimplemented(
    message = "the storage of `{Self}` does not provide every entry of `{R}`",
    label = "a read entry is not stored below, or is stored with another value type",
    note = "list the tag in a `Storage` layer closer to the base, with the same value type."
)]
pub trait Provides<R, I> {}

impl<N> Provides<Nil, ()> for N {}

impl<N, T, V, D, R, I, J> Provides<Entry<T, V, D, R>, (I, J)> for N where
    N: StorageField<T, I, Value = V> + Provides<R, J>
{
}

/// Storage accessors for every node.
pub trait StorageAccess: Node {
    /// Reference to the value stored under `T`.
    #[inline]
    fn storage<T, I>(&self) -> &<Self as StorageField<T, I>>::Value
    where
        Self: StorageField<T, I>,
    {
        self.storage_field()
    }

    #[inline]
    fn storage_mut<T, I>(&mut self) -> &mut <Self as StorageField<T, I>>::Value
    where
        Self: StorageField<T, I>,
    {
        self.storage_field_mut()
    }

    /// Like [`storage`](Self::storage), with the tag given as a value.
    #[inline]
    fn storage_of<T, I>(&self, _tag: T) -> &<Self as StorageField<T, I>>::Value
    where
        Self: StorageField<T, I>,
    {
        self.storage_field()
    }

    #[inline]
    fn storage_of_mut<T, I>(&mut self, _tag: T) -> &mut <Self as StorageField<T, I>>::Value
    where
        Self: StorageField<T, I>,
    {
        self.storage_field_mut()
    }

    /// The record of a storage layer. Inferred when the stack has a single
    /// one; otherwise name it, e.g. `storage_tuple::<Inherited<Local<()>>>()`.
    #[inline]
    fn storage_tuple<I>(&self) -> &<Self as StorageTuple<I>>::Record
    where
        Self: StorageTuple<I>,
    {
        self.tuple_ref()
    }

    #[inline]
    fn storage_tuple_mut<I>(&mut self) -> &mut <Self as StorageTuple<I>>::Record
    where
        Self: StorageTuple<I>,
    {
        self.tuple_mut()
    }

    /// Dynamic lookup of `T`, expecting a value of type `V`.
    ///
    /// `None` if no layer stores `T` or it holds a different type. Entries a
    /// component lists in its `Reads` are always found.
    fn find_storage<T: Tag, V: 'static>(&self) -> Option<&V> {
        self.storage_entry(&T::KEY)?.downcast_ref()
    }

    fn find_storage_mut<T: Tag, V: 'static>(&mut self) -> Option<&mut V> {
        self.storage_entry_mut(&T::KEY)?.downcast_mut()
    }
}

impl<N: Node> StorageAccess for N {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::BaseNode;
    use crate::tuple::{Nil, Start, Uid};

    #[derive(Debug, Clone, Copy, crate::Tag)]
    struct Flag;

    #[derive(Debug, Clone, Copy, crate::Tag)]
    struct Count;

    #[derive(Debug, Clone, Copy, crate::Tag)]
    struct Label;

    type Lower = crate::tuple_t![Label: String];
    type Upper = crate::tuple_t![Flag: bool, Count: i32, Start: f64];
    type Stacked = StorageNode<Upper, StorageNode<Lower, BaseNode>>;

    #[test]
    fn test_build_from_initializer() {
        let init = crate::tuple![Count: 2i32, Uid: 4usize, Flag: true];
        let node = Stacked::build(&init).unwrap();
        assert_eq!(node.uid(), 4);
        assert!(*node.storage::<Flag, _>());
        assert_eq!(*node.storage_of(Count), 2);
        assert_eq!(*node.storage::<Start, _>(), 0.0);
        assert_eq!(node.storage::<Label, _>(), "");
    }

    #[test]
    fn test_write_through_layers() {
        let mut node = Stacked::build(&Nil).unwrap();
        *node.storage_mut::<Count, _>() += 3;
        node.storage_of_mut(Label).push_str("lower");
        assert_eq!(*node.record().get::<Count, _>(), 3);
        assert_eq!(node.parent().record().get::<Label, _>(), "lower");
        assert_eq!(node.record().to_string(), "(flag:false, count:3, start:0)");
    }

    #[test]
    fn test_storage_tuple_of_single_layer() {
        let mut node = StorageNode::<Upper, BaseNode>::build(&crate::tuple![Start: 1.5f64]).unwrap();
        node.storage_tuple_mut().set::<Flag, _>(true);
        assert_eq!(node.storage_tuple().fields().to_string(), "flag:true, count:0, start:1.5");
    }

    #[test]
    fn test_dynamic_probe() {
        let mut node = Stacked::build(&Nil).unwrap();
        *node.find_storage_mut::<Count, i32>().unwrap() = 9;
        assert_eq!(node.find_storage::<Count, i32>(), Some(&9));
        assert_eq!(node.find_storage::<Count, u8>(), None);
        assert_eq!(node.find_storage::<Uid, usize>(), None);
        assert!(node.find_storage::<Label, String>().is_some());
    }

    fn provided<N: Provides<R, I>, R, I>() -> bool {
        true
    }

    #[test]
    fn test_provides_typed_entries_across_layers() {
        assert!(provided::<Stacked, crate::tuple_t![Count: i32, Label: String], _>());
        assert!(provided::<Stacked, Nil, _>());
        assert!(provided::<BaseNode, Nil, _>());
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let init = crate::tuple![Count: 2u8];
        let err = Stacked::build(&init).unwrap_err();
        assert_eq!(err, BuildError::TypeMismatch { tag: "count", expected: "i32" });
    }
}
