#![warn(missing_docs)]
//! minitest Mock - Type-Keyed Stub Store
//!
//! Free functions under test call through a [`MockStore`] with a typed
//! [`MockFn`] handle declared next to them. Tests install stand-ins per
//! handle; an unstubbed handle yields `T::default()`.
//!
//! ```
//! use minitest_mock::{MockFn, MockStore};
//!
//! static GET_RANDOM_NUMBER: MockFn<i32> = MockFn::new("get_random_number");
//!
//! let mocks = MockStore::new();
//! mocks.set_return(&GET_RANDOM_NUMBER, 42);
//! assert_eq!(mocks.invoke(&GET_RANDOM_NUMBER), 42);
//!
//! mocks.reset::<i32>();
//! assert_eq!(mocks.invoke(&GET_RANDOM_NUMBER), 0);
//! ```
//!
//! The store is internally locked, so sharing it across threads is
//! memory-safe. Two suites running concurrently that stub the same handle
//! still overwrite each other's stand-ins; give each suite its own handles
//! or run them sequentially.

use fxhash::FxHashMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Typed identity of a stubbable function returning `T`.
///
/// Two handles with the same name and return type address the same stub.
/// [`mock_fn!`] qualifies the name with the module path.
pub struct MockFn<T> {
    name: &'static str,
    _returns: PhantomData<fn() -> T>,
}

impl<T> MockFn<T> {
    /// Declare a handle; usable in `static` items.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _returns: PhantomData,
        }
    }

    /// Handle name
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for MockFn<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MockFn<T> {}

impl<T> fmt::Debug for MockFn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockFn")
            .field("name", &self.name)
            .field("returns", &std::any::type_name::<T>())
            .finish()
    }
}

/// Declare a `static` [`MockFn`] handle named after the item.
///
/// The handle name is qualified with the declaring module, so same-named
/// handles in different modules keep separate stubs.
///
/// ```
/// minitest_mock::mock_fn!(pub static READ_SENSOR: f64);
/// assert!(READ_SENSOR.name().ends_with("::READ_SENSOR"));
/// ```
#[macro_export]
macro_rules! mock_fn {
    ($vis:vis static $name:ident : $ret:ty) => {
        $vis static $name: $crate::MockFn<$ret> =
            $crate::MockFn::new(concat!(module_path!(), "::", stringify!($name)));
    };
}

type Stub<T> = Arc<dyn Fn() -> T + Send + Sync>;
type StubTable<T> = FxHashMap<&'static str, Stub<T>>;

/// Two-level stub mapping: return type, then handle name.
#[derive(Default)]
pub struct MockStore {
    tables: Mutex<FxHashMap<TypeId, Box<dyn Any + Send>>>,
}

impl MockStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FxHashMap<TypeId, Box<dyn Any + Send>>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stub `handle` to always return `value`. The latest stub wins.
    pub fn set_return<T>(&self, handle: &MockFn<T>, value: T)
    where
        T: Clone + Send + Sync + 'static,
    {
        self.set_with(handle, move || value.clone());
    }

    /// Stub `handle` with an arbitrary zero-argument stand-in.
    pub fn set_with<T, F>(&self, handle: &MockFn<T>, stand_in: F)
    where
        T: 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let mut tables = self.lock();
        let table = tables
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(StubTable::<T>::default()));
        if let Some(table) = table.downcast_mut::<StubTable<T>>() {
            table.insert(handle.name, Arc::new(stand_in));
        }
    }

    /// Call the stub for `handle`, or return `T::default()` when none is set.
    ///
    /// The store is unlocked while the stand-in runs.
    pub fn invoke<T>(&self, handle: &MockFn<T>) -> T
    where
        T: Default + 'static,
    {
        match self.stub(handle) {
            Some(stand_in) => stand_in(),
            None => T::default(),
        }
    }

    fn stub<T: 'static>(&self, handle: &MockFn<T>) -> Option<Stub<T>> {
        self.lock()
            .get(&TypeId::of::<T>())
            .and_then(|table| table.downcast_ref::<StubTable<T>>())
            .and_then(|table| table.get(handle.name))
            .cloned()
    }

    /// Whether `handle` currently has a stub
    pub fn is_stubbed<T: 'static>(&self, handle: &MockFn<T>) -> bool {
        self.stub(handle).is_some()
    }

    /// Drop every stub whose return type is `T`
    pub fn reset<T: 'static>(&self) {
        self.lock().remove(&TypeId::of::<T>());
    }

    /// Drop every stub of every type
    pub fn reset_all(&self) {
        self.lock().clear();
    }
}

impl fmt::Debug for MockStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockStore")
            .field("types", &self.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    static GET_RANDOM_NUMBER: MockFn<i32> = MockFn::new("get_random_number");
    static GET_OTHER_NUMBER: MockFn<i32> = MockFn::new("get_other_number");
    static GET_GREETING: MockFn<String> = MockFn::new("get_greeting");

    mock_fn!(static READ_FLAG: bool);

    #[test]
    fn test_set_reset_round_trip() {
        let store = MockStore::new();

        store.set_return(&GET_RANDOM_NUMBER, 42);
        assert_eq!(store.invoke(&GET_RANDOM_NUMBER), 42);

        store.reset::<i32>();
        assert_eq!(store.invoke(&GET_RANDOM_NUMBER), 0);

        store.set_return(&GET_RANDOM_NUMBER, 100);
        store.reset_all();
        assert_eq!(store.invoke(&GET_RANDOM_NUMBER), 0);
    }

    #[test]
    fn test_latest_stub_wins() {
        let store = MockStore::new();
        store.set_return(&GET_RANDOM_NUMBER, 1);
        store.set_return(&GET_RANDOM_NUMBER, 2);
        assert_eq!(store.invoke(&GET_RANDOM_NUMBER), 2);
    }

    #[test]
    fn test_handles_are_independent() {
        let store = MockStore::new();
        store.set_return(&GET_RANDOM_NUMBER, 7);
        assert_eq!(store.invoke(&GET_OTHER_NUMBER), 0);
        assert!(!store.is_stubbed(&GET_OTHER_NUMBER));
    }

    #[test]
    fn test_reset_only_clears_target_type() {
        let store = MockStore::new();
        store.set_return(&GET_RANDOM_NUMBER, 5);
        store.set_return(&GET_GREETING, "hello".to_string());
        store.set_return(&READ_FLAG, true);

        store.reset::<i32>();

        assert_eq!(store.invoke(&GET_RANDOM_NUMBER), 0);
        assert_eq!(store.invoke(&GET_GREETING), "hello");
        assert!(store.invoke(&READ_FLAG));
    }

    #[test]
    fn test_reset_all_is_idempotent() {
        let store = MockStore::new();
        store.reset_all();
        store.set_return(&GET_GREETING, "x".to_string());
        store.reset_all();
        store.reset_all();
        assert_eq!(store.invoke(&GET_GREETING), String::new());
    }

    #[test]
    fn test_set_with_closure() {
        let store = MockStore::new();
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        store.set_with(&GET_RANDOM_NUMBER, move || {
            let mut n = counter.lock().unwrap();
            *n += 1;
            *n
        });

        assert_eq!(store.invoke(&GET_RANDOM_NUMBER), 1);
        assert_eq!(store.invoke(&GET_RANDOM_NUMBER), 2);
        assert!(store.is_stubbed(&GET_RANDOM_NUMBER));
    }

    #[test]
    fn test_stand_in_may_use_store() {
        let store = Arc::new(MockStore::new());
        let inner = Arc::clone(&store);
        store.set_return(&GET_OTHER_NUMBER, 10);
        store.set_with(&GET_RANDOM_NUMBER, move || inner.invoke(&GET_OTHER_NUMBER) + 1);

        assert_eq!(store.invoke(&GET_RANDOM_NUMBER), 11);
    }

    #[test]
    fn test_shared_across_threads() {
        let store = Arc::new(MockStore::new());
        store.set_return(&GET_RANDOM_NUMBER, 3);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.invoke(&GET_RANDOM_NUMBER))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3);
        }
    }

    #[test]
    fn test_macro_declared_handle() {
        assert_eq!(READ_FLAG.name(), "minitest_mock::tests::READ_FLAG");
        let store = MockStore::new();
        assert!(!store.invoke(&READ_FLAG));
    }

    mod sensors {
        mock_fn!(pub static VALUE: i32);
    }

    mod clock {
        mock_fn!(pub static VALUE: i32);
    }

    #[test]
    fn test_same_named_handles_in_sibling_modules() {
        let store = MockStore::new();
        store.set_return(&sensors::VALUE, 42);

        assert_eq!(store.invoke(&sensors::VALUE), 42);
        assert_eq!(store.invoke(&clock::VALUE), 0);
        assert!(!store.is_stubbed(&clock::VALUE));
    }
}
