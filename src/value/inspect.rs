use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::{self, Rc};
use std::sync::{self, Arc, Mutex, RwLock};

use crate::renderer::components::type_name;
use crate::value::types::*;

/// Visitor receiving the single [`Value`] an [`Inspect`] implementation produces
pub type Visit<'v> = dyn for<'a> FnMut(Value<'a>) + 'v;

/// Runtime introspection for anything the dumper can print.
///
/// An implementation hands exactly one [`Value`] to `visit`. The visitor
/// accepts values of any lifetime, so an implementation may lend out data
/// borrowed from a temporary such as a `RefCell` guard.
pub trait Inspect {
    fn inspect(&self, visit: &mut Visit<'_>);
}

impl Inspect for bool {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Bool(*self));
    }
}

macro_rules! impl_inspect_integer {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self, visit: &mut Visit<'_>) {
                    visit(Value::Int(Integer::$variant(*self)));
                }
            }
        )*
    };
}

impl_inspect_integer!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
);

impl Inspect for f32 {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Float(Float::F32(*self)));
    }
}

impl Inspect for f64 {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Float(Float::F64(*self)));
    }
}

impl Inspect for Complex<f32> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Complex(ComplexNumber::C32(*self)));
    }
}

impl Inspect for Complex<f64> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Complex(ComplexNumber::C64(*self)));
    }
}

impl Inspect for str {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Str(self));
    }
}

impl Inspect for String {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Str(self.as_str()));
    }
}

impl Inspect for Cow<'_, str> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Str(self.as_ref()));
    }
}

// Sequences

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        let elements = self.iter().map(|e| e as &dyn Inspect).collect();
        visit(Value::Sequence(Sequence::with_capacity(
            type_name::<T>(),
            self.capacity(),
            elements,
        )));
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        let elements = self.iter().map(|e| e as &dyn Inspect).collect();
        visit(Value::Sequence(Sequence::with_capacity(
            type_name::<T>(),
            self.capacity(),
            elements,
        )));
    }
}

impl<T: Inspect> Inspect for [T] {
    fn inspect(&self, visit: &mut Visit<'_>) {
        let elements = self.iter().map(|e| e as &dyn Inspect).collect();
        visit(Value::Sequence(Sequence::new(type_name::<T>(), elements)));
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self, visit: &mut Visit<'_>) {
        self.as_slice().inspect(visit);
    }
}

// Maps

impl<K: Inspect, V: Inspect, S: BuildHasher> Inspect for HashMap<K, V, S> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        let entries = self
            .iter()
            .map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect))
            .collect();
        visit(Value::Map(Map::new(type_name::<K>(), type_name::<V>(), entries)));
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        let entries = self
            .iter()
            .map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect))
            .collect();
        visit(Value::Map(Map::new(type_name::<K>(), type_name::<V>(), entries)));
    }
}

// Transparent wrappers: the wrapped value renders in place

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self, visit: &mut Visit<'_>) {
        (**self).inspect(visit);
    }
}

impl<T: Inspect + ?Sized> Inspect for &mut T {
    fn inspect(&self, visit: &mut Visit<'_>) {
        (**self).inspect(visit);
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        (**self).inspect(visit);
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        match self {
            Some(value) => value.inspect(visit),
            None => visit(Value::Nil(type_name::<Self>())),
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for RefCell<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        match self.try_borrow() {
            Ok(inner) => inner.inspect(visit),
            Err(_) => visit(Value::Unsupported(type_name::<Self>())),
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for Mutex<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        match self.try_lock() {
            Ok(inner) => inner.inspect(visit),
            Err(sync::TryLockError::Poisoned(poisoned)) => poisoned.into_inner().inspect(visit),
            Err(sync::TryLockError::WouldBlock) => visit(Value::Unsupported(type_name::<Self>())),
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for RwLock<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        match self.try_read() {
            Ok(inner) => inner.inspect(visit),
            Err(sync::TryLockError::Poisoned(poisoned)) => poisoned.into_inner().inspect(visit),
            Err(sync::TryLockError::WouldBlock) => visit(Value::Unsupported(type_name::<Self>())),
        }
    }
}

// Shared pointers carry an identity, so they render as references

/// Lends a possibly unsized pointee out as a sized `&dyn Inspect`
struct Pointee<'a, T: ?Sized>(&'a T);

impl<T: Inspect + ?Sized> Inspect for Pointee<'_, T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        self.0.inspect(visit);
    }
}

/// Hands `target`, reached through a pointer of type `P`, to `visit` as a reference
fn visit_shared<P: ?Sized, T: Inspect + ?Sized>(target: &T, visit: &mut Visit<'_>) {
    let address = (target as *const T).cast::<()>() as usize;
    let pointee = Pointee(target);
    visit(Value::Reference(Reference::new(
        type_name::<P>(),
        type_name::<T>(),
        address,
        &pointee,
    )));
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit_shared::<Self, T>(self, visit);
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit_shared::<Self, T>(self, visit);
    }
}

impl<T: Inspect + ?Sized> Inspect for rc::Weak<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        match self.upgrade() {
            Some(strong) => visit_shared::<Self, T>(&*strong, visit),
            None => visit(Value::Nil(type_name::<Self>())),
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for sync::Weak<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        match self.upgrade() {
            Some(strong) => visit_shared::<Self, T>(&*strong, visit),
            None => visit(Value::Nil(type_name::<Self>())),
        }
    }
}

// Channels report their buffered length and capacity, never their contents

impl<T> Inspect for crossbeam_channel::Sender<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Channel(Channel {
            type_name: type_name::<Self>(),
            len: self.len(),
            capacity: self.capacity(),
            description: format!("{:?}", self),
        }));
    }
}

impl<T> Inspect for crossbeam_channel::Receiver<T> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Channel(Channel {
            type_name: type_name::<Self>(),
            len: self.len(),
            capacity: self.capacity(),
            description: format!("{:?}", self),
        }));
    }
}

// Tuples render as records with positional field names

impl Inspect for () {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Record(Record::new(type_name::<Self>())));
    }
}

macro_rules! impl_inspect_tuple {
    ($(($($name:ident : $idx:tt),+)),* $(,)?) => {
        $(
            impl<$($name: Inspect),+> Inspect for ($($name,)+) {
                fn inspect(&self, visit: &mut Visit<'_>) {
                    let record = Record::new(type_name::<Self>())
                        $(.field(stringify!($idx), &self.$idx))+;
                    visit(Value::Record(record));
                }
            }
        )*
    };
}

impl_inspect_tuple!(
    (A: 0),
    (A: 0, B: 1),
    (A: 0, B: 1, C: 2),
    (A: 0, B: 1, C: 2, D: 3),
    (A: 0, B: 1, C: 2, D: 3, E: 4),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5),
);

// Kinds with nothing meaningful to show

impl<T: ?Sized> Inspect for *const T {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Unsupported(type_name::<Self>()));
    }
}

impl<T: ?Sized> Inspect for *mut T {
    fn inspect(&self, visit: &mut Visit<'_>) {
        visit(Value::Unsupported(type_name::<Self>()));
    }
}

macro_rules! impl_inspect_fn_pointer {
    ($(($($arg:ident),*)),* $(,)?) => {
        $(
            impl<R, $($arg),*> Inspect for fn($($arg),*) -> R {
                fn inspect(&self, visit: &mut Visit<'_>) {
                    visit(Value::Unsupported(type_name::<Self>()));
                }
            }
        )*
    };
}

impl_inspect_fn_pointer!((), (A), (A, B), (A, B, C));

/// Implements [`Inspect`] for a struct as a record.
///
/// Fields are listed in declaration order. `pub` marks a field as externally
/// visible; unmarked fields are access-restricted and only show up when the
/// dump runs with [`VisibilityMode::CopyPrivate`](crate::VisibilityMode).
///
/// ```
/// use vardump::inspect_record;
///
/// struct Account {
///     owner: String,
///     balance: i64,
/// }
///
/// inspect_record!(Account { pub owner, balance });
/// ```
#[macro_export]
macro_rules! inspect_record {
    (@fields $self:ident, $record:expr $(,)?) => {
        $record
    };
    (@fields $self:ident, $record:expr, pub $field:ident $(, $($rest:tt)*)?) => {
        $crate::inspect_record!(
            @fields $self,
            $record.field(stringify!($field), &$self.$field)
            $(, $($rest)*)?
        )
    };
    (@fields $self:ident, $record:expr, $field:ident $(, $($rest:tt)*)?) => {
        $crate::inspect_record!(
            @fields $self,
            $record.private_field(stringify!($field), &$self.$field)
            $(, $($rest)*)?
        )
    };
    ($ty:ty { $($fields:tt)* }) => {
        impl $crate::Inspect for $ty {
            fn inspect(&self, visit: &mut $crate::Visit<'_>) {
                let record = $crate::Record::new($crate::type_name::<Self>());
                let record = $crate::inspect_record!(@fields self, record, $($fields)*);
                visit($crate::Value::Record(record));
            }
        }
    };
}
