use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
};

/// Stores at most one value per type.
#[derive(Default)]
pub struct TypeMap {
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl TypeMap {
    pub fn get<T: 'static>(&self) -> Option<&T> {
        let value = self.values.get(&TypeId::of::<T>())?;
        value.downcast_ref()
    }

    /// Replaces any value of the same type.
    pub fn insert<T: 'static>(&mut self, value: T) {
        self.values.insert(TypeId::of::<T>(), Box::new(value));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for TypeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMap")
            .field("len", &self.values.len())
            .finish()
    }
}
