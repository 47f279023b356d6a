//! Per-type cache of [`TableModel`]s.

use crate::error::{OrmError, OrmResult};
use crate::model::{Entity, TableModel};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

type AnyModel = Arc<dyn Any + Send + Sync>;

/// Registry of entity metadata, keyed by Rust type.
///
/// Each type is parsed once; later lookups share the same `Arc`. The registry
/// can be shared between threads and between several [`Db`](crate::Db) handles.
#[derive(Default)]
pub struct Registry {
    models: RwLock<HashMap<TypeId, AnyModel>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the metadata for `T`, registering it on first use.
    pub fn get<T: Entity>(&self) -> OrmResult<Arc<TableModel<T>>> {
        let cached = self
            .models
            .read()
            .expect("model registry poisoned")
            .get(&TypeId::of::<T>())
            .cloned();
        match cached {
            Some(model) => downcast::<T>(model),
            None => self.register::<T>(),
        }
    }

    /// Parse `T`'s descriptor and store the result, replacing any earlier entry.
    pub fn register<T: Entity>(&self) -> OrmResult<Arc<TableModel<T>>> {
        let desc = T::describe();
        let type_name = desc.type_name;
        let model = match TableModel::from_descriptor(desc) {
            Ok(model) => Arc::new(model),
            Err(err) => {
                tracing::debug!(target: "bindorm.registry", type_name, error = %err, "entity rejected");
                return Err(err);
            }
        };
        tracing::trace!(
            target: "bindorm.registry",
            type_name,
            table = model.table_name(),
            fields = model.fields().len(),
            "entity registered"
        );

        self.models
            .write()
            .expect("model registry poisoned")
            .insert(TypeId::of::<T>(), model.clone() as AnyModel);
        Ok(model)
    }

    /// Whether `T` has been registered.
    pub fn contains<T: Entity>(&self) -> bool {
        self.models
            .read()
            .expect("model registry poisoned")
            .contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.models.read().expect("model registry poisoned").len()
    }

    /// Check if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("models", &self.len())
            .finish()
    }
}

fn downcast<T: Entity>(model: AnyModel) -> OrmResult<Arc<TableModel<T>>> {
    model.downcast::<TableModel<T>>().map_err(|_| {
        OrmError::invalid_model(
            std::any::type_name::<T>(),
            "registry entry has a different model type",
        )
    })
}
