//! # Arreglo Dinámico con Límite
//! src/buffer.rs
//!
//! Contenedor genérico que crece duplicando su capacidad, empezando en un
//! solo elemento. A diferencia de `Vec`, cada `push` es falible: nunca crece
//! más allá de un máximo de elementos y reporta si el allocator se niega.
//!
//! Lo usan la tabla de rutas y el tablón de mensajes.

use std::fmt;
use std::slice;
use thiserror::Error;

/// Errores al agregar elementos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// Se alcanzó el máximo de elementos permitido
    #[error("capacity limit of {limit} elements reached")]
    LimitReached { limit: usize },

    /// El allocator no pudo reservar más memoria
    #[error("out of memory while growing buffer")]
    OutOfMemory,
}

/// Arreglo que crece 1 → 2 → 4 → ... hasta `limit` elementos
pub struct Growable<T> {
    items: Vec<T>,
    capacity: usize,
    limit: usize,
}

impl<T> Growable<T> {
    /// Máximo por defecto: la mitad del espacio direccionable
    pub fn default_limit() -> usize {
        isize::MAX as usize / std::mem::size_of::<T>().max(1)
    }

    /// Crea un arreglo vacío sin memoria reservada
    pub fn new() -> Self {
        Self::with_limit(Self::default_limit())
    }

    /// Crea un arreglo vacío que nunca superará `limit` elementos
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
            limit,
        }
    }

    /// Agrega un elemento al final
    ///
    /// # Errores
    ///
    /// - `LimitReached` si el arreglo ya tiene `limit` elementos
    /// - `OutOfMemory` si no se pudo reservar la nueva capacidad
    pub fn push(&mut self, value: T) -> Result<(), CapacityError> {
        if self.items.len() == self.capacity {
            if self.capacity >= self.limit {
                return Err(CapacityError::LimitReached { limit: self.limit });
            }

            let new_capacity = if self.capacity == 0 {
                1
            } else {
                self.capacity.saturating_mul(2).min(self.limit)
            };

            self.items
                .try_reserve_exact(new_capacity - self.items.len())
                .map_err(|_| CapacityError::OutOfMemory)?;
            self.capacity = new_capacity;
        }

        self.items.push(value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Capacidad lógica actual (siempre potencia de dos o `limit`)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Growable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Growable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Growable")
            .field("items", &self.items)
            .field("capacity", &self.capacity)
            .field("limit", &self.limit)
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a Growable<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
