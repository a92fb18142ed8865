//! Product store: the authoritative in-memory product list, synchronized
//! with the `"products"` blob in durable storage.
//!
//! Every mutation is a whole-blob read-modify-write. A single async mutex is
//! held across each full cycle, so two operations can never interleave their
//! reads and writes and lose an update. The durable write always happens
//! before the in-memory mirror is touched; a failed write leaves the mirror
//! on the old list, which still matches what storage holds.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::kv::KvStore;
use crate::models::{CreateProductRequest, Product};

/// Storage key holding the serialized product list.
pub const PRODUCTS_KEY: &str = "products";

/// Process-wide product collection backed by the durable key-value store.
pub struct ProductStore {
    kv: KvStore,
    /// In-memory mirror of the persisted list. The lock is held across each
    /// whole read-modify-write cycle, not just the mirror update.
    products: Mutex<Vec<Product>>,
    busy: AtomicBool,
}

impl ProductStore {
    pub fn new(kv: KvStore) -> Self {
        Self {
            kv,
            products: Mutex::new(Vec::new()),
            busy: AtomicBool::new(false),
        }
    }

    /// Advisory flag, true while a load/create/delete is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Relaxed)
    }

    fn busy_guard(&self) -> BusyGuard<'_> {
        self.busy.store(true, Ordering::Relaxed);
        BusyGuard { flag: &self.busy }
    }

    /// Populate the in-memory list from durable storage.
    ///
    /// A missing blob is an empty list. An unparsable blob is an error and
    /// the in-memory list keeps its prior contents.
    pub async fn load(&self) -> Result<usize, AppError> {
        let _busy = self.busy_guard();
        let mut products = self.products.lock().await;

        let stored = self.read_blob().await?;
        let count = stored.len();
        *products = stored;

        tracing::debug!("Loaded {} products from storage", count);
        Ok(count)
    }

    /// Add a product. The name must not match any existing product's name
    /// exactly; ids are derived from the current time in milliseconds and
    /// bumped past the list maximum so they stay unique.
    pub async fn create(&self, request: &CreateProductRequest) -> Result<Product, AppError> {
        let _busy = self.busy_guard();
        let mut products = self.products.lock().await;

        let stored = self.read_blob().await?;

        if stored.iter().any(|p| p.name == request.name) {
            return Err(AppError::DuplicateName(format!(
                "Product {} is already added",
                request.name
            )));
        }

        let product = Product {
            id: next_id(&stored),
            name: request.name.clone(),
            price: request.price.clone(),
            image: request.image.clone(),
        };

        let mut updated = stored;
        updated.push(product.clone());

        self.write_blob(&updated).await?;
        *products = updated;

        tracing::info!(id = product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Remove the product with the given id. Removing an absent id is a
    /// successful no-op.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let _busy = self.busy_guard();
        let mut products = self.products.lock().await;

        let stored = self.read_blob().await?;
        let before = stored.len();
        let updated: Vec<Product> = stored.into_iter().filter(|p| p.id != id).collect();

        self.write_blob(&updated).await?;
        let removed = before - updated.len();
        *products = updated;

        tracing::info!(id, removed, "Product delete completed");
        Ok(())
    }

    /// Snapshot of the in-memory list, insertion order preserved.
    pub async fn products(&self) -> Vec<Product> {
        self.products.lock().await.clone()
    }

    /// Case-insensitive substring match on product names over the in-memory
    /// list. A blank query returns everything.
    pub async fn filter(&self, query: &str) -> Vec<Product> {
        let products = self.products.lock().await;
        if query.trim().is_empty() {
            return products.clone();
        }

        let needle = query.to_lowercase();
        products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    async fn read_blob(&self) -> Result<Vec<Product>, AppError> {
        match self.kv.get(PRODUCTS_KEY).await? {
            None => Ok(Vec::new()),
            Some(raw) => Ok(serde_json::from_str(&raw)?),
        }
    }

    async fn write_blob(&self, products: &[Product]) -> Result<(), AppError> {
        let raw = serde_json::to_string(products)?;
        self.kv.set(PRODUCTS_KEY, &raw).await
    }
}

/// Clears the busy flag when the operation finishes, on success or failure.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

/// Timestamp-derived id, unique and monotonically increasing within the
/// list even when the clock collides or steps backward.
fn next_id(products: &[Product]) -> i64 {
    let candidate = Utc::now().timestamp_millis();
    match products.iter().map(|p| p.id).max() {
        Some(max) if candidate <= max => max + 1,
        _ => candidate,
    }
}
