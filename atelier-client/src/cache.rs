//! Query cache for backend reads
//!
//! ```text
//! CachedClient::list_quotations()
//!       │ key "quotations"
//!       ▼
//! QueryCache
//!   └── entries: key → OnceCell<CachedValue>
//!         ├── empty, nobody fetching   → this caller fetches
//!         ├── empty, fetch in flight   → caller awaits the same fetch
//!         ├── filled, younger than TTL → cloned value
//!         └── filled, expired          → replaced by a fresh cell
//! ```
//!
//! Every lookup first sweeps out expired entries and empty cells left behind
//! by failed fetches, so keys that are never read again do not pile up.
//!
//! Mutations invalidate every key under the resource prefix so the next read
//! goes to the backend again.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::OnceCell;

use shared::models::{
    BarcodeLookup, Category, CategoryCreate, Customer, InventoryCreate, InventoryItem,
    PaymentUpdate, Product, ProductCreate, Quotation, QuotationRequest, QuotationStatus,
    ReturnAnalytics, ReturnCreate, ReturnQuery, ReturnRecord, ReturnStatusUpdate,
    SalesItemsUpdate, SalesOrder, SalesStatus, Supplier, TailoringNote, TailoringOrder,
    TailoringUpdate, Transaction, TransactionCreate,
};
use shared::workflow::{StepTransition, TailoringWorkflow};

use crate::api::keys;
use crate::{ClientConfig, ClientError, ClientResult, HttpClient, ImageUpload};

struct CachedValue {
    stored_at: Instant,
    value: Arc<dyn Any + Send + Sync>,
}

type Slot = Arc<OnceCell<CachedValue>>;

/// Keyed, TTL-bound cache with in-flight request deduplication
#[derive(Clone)]
pub struct QueryCache {
    entries: Arc<DashMap<String, Slot>>,
    ttl: Duration,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Return the cached value for `key`, or run `fetch` to fill it.
    ///
    /// Concurrent callers for the same key share one fetch. A failed fetch
    /// leaves the entry empty so the next caller tries again.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, fetch: F) -> ClientResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let full_key = format!("{key}#{}", std::any::type_name::<T>());
        let slot = self.slot(&full_key);

        if slot.initialized() {
            tracing::debug!(key, "Cache hit");
        }

        let cached = slot
            .get_or_try_init(|| async move {
                tracing::debug!(key, "Cache miss");
                let value = fetch().await?;
                Ok::<_, ClientError>(CachedValue {
                    stored_at: Instant::now(),
                    value: Arc::new(value),
                })
            })
            .await?;

        cached
            .value
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| ClientError::Config(format!("cache entry {full_key} has another type")))
    }

    /// Current slot for `key`, replacing an expired one
    fn slot(&self, key: &str) -> Slot {
        self.purge_expired();

        let mut entry = self.entries.entry(key.to_string()).or_default();
        let expired = entry
            .value()
            .get()
            .is_some_and(|cached| cached.stored_at.elapsed() >= self.ttl);
        if expired {
            *entry.value_mut() = Arc::new(OnceCell::new());
        }
        entry.value().clone()
    }

    /// Drop expired entries and empty cells that no fetch is using.
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, slot| match slot.get() {
            Some(cached) => cached.stored_at.elapsed() < self.ttl,
            None => Arc::strong_count(slot) > 1,
        });
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::trace!(removed, "Expired cache entries purged");
        }
        removed
    }

    /// Drop every entry whose key starts with `prefix`
    pub fn invalidate_prefix(&self, prefix: &str) {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        tracing::debug!(
            prefix,
            removed = before.saturating_sub(self.entries.len()),
            "Cache invalidated"
        );
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// [`HttpClient`] with cached reads and invalidating writes
#[derive(Clone)]
pub struct CachedClient {
    http: HttpClient,
    cache: QueryCache,
}

impl CachedClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::from_http(HttpClient::new(config)?))
    }

    pub fn from_http(http: HttpClient) -> Self {
        let cache = QueryCache::new(http.config().cache_ttl_duration());
        Self { http, cache }
    }

    /// Uncached access for calls without a cached counterpart
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Run a mutation, then invalidate the given prefixes if it succeeded
    async fn mutate<T, Fut>(&self, prefixes: &[&str], call: Fut) -> ClientResult<T>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        let result = call.await?;
        for prefix in prefixes {
            self.cache.invalidate_prefix(prefix);
        }
        Ok(result)
    }

    // ========== Catalog ==========

    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.cache
            .get_or_fetch(keys::PRODUCTS, || self.http.list_products())
            .await
    }

    pub async fn create_product(
        &self,
        product: &ProductCreate,
        image: Option<ImageUpload>,
    ) -> ClientResult<Product> {
        self.mutate(&[keys::PRODUCTS], self.http.create_product(product, image))
            .await
    }

    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.cache
            .get_or_fetch(keys::CATEGORIES, || self.http.list_categories())
            .await
    }

    pub async fn create_category(&self, category: &CategoryCreate) -> ClientResult<Category> {
        self.mutate(&[keys::CATEGORIES], self.http.create_category(category))
            .await
    }

    pub async fn list_customers(&self) -> ClientResult<Vec<Customer>> {
        self.cache
            .get_or_fetch(keys::CUSTOMERS, || self.http.list_customers())
            .await
    }

    pub async fn list_suppliers(&self) -> ClientResult<Vec<Supplier>> {
        self.cache
            .get_or_fetch(keys::SUPPLIERS, || self.http.list_suppliers())
            .await
    }

    pub async fn get_supplier(&self, id: &str) -> ClientResult<Supplier> {
        self.cache
            .get_or_fetch(&format!("{}/{id}", keys::SUPPLIERS), || {
                self.http.get_supplier(id)
            })
            .await
    }

    // ========== Inventory ==========

    pub async fn list_inventory(&self) -> ClientResult<Vec<InventoryItem>> {
        self.cache
            .get_or_fetch(keys::INVENTORY, || self.http.list_inventory())
            .await
    }

    pub async fn get_inventory_item(&self, id: &str) -> ClientResult<InventoryItem> {
        self.cache
            .get_or_fetch(&format!("{}/{id}", keys::INVENTORY), || {
                self.http.get_inventory_item(id)
            })
            .await
    }

    pub async fn create_inventory_item(
        &self,
        item: &InventoryCreate,
        image: Option<ImageUpload>,
    ) -> ClientResult<InventoryItem> {
        self.mutate(
            &[keys::INVENTORY],
            self.http.create_inventory_item(item, image),
        )
        .await
    }

    pub async fn delete_inventory_item(&self, id: &str) -> ClientResult<()> {
        self.mutate(&[keys::INVENTORY], self.http.delete_inventory_item(id))
            .await
    }

    /// Barcode scans always hit the backend
    pub async fn lookup_barcode(&self, key: &str) -> ClientResult<BarcodeLookup> {
        self.http.lookup_barcode(key).await
    }

    // ========== Quotations ==========

    pub async fn list_quotations(&self) -> ClientResult<Vec<Quotation>> {
        self.cache
            .get_or_fetch(keys::QUOTATIONS, || self.http.list_quotations())
            .await
    }

    pub async fn get_quotation(&self, id: &str) -> ClientResult<Quotation> {
        self.cache
            .get_or_fetch(&format!("{}/{id}", keys::QUOTATIONS), || {
                self.http.get_quotation(id)
            })
            .await
    }

    pub async fn create_quotation(&self, request: &QuotationRequest) -> ClientResult<Quotation> {
        self.mutate(&[keys::QUOTATIONS], self.http.create_quotation(request))
            .await
    }

    pub async fn update_quotation(
        &self,
        id: &str,
        request: &QuotationRequest,
    ) -> ClientResult<Quotation> {
        self.mutate(&[keys::QUOTATIONS], self.http.update_quotation(id, request))
            .await
    }

    pub async fn set_quotation_status(
        &self,
        id: &str,
        status: QuotationStatus,
    ) -> ClientResult<Quotation> {
        self.mutate(
            &[keys::QUOTATIONS],
            self.http.set_quotation_status(id, status),
        )
        .await
    }

    // ========== Sales ==========

    pub async fn get_sales_order(&self, id: &str) -> ClientResult<SalesOrder> {
        self.cache
            .get_or_fetch(&format!("{}/{id}", keys::SALES), || {
                self.http.get_sales_order(id)
            })
            .await
    }

    pub async fn set_sales_status(
        &self,
        id: &str,
        status: SalesStatus,
    ) -> ClientResult<SalesOrder> {
        self.mutate(&[keys::SALES], self.http.set_sales_status(id, status))
            .await
    }

    pub async fn update_sales_items(
        &self,
        id: &str,
        update: &SalesItemsUpdate,
    ) -> ClientResult<SalesOrder> {
        self.mutate(&[keys::SALES], self.http.update_sales_items(id, update))
            .await
    }

    /// A payment also shows up in the transaction ledger
    pub async fn update_sales_payment(
        &self,
        id: &str,
        update: &PaymentUpdate,
    ) -> ClientResult<SalesOrder> {
        self.mutate(
            &[keys::SALES, keys::TRANSACTIONS],
            self.http.update_sales_payment(id, update),
        )
        .await
    }

    // ========== Returns ==========

    pub async fn list_returns(&self, query: &ReturnQuery) -> ClientResult<Vec<ReturnRecord>> {
        let key = serde_json::to_string(query)
            .map(|filters| format!("{}?{filters}", keys::RETURNS))?;
        self.cache
            .get_or_fetch(&key, || self.http.list_returns(query))
            .await
    }

    pub async fn get_return(&self, id: &str) -> ClientResult<ReturnRecord> {
        self.cache
            .get_or_fetch(&format!("{}/{id}", keys::RETURNS), || {
                self.http.get_return(id)
            })
            .await
    }

    pub async fn return_analytics(&self) -> ClientResult<ReturnAnalytics> {
        self.cache
            .get_or_fetch(&format!("{}/analytics", keys::RETURNS), || {
                self.http.return_analytics()
            })
            .await
    }

    /// A new return changes the sold order and, once refunded, the ledger
    pub async fn create_return(&self, request: &ReturnCreate) -> ClientResult<ReturnRecord> {
        self.mutate(
            &[keys::RETURNS, keys::SALES, keys::TRANSACTIONS],
            self.http.create_return(request),
        )
        .await
    }

    pub async fn update_return_status(
        &self,
        id: &str,
        update: &ReturnStatusUpdate,
    ) -> ClientResult<ReturnRecord> {
        self.mutate(
            &[keys::RETURNS, keys::TRANSACTIONS],
            self.http.update_return_status(id, update),
        )
        .await
    }

    // ========== Transactions ==========

    pub async fn list_transactions(&self) -> ClientResult<Vec<Transaction>> {
        self.cache
            .get_or_fetch(keys::TRANSACTIONS, || self.http.list_transactions())
            .await
    }

    pub async fn get_transaction(&self, id: &str) -> ClientResult<Transaction> {
        self.cache
            .get_or_fetch(&format!("{}/{id}", keys::TRANSACTIONS), || {
                self.http.get_transaction(id)
            })
            .await
    }

    pub async fn create_transaction(
        &self,
        transaction: &TransactionCreate,
    ) -> ClientResult<Transaction> {
        self.mutate(
            &[keys::TRANSACTIONS],
            self.http.create_transaction(transaction),
        )
        .await
    }

    // ========== Tailoring ==========

    pub async fn get_tailoring_order(&self, id: &str) -> ClientResult<TailoringOrder> {
        self.cache
            .get_or_fetch(&format!("{}/{id}", keys::TAILORING), || {
                self.http.get_tailoring_order(id)
            })
            .await
    }

    pub async fn update_tailoring_order(
        &self,
        id: &str,
        update: &TailoringUpdate,
    ) -> ClientResult<TailoringOrder> {
        self.mutate(
            &[keys::TAILORING],
            self.http.update_tailoring_order(id, update),
        )
        .await
    }

    pub async fn get_workflow(&self, order_id: &str) -> ClientResult<TailoringWorkflow> {
        self.cache
            .get_or_fetch(&format!("{}/workflow/{order_id}", keys::TAILORING), || {
                self.http.get_workflow(order_id)
            })
            .await
    }

    pub async fn transition_workflow(
        &self,
        order_id: &str,
        transition: &StepTransition,
    ) -> ClientResult<TailoringWorkflow> {
        self.mutate(
            &[keys::TAILORING],
            self.http.transition_workflow(order_id, transition),
        )
        .await
    }

    /// Ask the backend to finish the current step, if there is one
    pub async fn complete_current_step(
        &self,
        workflow: &TailoringWorkflow,
        order_id: &str,
    ) -> ClientResult<Option<TailoringWorkflow>> {
        match workflow.complete_current_request() {
            Some(transition) => self
                .transition_workflow(order_id, &transition)
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    pub async fn list_tailoring_notes(&self, order_id: &str) -> ClientResult<Vec<TailoringNote>> {
        self.cache
            .get_or_fetch(&format!("{}/notes/{order_id}", keys::TAILORING), || {
                self.http.list_tailoring_notes(order_id)
            })
            .await
    }

    pub async fn add_tailoring_note(
        &self,
        order_id: &str,
        content: impl Into<String>,
    ) -> ClientResult<TailoringNote> {
        self.mutate(
            &[keys::TAILORING],
            self.http.add_tailoring_note(order_id, content),
        )
        .await
    }
}
