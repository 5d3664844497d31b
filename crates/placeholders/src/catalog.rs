use offerpress_traits::{ProductCatalog, ProductRecord};
use std::collections::HashMap;

/// Memoizing catalog access for a single resolve call.
///
/// The same model is often needed more than once (storage capacity and the
/// storage detail block both read the storage record). The cache lives only
/// as long as the lookup, so nothing leaks between requests.
pub struct CatalogLookup<'a> {
    catalog: &'a dyn ProductCatalog,
    cache: HashMap<String, Option<ProductRecord>>,
}

impl<'a> CatalogLookup<'a> {
    pub fn new(catalog: &'a dyn ProductCatalog) -> Self {
        Self {
            catalog,
            cache: HashMap::new(),
        }
    }

    /// The catalog record for `model_name`, if any. Blank names never hit
    /// the catalog.
    pub fn product(&mut self, model_name: &str) -> Option<&ProductRecord> {
        let name = model_name.trim();
        if name.is_empty() {
            return None;
        }
        if !self.cache.contains_key(name) {
            let record = self.catalog.product_by_model(name);
            if record.is_none() {
                log::debug!("Model '{}' not found in {}", name, self.catalog.name());
            }
            self.cache.insert(name.to_string(), record);
        }
        self.cache.get(name).and_then(Option::as_ref)
    }

    /// Number of distinct models fetched so far.
    pub fn distinct_lookups(&self) -> usize {
        self.cache.len()
    }
}
