//! Typed endpoints of the store backend, grouped per resource
//!
//! Every method is a thin call on [`HttpClient`](crate::HttpClient); paths are
//! relative to the configured base URL (which already ends in `/api/v1`).

mod catalog;
mod customers;
mod inventory;
mod quotations;
mod returns;
mod sales;
mod suppliers;
mod tailoring;
mod transactions;

/// `{base}/{id}` with `id` percent-encoded as a single path segment
fn resource_path(base: &str, id: &str) -> String {
    format!("{base}/{}", urlencoding::encode(id))
}

/// Cache key prefixes, one per resource
pub mod keys {
    pub const PRODUCTS: &str = "products";
    pub const CATEGORIES: &str = "products/list/categories";
    pub const INVENTORY: &str = "inventory";
    pub const QUOTATIONS: &str = "quotations";
    pub const SALES: &str = "sales";
    pub const RETURNS: &str = "returns";
    pub const TRANSACTIONS: &str = "transactions";
    pub const TAILORING: &str = "tailoring";
    pub const SUPPLIERS: &str = "suppliers";
    pub const CUSTOMERS: &str = "customers";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_path_encodes_segment() {
        assert_eq!(resource_path("sales", "s1"), "sales/s1");
        assert_eq!(
            resource_path("inventory/barcodes", "AB/12?3#"),
            "inventory/barcodes/AB%2F12%3F3%23"
        );
        assert_eq!(resource_path("suppliers", "../admin"), "suppliers/..%2Fadmin");
    }
}
