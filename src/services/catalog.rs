use serde::Serialize;

/// A merch product with a fixed price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Product {
    pub key: &'static str,
    pub name: &'static str,
    /// Price in the smallest currency unit (cents)
    pub unit_amount: i64,
    /// Empty for unsized products
    pub sizes: &'static [&'static str],
}

impl Product {
    pub fn is_sized(&self) -> bool {
        !self.sizes.is_empty()
    }

    /// Canonical spelling of a size as stored in inventory
    pub fn canonical_size(&self, size: &str) -> Option<&'static str> {
        self.sizes.iter().copied().find(|s| s.eq_ignore_ascii_case(size))
    }
}

pub static PRODUCTS: &[Product] = &[
    Product {
        key: "tshirt",
        name: "Tour T-Shirt",
        unit_amount: 2500,
        sizes: &["S", "M", "L", "XL"],
    },
    Product {
        key: "vinyl",
        name: "LP Vinyl Record",
        unit_amount: 3000,
        sizes: &[],
    },
];

pub fn find(key: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.key == key)
}
