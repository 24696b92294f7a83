// FleetDex - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// presentation concerns.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Directory records
// =============================================================================

/// A rental location: one pickup/drop-off site in the marketplace directory.
///
/// Records are loaded once at startup and never mutated. Identity is `id`;
/// two records with the same id are the same location, and a user dataset
/// entry replaces the built-in entry with that id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Stable slug identifier (e.g. "downtown-dubai").
    pub id: String,

    /// Display name (e.g. "Downtown Dubai").
    pub name: String,

    /// City the location belongs to. Selector constraints compare against
    /// this field case-sensitively.
    pub city: String,

    /// Relative path or URL of the location's card image.
    pub image: String,

    /// Number of vehicles available at this location.
    pub vehicle_count: usize,

    /// Number of service points (counters, kiosks) at this location.
    pub service_count: usize,

    /// Aggregate customer rating, 0.0 to 5.0 inclusive.
    pub rating: f32,

    /// Whether the location is currently surfaced in the trending section.
    #[serde(default)]
    pub trending: bool,

    /// Whether the location is editorially featured.
    #[serde(default)]
    pub featured: bool,
}

/// A vehicle brand listed in the marketplace directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandRecord {
    /// Stable slug identifier (e.g. "mercedes-benz").
    pub id: String,

    /// Display name (e.g. "Mercedes-Benz").
    pub name: String,

    /// Relative path or URL of the brand logo image.
    pub logo: String,

    /// One-sentence marketing description shown on the brand card.
    pub description: String,

    /// Fleet category (e.g. "luxury", "economy", "suv"). Selector
    /// constraints compare against this field case-sensitively.
    pub category: String,

    /// Number of vehicles of this brand across the marketplace.
    pub vehicle_count: usize,

    /// Aggregate customer rating, 0.0 to 5.0 inclusive.
    pub rating: f32,

    /// Year the brand was founded.
    pub established: u16,

    /// Country of origin.
    pub country: String,

    /// Whether the brand is editorially featured.
    #[serde(default)]
    pub featured: bool,
}

// =============================================================================
// Record trait (the seam the filter engine works through)
// =============================================================================

/// Common view over both record types consumed by the filter engine and
/// the renderer. The engine never needs the full concrete shape, only the
/// fields the filter contract names.
pub trait DirectoryRecord {
    /// Stable identity.
    fn id(&self) -> &str;

    /// Display name; first haystack of the free-text query.
    fn name(&self) -> &str;

    /// Field a selector constraint compares against: `city` for locations,
    /// `category` for brands. Also the second haystack of the free-text
    /// query.
    fn selector_key(&self) -> &str;

    /// Whether the record is editorially featured.
    fn featured(&self) -> bool;

    /// Whether the record is trending. Brands have no trending flag and
    /// always report false.
    fn trending(&self) -> bool {
        false
    }
}

impl DirectoryRecord for LocationRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn selector_key(&self) -> &str {
        &self.city
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn trending(&self) -> bool {
        self.trending
    }
}

impl DirectoryRecord for BrandRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn selector_key(&self) -> &str {
        &self.category
    }

    fn featured(&self) -> bool {
        self.featured
    }
}

// =============================================================================
// Catalog kind
// =============================================================================

/// Which directory a dataset file (or a CLI command) addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Locations,
    Brands,
}

impl CatalogKind {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Locations => "locations",
            CatalogKind::Brands => "brands",
        }
    }

    /// What the selector constrains for this kind ("city" or "category").
    pub fn selector_label(&self) -> &'static str {
        match self {
            CatalogKind::Locations => "city",
            CatalogKind::Brands => "category",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Catalog (the loaded, validated datasets)
// =============================================================================

/// Both validated directory datasets, held for the process lifetime.
///
/// Order within each list is the dataset order; the filter engine promises
/// to preserve it, so nothing here ever re-sorts.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// All rental locations, in dataset order.
    pub locations: Vec<LocationRecord>,

    /// All vehicle brands, in dataset order.
    pub brands: Vec<BrandRecord>,
}

impl Catalog {
    /// Compute summary statistics over the loaded catalog.
    pub fn summary(&self) -> CatalogSummary {
        let mut by_city: BTreeMap<String, usize> = BTreeMap::new();
        for loc in &self.locations {
            *by_city.entry(loc.city.clone()).or_default() += 1;
        }

        let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
        for brand in &self.brands {
            *by_category.entry(brand.category.clone()).or_default() += 1;
        }

        let total_vehicles = self.locations.iter().map(|l| l.vehicle_count).sum();
        let total_services = self.locations.iter().map(|l| l.service_count).sum();

        let rating_sum: f32 = self
            .locations
            .iter()
            .map(|l| l.rating)
            .chain(self.brands.iter().map(|b| b.rating))
            .sum();
        let rated = self.locations.len() + self.brands.len();
        let mean_rating = if rated > 0 {
            rating_sum / rated as f32
        } else {
            0.0
        };

        CatalogSummary {
            location_count: self.locations.len(),
            brand_count: self.brands.len(),
            locations_by_city: by_city,
            brands_by_category: by_category,
            total_vehicles,
            total_services,
            featured_locations: self.locations.iter().filter(|l| l.featured).count(),
            trending_locations: self.locations.iter().filter(|l| l.trending).count(),
            featured_brands: self.brands.iter().filter(|b| b.featured).count(),
            mean_rating,
        }
    }
}

// =============================================================================
// Catalog Summary
// =============================================================================

/// Summary statistics over a loaded catalog, rendered by the `summary`
/// command. BTreeMaps keep the per-bucket listings in deterministic order.
#[derive(Debug, Clone, Default)]
pub struct CatalogSummary {
    /// Total location records.
    pub location_count: usize,

    /// Total brand records.
    pub brand_count: usize,

    /// Location counts per city.
    pub locations_by_city: BTreeMap<String, usize>,

    /// Brand counts per category.
    pub brands_by_category: BTreeMap<String, usize>,

    /// Sum of vehicle counts across all locations.
    pub total_vehicles: usize,

    /// Sum of service-point counts across all locations.
    pub total_services: usize,

    /// Locations flagged featured.
    pub featured_locations: usize,

    /// Locations flagged trending.
    pub trending_locations: usize,

    /// Brands flagged featured.
    pub featured_brands: usize,

    /// Mean rating across every record in the catalog.
    pub mean_rating: f32,
}
