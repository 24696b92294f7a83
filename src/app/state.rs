// FleetDex - app/state.rs
//
// Application state management. Holds the loaded catalog, the active
// directory view, the filter criteria, and the filtered view indices.
// Owned by the CLI session.

use crate::core::filter::{self, FilterCriteria};
use crate::core::model::{BrandRecord, Catalog, CatalogKind, LocationRecord};

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// The loaded, validated catalog.
    pub catalog: Catalog,

    /// Which directory the current view addresses.
    pub view: CatalogKind,

    /// Current filter criteria for the active view.
    pub criteria: FilterCriteria,

    /// Indices of records matching the current criteria (into the active
    /// view's record list), in dataset order.
    pub filtered_indices: Vec<usize>,

    /// Non-fatal warnings accumulated during catalog loading.
    pub warnings: Vec<String>,
}

impl AppState {
    /// Create initial state with a loaded catalog. The filtered view starts
    /// unconstrained (all records of the chosen directory).
    pub fn new(catalog: Catalog, view: CatalogKind) -> Self {
        let mut state = Self {
            catalog,
            view,
            criteria: FilterCriteria::default(),
            filtered_indices: Vec::new(),
            warnings: Vec::new(),
        };
        state.apply_filter();
        state
    }

    /// Recompute filtered indices from the active view and criteria.
    pub fn apply_filter(&mut self) {
        self.filtered_indices = match self.view {
            CatalogKind::Locations => filter::apply_filter(&self.catalog.locations, &self.criteria),
            CatalogKind::Brands => filter::apply_filter(&self.catalog.brands, &self.criteria),
        };
    }

    /// Reset criteria to the unconstrained state and recompute, restoring
    /// the full dataset in original order.
    pub fn clear(&mut self) {
        self.criteria.reset();
        self.apply_filter();
    }

    /// Total record count of the active view (before filtering).
    pub fn view_len(&self) -> usize {
        match self.view {
            CatalogKind::Locations => self.catalog.locations.len(),
            CatalogKind::Brands => self.catalog.brands.len(),
        }
    }

    /// The filtered location records, in dataset order.
    ///
    /// Empty when the active view is the brand directory.
    pub fn filtered_locations(&self) -> Vec<&LocationRecord> {
        if self.view != CatalogKind::Locations {
            return Vec::new();
        }
        self.filtered_indices
            .iter()
            .filter_map(|&idx| self.catalog.locations.get(idx))
            .collect()
    }

    /// The filtered brand records, in dataset order.
    ///
    /// Empty when the active view is the location directory.
    pub fn filtered_brands(&self) -> Vec<&BrandRecord> {
        if self.view != CatalogKind::Brands {
            return Vec::new();
        }
        self.filtered_indices
            .iter()
            .filter_map(|&idx| self.catalog.brands.get(idx))
            .collect()
    }
}
