// FleetDex - core/filter.rs
//
// Filter engine for directory records. All active criteria are AND-combined.
// Core layer: pure logic, no I/O or presentation dependencies.
//
// The engine is a pure function of (records, criteria): no side effects and
// no error conditions. An empty result is a valid, displayable state.

use crate::core::model::DirectoryRecord;
use crate::util::constants;

// =============================================================================
// Selector
// =============================================================================

/// The city/category constraint. `All` is the unconstrained sentinel; an
/// exact value must match the record's selector key case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    /// No constraint; every record passes.
    #[default]
    All,

    /// Record's city/category must equal this value exactly.
    Exact(String),
}

impl Selector {
    /// Parse raw user input. The empty string and the literal sentinel
    /// "all" (any case) mean unconstrained; anything else is an exact,
    /// case-sensitive constraint.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(constants::SELECTOR_ALL) {
            Selector::All
        } else {
            Selector::Exact(trimmed.to_string())
        }
    }

    /// Whether a record's selector key satisfies this constraint.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Exact(value) => key == value,
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::All => f.write_str(constants::SELECTOR_ALL),
            Selector::Exact(value) => f.write_str(value),
        }
    }
}

// =============================================================================
// Filter criteria
// =============================================================================

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    /// Free-text query, matched case-insensitively as a substring of the
    /// record name and selector key. Empty = no text filter.
    pub query: String,

    /// City/category constraint.
    pub selector: Selector,

    /// Only include editorially featured records.
    pub featured_only: bool,

    /// Only include trending records.
    pub trending_only: bool,
}

impl FilterCriteria {
    /// Returns true if no criteria are active.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.selector == Selector::All
            && !self.featured_only
            && !self.trending_only
    }

    /// Set the free-text query, truncating over-long input to
    /// `MAX_QUERY_LENGTH` characters rather than rejecting it.
    pub fn set_query(&mut self, raw: &str) {
        let trimmed = raw.trim();
        self.query = trimmed
            .char_indices()
            .nth(constants::MAX_QUERY_LENGTH)
            .map(|(byte_idx, _)| trimmed[..byte_idx].to_string())
            .unwrap_or_else(|| trimmed.to_string());
    }

    /// Reset all criteria to the unconstrained state, after which
    /// `apply_filter` returns the full dataset in original order.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Quick criteria for the featured directory section.
    pub fn featured_section() -> Self {
        Self {
            featured_only: true,
            ..Default::default()
        }
    }

    /// Quick criteria for the trending directory section.
    pub fn trending_section() -> Self {
        Self {
            trending_only: true,
            ..Default::default()
        }
    }
}

// =============================================================================
// Filter application
// =============================================================================

/// Apply criteria to a slice of records, returning indices of matches.
///
/// Returns a Vec of indices into the original slice, in original order
/// (stable filter, no re-sort). This avoids copying records and lets the
/// renderer page over the filtered view.
pub fn apply_filter<R: DirectoryRecord>(records: &[R], criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.is_empty() {
        return (0..records.len()).collect();
    }

    let query_lower = criteria.query.to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(*record, criteria, &query_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single record matches all active criteria.
fn matches_all<R: DirectoryRecord>(
    record: &R,
    criteria: &FilterCriteria,
    query_lower: &str,
) -> bool {
    // Selector constraint (case-sensitive equality)
    if !criteria.selector.matches(record.selector_key()) {
        return false;
    }

    // Text query (case-insensitive substring against name and selector key)
    if !query_lower.is_empty()
        && !record.name().to_lowercase().contains(query_lower)
        && !record.selector_key().to_lowercase().contains(query_lower)
    {
        return false;
    }

    // Featured / trending section constraints
    if criteria.featured_only && !record.featured() {
        return false;
    }
    if criteria.trending_only && !record.trending() {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{BrandRecord, LocationRecord};

    fn make_location(id: &str, name: &str, city: &str) -> LocationRecord {
        LocationRecord {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            image: format!("locations/{id}.jpg"),
            vehicle_count: 10,
            service_count: 2,
            rating: 4.5,
            trending: false,
            featured: false,
        }
    }

    fn make_brand(id: &str, name: &str, category: &str) -> BrandRecord {
        BrandRecord {
            id: id.to_string(),
            name: name.to_string(),
            logo: format!("brands/{id}.svg"),
            description: String::new(),
            category: category.to_string(),
            vehicle_count: 50,
            rating: 4.2,
            established: 1950,
            country: "Germany".to_string(),
            featured: false,
        }
    }

    /// Sample set from the directory: two Dubai locations, one Abu Dhabi.
    fn sample_locations() -> Vec<LocationRecord> {
        vec![
            make_location("downtown-dubai", "Downtown Dubai", "Dubai"),
            make_location("marina", "Marina", "Dubai"),
            make_location("corniche", "Corniche", "Abu Dhabi"),
        ]
    }

    #[test]
    fn test_empty_criteria_returns_all_in_order() {
        let locations = sample_locations();
        let result = apply_filter(&locations, &FilterCriteria::default());
        assert_eq!(result, vec![0, 1, 2]);
    }

    #[test]
    fn test_query_matches_name_substring() {
        let locations = sample_locations();
        let criteria = FilterCriteria {
            query: "mar".to_string(),
            ..Default::default()
        };
        let result = apply_filter(&locations, &criteria);
        assert_eq!(result, vec![1]);
        assert_eq!(locations[result[0]].name, "Marina");
    }

    #[test]
    fn test_selector_alone_matches_city() {
        let locations = sample_locations();
        let criteria = FilterCriteria {
            selector: Selector::parse("Abu Dhabi"),
            ..Default::default()
        };
        let result = apply_filter(&locations, &criteria);
        assert_eq!(result, vec![2]);
        assert_eq!(locations[result[0]].name, "Corniche");
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let locations = sample_locations();
        let upper = FilterCriteria {
            query: "DUBAI".to_string(),
            ..Default::default()
        };
        let lower = FilterCriteria {
            query: "dubai".to_string(),
            ..Default::default()
        };
        assert_eq!(
            apply_filter(&locations, &upper),
            apply_filter(&locations, &lower)
        );
        // "dubai" appears in one name and two city fields
        assert_eq!(apply_filter(&locations, &lower), vec![0, 1]);
    }

    #[test]
    fn test_selector_is_case_sensitive() {
        let locations = sample_locations();
        let criteria = FilterCriteria {
            selector: Selector::parse("dubai"),
            ..Default::default()
        };
        assert!(apply_filter(&locations, &criteria).is_empty());
    }

    #[test]
    fn test_selector_sentinel_and_empty_are_unconstrained() {
        assert_eq!(Selector::parse(""), Selector::All);
        assert_eq!(Selector::parse("all"), Selector::All);
        assert_eq!(Selector::parse("ALL"), Selector::All);
        assert_eq!(
            Selector::parse("Dubai"),
            Selector::Exact("Dubai".to_string())
        );
    }

    #[test]
    fn test_query_and_selector_are_and_combined() {
        let locations = sample_locations();
        let criteria = FilterCriteria {
            query: "downtown".to_string(),
            selector: Selector::parse("Abu Dhabi"),
            ..Default::default()
        };
        // "Downtown Dubai" matches the query but not the selector.
        assert!(apply_filter(&locations, &criteria).is_empty());
    }

    #[test]
    fn test_result_is_subsequence_in_original_order() {
        let locations = sample_locations();
        let criteria = FilterCriteria {
            query: "i".to_string(), // matches all three names
            ..Default::default()
        };
        let result = apply_filter(&locations, &criteria);
        assert!(result.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let locations = sample_locations();
        let criteria = FilterCriteria {
            query: "dubai".to_string(),
            ..Default::default()
        };
        let once: Vec<LocationRecord> = apply_filter(&locations, &criteria)
            .into_iter()
            .map(|i| locations[i].clone())
            .collect();
        let twice: Vec<LocationRecord> = apply_filter(&once, &criteria)
            .into_iter()
            .map(|i| once[i].clone())
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let locations = sample_locations();
        let criteria = FilterCriteria {
            query: "zanzibar".to_string(),
            ..Default::default()
        };
        assert!(apply_filter(&locations, &criteria).is_empty());
    }

    #[test]
    fn test_reset_restores_full_dataset() {
        let locations = sample_locations();
        let mut criteria = FilterCriteria {
            query: "mar".to_string(),
            selector: Selector::parse("Dubai"),
            featured_only: true,
            trending_only: true,
        };
        criteria.reset();
        assert!(criteria.is_empty());
        assert_eq!(apply_filter(&locations, &criteria), vec![0, 1, 2]);
    }

    #[test]
    fn test_set_query_trims_and_truncates() {
        let mut criteria = FilterCriteria::default();
        criteria.set_query("  marina  ");
        assert_eq!(criteria.query, "marina");

        let long = "x".repeat(crate::util::constants::MAX_QUERY_LENGTH + 50);
        criteria.set_query(&long);
        assert_eq!(
            criteria.query.chars().count(),
            crate::util::constants::MAX_QUERY_LENGTH
        );
    }

    #[test]
    fn test_featured_and_trending_sections() {
        let mut locations = sample_locations();
        locations[0].featured = true;
        locations[1].trending = true;

        let featured = apply_filter(&locations, &FilterCriteria::featured_section());
        assert_eq!(featured, vec![0]);

        let trending = apply_filter(&locations, &FilterCriteria::trending_section());
        assert_eq!(trending, vec![1]);
    }

    #[test]
    fn test_brand_query_matches_category() {
        let brands = vec![
            make_brand("mercedes-benz", "Mercedes-Benz", "luxury"),
            make_brand("toyota", "Toyota", "economy"),
            make_brand("bentley", "Bentley", "luxury"),
        ];
        let criteria = FilterCriteria {
            query: "LUX".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filter(&brands, &criteria), vec![0, 2]);

        let criteria = FilterCriteria {
            selector: Selector::parse("economy"),
            ..Default::default()
        };
        assert_eq!(apply_filter(&brands, &criteria), vec![1]);
    }
}
