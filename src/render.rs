// FleetDex - render.rs
//
// Terminal rendering of filtered directory views and the catalog summary.
// Binary-side presentation: consumes the filtered sequence from AppState
// and prints it; never filters or sorts on its own.

use console::style;
use fleetdex::core::model::{BrandRecord, CatalogSummary, LocationRecord};
use fleetdex::util::constants;

/// Print the filtered locations view as a table.
///
/// `total` is the unfiltered size of the directory, for the footer line.
pub fn print_locations(records: &[&LocationRecord], total: usize, page_size: usize) {
    if records.is_empty() {
        print_no_matches();
        return;
    }

    // Pad first, style second: escape codes inside a width-padded field
    // would skew the column alignment.
    println!(
        "{}",
        style(format!(
            "{:<width$}  {:<14}  {:>8}  {:>8}  {:>6}",
            "NAME",
            "CITY",
            "VEHICLES",
            "SERVICES",
            "RATING",
            width = constants::NAME_COLUMN_WIDTH,
        ))
        .bold()
    );

    for record in records.iter().take(page_size) {
        let mut flags = String::new();
        if record.featured {
            flags.push_str(" ★");
        }
        if record.trending {
            flags.push_str(" ↗");
        }
        println!(
            "{:<width$}  {:<14}  {:>8}  {:>8}  {:>6.1}{}",
            truncate_name(&record.name),
            record.city,
            record.vehicle_count,
            record.service_count,
            record.rating,
            style(flags).yellow(),
            width = constants::NAME_COLUMN_WIDTH,
        );
    }

    print_footer(records.len(), total, page_size, "locations");
}

/// Print the filtered brands view as a table.
pub fn print_brands(records: &[&BrandRecord], total: usize, page_size: usize) {
    if records.is_empty() {
        print_no_matches();
        return;
    }

    println!(
        "{}",
        style(format!(
            "{:<width$}  {:<10}  {:<14}  {:>5}  {:>8}  {:>6}",
            "NAME",
            "CATEGORY",
            "COUNTRY",
            "EST.",
            "VEHICLES",
            "RATING",
            width = constants::NAME_COLUMN_WIDTH,
        ))
        .bold()
    );

    for record in records.iter().take(page_size) {
        let flags = if record.featured { " ★" } else { "" };
        println!(
            "{:<width$}  {:<10}  {:<14}  {:>5}  {:>8}  {:>6.1}{}",
            truncate_name(&record.name),
            record.category,
            record.country,
            record.established,
            record.vehicle_count,
            record.rating,
            style(flags).yellow(),
            width = constants::NAME_COLUMN_WIDTH,
        );
    }

    print_footer(records.len(), total, page_size, "brands");
}

/// Print catalog statistics for the `summary` command.
pub fn print_summary(summary: &CatalogSummary) {
    println!("{}", style("Catalog summary").bold());
    println!(
        "  {} locations across {} cities, {} brands across {} categories",
        style(summary.location_count).cyan(),
        style(summary.locations_by_city.len()).cyan(),
        style(summary.brand_count).cyan(),
        style(summary.brands_by_category.len()).cyan(),
    );
    println!(
        "  {} vehicles, {} service points, mean rating {:.1}",
        style(summary.total_vehicles).cyan(),
        style(summary.total_services).cyan(),
        summary.mean_rating,
    );
    println!(
        "  featured: {} locations, {} brands; trending: {} locations",
        summary.featured_locations, summary.featured_brands, summary.trending_locations,
    );

    println!("\n{}", style("Locations by city").bold());
    for (city, count) in &summary.locations_by_city {
        println!("  {:<20} {}", city, style(count).cyan());
    }

    println!("\n{}", style("Brands by category").bold());
    for (category, count) in &summary.brands_by_category {
        println!("  {:<20} {}", category, style(count).cyan());
    }
}

/// Empty result sets are a valid state, not an error.
fn print_no_matches() {
    println!("{}", style("No matches.").dim());
}

fn print_footer(matched: usize, total: usize, page_size: usize, noun: &str) {
    if matched > page_size {
        println!(
            "{}",
            style(format!(
                "Showing {page_size} of {matched} matching {noun} ({total} total). \
                 Raise [ui] page_size in config.toml to see more."
            ))
            .dim()
        );
    } else {
        println!(
            "{}",
            style(format!("Showing {matched} of {total} {noun}.")).dim()
        );
    }
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() <= constants::NAME_COLUMN_WIDTH {
        name.to_string()
    } else {
        let kept: String = name
            .chars()
            .take(constants::NAME_COLUMN_WIDTH.saturating_sub(1))
            .collect();
        format!("{kept}…")
    }
}
