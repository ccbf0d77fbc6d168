//! The `search` command: run the pipeline over the fetched catalog.
//!
//! The flags mirror the search view's query-string contract, and the spec
//! is built through the same coercion path (`FilterSpec::from_pairs`), so
//! the CLI shows exactly what the search URL with the same parameters
//! would show.

use car_finder_client::ApiClient;
use car_finder_core::search::{self, FilterSpec};
use car_finder_core::types::Car;

/// Build a filter spec from raw flag values.
///
/// Values go through the query-pair coercion, so junk input degrades to
/// "unset" exactly like it would in a URL.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn spec_from_args(
    brand: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    fuel_type: Option<String>,
    seats: Option<String>,
    query: Option<String>,
    sort: String,
    page: String,
) -> FilterSpec {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if let Some(brand) = brand {
        pairs.push(("brand", brand));
    }
    if let Some(min) = min_price {
        pairs.push(("minPrice", min));
    }
    if let Some(max) = max_price {
        pairs.push(("maxPrice", max));
    }
    if let Some(fuel) = fuel_type {
        pairs.push(("fuelType", fuel));
    }
    if let Some(seats) = seats {
        pairs.push(("seatingCapacity", seats));
    }
    if let Some(query) = query {
        pairs.push(("search", query));
    }
    pairs.push(("sortBy", sort));
    pairs.push(("page", page));
    FilterSpec::from_pairs(pairs)
}

/// Fetch the catalog and print one page of results.
pub async fn run(server: &str, spec: &FilterSpec) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading cars...");

    let client = ApiClient::new(server);
    let cars = match client.list_cars().await {
        Ok(cars) => cars,
        Err(err) => {
            tracing::debug!(error = %err, "Catalog fetch failed");
            return Err("Failed to load cars. Please try again later.".into());
        }
    };

    let results = search::search(&cars, spec);

    if results.total_count == 0 {
        println!("No cars found matching your criteria. Try adjusting your filters.");
        return Ok(());
    }

    println!("Found {} cars matching your criteria", results.total_count);
    println!();
    for car in &results.cars {
        println!("{}", summary_line(car));
    }
    println!();
    println!("Page {} of {}", results.page, results.total_pages);

    Ok(())
}

/// One-line summary used by search and wishlist listings.
#[must_use]
pub fn summary_line(car: &Car) -> String {
    format!(
        "{:<10} {:<32} {:>12}  {:<8} {:<10} {} seats",
        car.id, car.name, car.price, car.fuel_type, car.transmission, car.seating_capacity
    )
}
