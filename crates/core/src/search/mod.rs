//! The filter-sort-paginate pipeline.
//!
//! This module projects the full catalog into "what the user should see
//! right now" for a given [`FilterSpec`]. It is a pure function: no I/O,
//! no hidden state, and the same inputs always produce the same page.
//!
//! The spec itself round-trips through URL query pairs, so a reloaded URL
//! reproduces the identical result set. All parsing coerces junk values
//! to "unset" rather than erroring.

use rust_decimal::Decimal;

use crate::types::Car;

/// Number of cars per result page.
pub const PAGE_SIZE: usize = 10;

/// Sort order applied after filtering.
///
/// `Default` keeps dataset order, which also equals post-filter order since
/// no filter step reorders.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

impl SortMode {
    /// Parse from the `sortBy` query parameter value.
    ///
    /// Anything unrecognized falls back to `Default`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::Default,
        }
    }

    /// Convert to the `sortBy` query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

/// A fully coerced filter specification.
///
/// `None` on a field means "match all" / "match any" / unset. The free-text
/// `query` is expected to already be debounced by the caller; the pipeline
/// itself has no notion of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Exact brand match; `None` matches all brands.
    pub brand: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    /// Exact fuel type match; `None` matches all fuel types.
    pub fuel_type: Option<String>,
    /// Exact seat count match; `None` matches any capacity.
    pub seating_capacity: Option<u8>,
    /// Case-insensitive substring matched against name, brand, or model.
    pub query: String,
    pub sort: SortMode,
    /// 1-based page number.
    pub page: u32,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            brand: None,
            min_price: None,
            max_price: None,
            fuel_type: None,
            seating_capacity: None,
            query: String::new(),
            sort: SortMode::Default,
            page: 1,
        }
    }
}

impl FilterSpec {
    /// Build a spec from URL query pairs.
    ///
    /// Recognized keys: `brand`, `minPrice`, `maxPrice`, `fuelType`,
    /// `seatingCapacity`, `search`, `sortBy`, `page`. Unknown keys are
    /// ignored. Values are coerced defensively: empty strings and the
    /// `all`/`any` sentinels mean unset, unparseable numbers mean unset,
    /// and an invalid page means page 1.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut spec = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "brand" => spec.brand = parse_choice(value, "all"),
                "minPrice" => spec.min_price = value.trim().parse().ok(),
                "maxPrice" => spec.max_price = value.trim().parse().ok(),
                "fuelType" => spec.fuel_type = parse_choice(value, "all"),
                "seatingCapacity" => {
                    spec.seating_capacity = match parse_choice(value, "any") {
                        Some(v) => v.parse().ok(),
                        None => None,
                    };
                }
                "search" => spec.query = value.trim().to_owned(),
                "sortBy" => spec.sort = SortMode::parse(value),
                "page" => spec.page = value.trim().parse().map_or(1, |p: u32| p.max(1)),
                _ => {}
            }
        }
        spec
    }

    /// Convert back to URL query pairs, omitting defaults.
    ///
    /// `from_pairs(spec.to_pairs())` reconstructs the same spec, which is
    /// the round-trip invariant the search view relies on.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(brand) = &self.brand {
            pairs.push(("brand", brand.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(fuel) = &self.fuel_type {
            pairs.push(("fuelType", fuel.clone()));
        }
        if let Some(seats) = self.seating_capacity {
            pairs.push(("seatingCapacity", seats.to_string()));
        }
        if !self.query.is_empty() {
            pairs.push(("search", self.query.clone()));
        }
        if self.sort != SortMode::Default {
            pairs.push(("sortBy", self.sort.as_str().to_owned()));
        }
        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }
        pairs
    }

    /// Check whether a car satisfies every active filter predicate.
    #[must_use]
    pub fn matches(&self, car: &Car) -> bool {
        if let Some(brand) = &self.brand
            && car.brand != *brand
        {
            return false;
        }
        if let Some(min) = self.min_price
            && car.price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && car.price > max
        {
            return false;
        }
        if let Some(fuel) = &self.fuel_type
            && car.fuel_type != *fuel
        {
            return false;
        }
        if let Some(seats) = self.seating_capacity
            && car.seating_capacity != seats
        {
            return false;
        }
        if !self.query.is_empty() {
            let query = self.query.to_lowercase();
            let hit = car.name.to_lowercase().contains(&query)
                || car.brand.to_lowercase().contains(&query)
                || car.model.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        true
    }
}

/// One page of pipeline output.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPage {
    /// The visible slice, at most [`PAGE_SIZE`] cars.
    pub cars: Vec<Car>,
    /// The effective page. Equals the requested page unless that page was
    /// out of range, in which case it is reset to 1.
    pub page: u32,
    /// Always at least 1, even for an empty result set.
    pub total_pages: u32,
    /// Matching cars before pagination.
    pub total_count: usize,
}

/// Run the pipeline: filter, sort, then paginate.
///
/// Filters apply conjunctively and never reorder the working set, so the
/// `Default` sort equals dataset order. Price sorts are stable: cars with
/// equal prices keep their relative dataset order.
///
/// If the requested page exceeds the page count of the filtered set (a
/// stale page number after a narrowing filter change), the effective page
/// resets to 1 rather than returning a silently empty slice.
#[must_use]
pub fn search(cars: &[Car], spec: &FilterSpec) -> ResultsPage {
    let mut matched: Vec<&Car> = cars.iter().filter(|car| spec.matches(car)).collect();

    match spec.sort {
        SortMode::Default => {}
        SortMode::PriceAsc => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortMode::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    let total_count = matched.len();
    let total_pages = total_count.div_ceil(PAGE_SIZE).max(1);

    let requested = spec.page.max(1) as usize;
    let page = if requested > total_pages { 1 } else { requested };

    let cars = matched
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    ResultsPage {
        cars,
        page: u32::try_from(page).unwrap_or(1),
        total_pages: u32::try_from(total_pages).unwrap_or(1),
        total_count,
    }
}

/// Distinct brands in first-seen dataset order, for the filter dropdown.
#[must_use]
pub fn distinct_brands(cars: &[Car]) -> Vec<String> {
    distinct(cars, |car| &car.brand)
}

/// Distinct fuel types in first-seen dataset order.
#[must_use]
pub fn distinct_fuel_types(cars: &[Car]) -> Vec<String> {
    distinct(cars, |car| &car.fuel_type)
}

fn distinct<'a>(cars: &'a [Car], field: impl Fn(&'a Car) -> &'a String) -> Vec<String> {
    let mut seen = Vec::new();
    for car in cars {
        let value = field(car);
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}

fn parse_choice(value: &str, sentinel: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == sentinel {
        None
    } else {
        Some(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CarId;

    fn car(id: &str, brand: &str, model: &str, price: i64, fuel: &str, seats: u8) -> Car {
        Car {
            id: CarId::new(id),
            name: format!("{brand} {model}"),
            brand: brand.to_owned(),
            model: model.to_owned(),
            year: 2023,
            price: Decimal::from(price),
            fuel_type: fuel.to_owned(),
            transmission: "Manual".to_owned(),
            seating_capacity: seats,
            mileage: Decimal::from(15),
            image: None,
            description: None,
            engine_type: None,
            displacement: None,
            max_power: None,
            max_torque: None,
            drivetrain: None,
            length: None,
            width: None,
            height: None,
            wheelbase: None,
            ground_clearance: None,
            kerb_weight: None,
            safety_features: None,
            comfort_features: None,
            entertainment_features: None,
        }
    }

    fn fixture() -> Vec<Car> {
        vec![
            car("c1", "Tata", "Nexon", 800_000, "Petrol", 5),
            car("c2", "Hyundai", "Creta", 1_100_000, "Diesel", 5),
            car("c3", "Maruti", "Swift", 650_000, "Petrol", 5),
            car("c4", "Mahindra", "XUV700", 1_400_000, "Diesel", 7),
            car("c5", "Tata", "Tiago EV", 900_000, "Electric", 5),
            car("c6", "Kia", "Carens", 1_100_000, "Petrol", 7),
            car("c7", "Honda", "City", 1_200_000, "Petrol", 5),
        ]
    }

    /// Catalog of `n` match-all cars for pagination tests.
    fn flat_catalog(n: usize) -> Vec<Car> {
        (1..=n)
            .map(|i| car(&format!("car-{i:03}"), "Brand", &format!("M{i}"), 500_000, "Petrol", 5))
            .collect()
    }

    #[test]
    fn test_no_filters_returns_everything_in_order() {
        let cars = fixture();
        let page = search(&cars, &FilterSpec::default());
        assert_eq!(page.total_count, 7);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        let ids: Vec<_> = page.cars.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c1", "c2", "c3", "c4", "c5", "c6", "c7"]);
    }

    #[test]
    fn test_filters_apply_conjunctively() {
        let cars = fixture();
        let spec = FilterSpec {
            fuel_type: Some("Petrol".to_owned()),
            min_price: Some(Decimal::from(700_000)),
            max_price: Some(Decimal::from(1_150_000)),
            ..FilterSpec::default()
        };
        let page = search(&cars, &spec);
        for result in &page.cars {
            assert!(spec.matches(result));
        }
        let ids: Vec<_> = page.cars.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c1", "c6"]);
    }

    #[test]
    fn test_brand_filter_exact_match() {
        let cars = fixture();
        let spec = FilterSpec {
            brand: Some("Tata".to_owned()),
            ..FilterSpec::default()
        };
        let page = search(&cars, &spec);
        let ids: Vec<_> = page.cars.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c1", "c5"]);
    }

    #[test]
    fn test_seating_capacity_exact_match() {
        let cars = fixture();
        let spec = FilterSpec {
            seating_capacity: Some(7),
            ..FilterSpec::default()
        };
        let page = search(&cars, &spec);
        let ids: Vec<_> = page.cars.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c4", "c6"]);
    }

    #[test]
    fn test_query_matches_name_brand_or_model_case_insensitive() {
        let cars = fixture();
        let spec = FilterSpec {
            query: "tATa".to_owned(),
            ..FilterSpec::default()
        };
        let page = search(&cars, &spec);
        assert_eq!(page.total_count, 2);

        let spec = FilterSpec {
            query: "xuv".to_owned(),
            ..FilterSpec::default()
        };
        let page = search(&cars, &spec);
        let ids: Vec<_> = page.cars.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c4"]);
    }

    #[test]
    fn test_price_sort_is_stable_among_equal_prices() {
        let cars = fixture();
        let spec = FilterSpec {
            sort: SortMode::PriceAsc,
            ..FilterSpec::default()
        };
        let page = search(&cars, &spec);
        let ids: Vec<_> = page.cars.iter().map(|c| c.id.as_str()).collect();
        // c2 and c6 share a price; dataset order between them must hold.
        assert_eq!(ids, ["c3", "c1", "c5", "c2", "c6", "c7", "c4"]);

        let spec = FilterSpec {
            sort: SortMode::PriceDesc,
            ..FilterSpec::default()
        };
        let page = search(&cars, &spec);
        let ids: Vec<_> = page.cars.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c4", "c7", "c2", "c6", "c5", "c1", "c3"]);
    }

    #[test]
    fn test_twenty_five_records_page_three() {
        let cars = flat_catalog(25);
        let spec = FilterSpec {
            page: 3,
            ..FilterSpec::default()
        };
        let page = search(&cars, &spec);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_count, 25);
        let ids: Vec<_> = page.cars.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            ["car-021", "car-022", "car-023", "car-024", "car-025"]
        );
    }

    #[test]
    fn test_empty_result_still_has_one_page() {
        let cars = fixture();
        let spec = FilterSpec {
            brand: Some("Tesla".to_owned()),
            page: 2,
            ..FilterSpec::default()
        };
        let page = search(&cars, &spec);
        assert!(page.cars.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_stale_page_resets_to_first_page_slice() {
        let cars = flat_catalog(25);
        // Page 3 was valid before this (hypothetical) filter narrowed the
        // set below 10 records.
        let spec = FilterSpec {
            query: "m1".to_owned(),
            page: 3,
            ..FilterSpec::default()
        };
        let page = search(&cars, &spec);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        let first_page = search(
            &cars,
            &FilterSpec {
                query: "m1".to_owned(),
                ..FilterSpec::default()
            },
        );
        assert_eq!(page.cars, first_page.cars);
    }

    #[test]
    fn test_from_pairs_coerces_defensively() {
        let spec = FilterSpec::from_pairs([
            ("brand", "all"),
            ("minPrice", "not-a-number"),
            ("maxPrice", ""),
            ("fuelType", "Diesel"),
            ("seatingCapacity", "any"),
            ("search", "  creta "),
            ("sortBy", "price-banana"),
            ("page", "0"),
            ("utm_source", "ignored"),
        ]);
        assert_eq!(spec.brand, None);
        assert_eq!(spec.min_price, None);
        assert_eq!(spec.max_price, None);
        assert_eq!(spec.fuel_type.as_deref(), Some("Diesel"));
        assert_eq!(spec.seating_capacity, None);
        assert_eq!(spec.query, "creta");
        assert_eq!(spec.sort, SortMode::Default);
        assert_eq!(spec.page, 1);
    }

    #[test]
    fn test_pairs_round_trip() {
        let spec = FilterSpec {
            brand: Some("Tata".to_owned()),
            min_price: Some(Decimal::from(500_000)),
            max_price: Some(Decimal::from(1_000_000)),
            fuel_type: Some("Petrol".to_owned()),
            seating_capacity: Some(5),
            query: "nexon".to_owned(),
            sort: SortMode::PriceDesc,
            page: 2,
        };
        let back = FilterSpec::from_pairs(spec.to_pairs());
        assert_eq!(back, spec);

        // A default spec serializes to nothing at all.
        assert!(FilterSpec::default().to_pairs().is_empty());
        let empty: [(&str, &str); 0] = [];
        assert_eq!(FilterSpec::from_pairs(empty), FilterSpec::default());
    }

    #[test]
    fn test_distinct_values_first_seen_order() {
        let cars = fixture();
        assert_eq!(
            distinct_brands(&cars),
            ["Tata", "Hyundai", "Maruti", "Mahindra", "Kia", "Honda"]
        );
        assert_eq!(distinct_fuel_types(&cars), ["Petrol", "Diesel", "Electric"]);
    }
}
