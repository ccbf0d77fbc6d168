//! The `show` command: fetch and print a single car.

use car_finder_client::{ApiClient, ApiError};
use car_finder_core::types::{Car, CarId};

/// Fetch one car by id and print its details.
///
/// An absent id is a normal outcome, printed as a message; only transport
/// failures are errors.
pub async fn run(server: &str, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading car details...");

    let client = ApiClient::new(server);
    match client.get_car(&CarId::new(id)).await {
        Ok(car) => {
            print_details(&car);
            Ok(())
        }
        Err(ApiError::NotFound) => {
            println!("Car not found");
            Ok(())
        }
        Err(err) => {
            tracing::debug!(error = %err, "Car fetch failed");
            Err("Failed to load car details. Please try again later.".into())
        }
    }
}

fn print_details(car: &Car) {
    println!("{} ({})", car.name, car.id);
    println!("  Brand:        {}", car.brand);
    println!("  Model:        {}", car.model);
    println!("  Year:         {}", car.year);
    println!("  Price:        {}", car.price);
    println!("  Fuel type:    {}", car.fuel_type);
    println!("  Transmission: {}", car.transmission);
    println!("  Seats:        {}", car.seating_capacity);
    println!("  Mileage:      {}", car.mileage);

    if let Some(description) = &car.description {
        println!();
        println!("  {description}");
    }
    if let Some(engine) = &car.engine_type {
        println!("  Engine:       {engine}");
    }
    if let Some(displacement) = car.displacement {
        println!("  Displacement: {displacement} cc");
    }
    if let Some(power) = car.max_power {
        println!("  Max power:    {power} bhp");
    }
    if let Some(torque) = car.max_torque {
        println!("  Max torque:   {torque} Nm");
    }
    if let Some(drivetrain) = &car.drivetrain {
        println!("  Drivetrain:   {drivetrain}");
    }
    for (label, features) in [
        ("Safety", &car.safety_features),
        ("Comfort", &car.comfort_features),
        ("Entertainment", &car.entertainment_features),
    ] {
        if let Some(features) = features {
            println!("  {label}: {}", features.join(", "));
        }
    }
}
