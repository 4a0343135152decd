use anyhow::Result;

use farewheel_core::{Gazetteer, GeoPoint};

pub fn run(query: Option<&str>, near: Option<GeoPoint>) -> Result<()> {
    let gazetteer = Gazetteer::default();

    if let Some(point) = near {
        match gazetteer.nearest(point) {
            Some(place) => println!(
                "{} ({}), {:.2} km away",
                place.name,
                place.point,
                place.point.distance_km(&point)
            ),
            None => println!("No places known."),
        }
        return Ok(());
    }

    match query {
        Some(query) => {
            let place = gazetteer.search(query)?;
            println!("{} ({})", place.name, place.point);
            if !place.aliases.is_empty() {
                println!("  also known as: {}", place.aliases.join(", "));
            }
        }
        None => {
            println!("Known places ({}):\n", gazetteer.places().len());
            for place in gazetteer.places() {
                println!("  {:<20} {}", place.name, place.point);
            }
        }
    }

    Ok(())
}
