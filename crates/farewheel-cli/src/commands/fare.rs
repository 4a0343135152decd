use anyhow::{bail, Result};
use chrono::{Local, NaiveTime};

use farewheel_core::{
    AppConfig, DistancePicker, FareBreakdown, FareProvider, Gazetteer, RoutePicker,
    TariffFareProvider, TripParams, VehicleKind,
};
use farewheel_tui::widgets::amount_line;

/// Receipt width in columns
const WIDTH: usize = 40;

pub fn run(
    config: &AppConfig,
    kind: VehicleKind,
    distance: Option<f64>,
    route: Option<(String, String)>,
    at: Option<NaiveTime>,
    waiting: u32,
) -> Result<()> {
    let (distance_km, route) = match (distance, route) {
        (Some(km), _) => (km, None),
        (None, Some((from, to))) => {
            let gazetteer = Gazetteer::default();
            let start = gazetteer.search(&from)?;
            let end = gazetteer.search(&to)?;

            let mut picker = RoutePicker::default();
            picker.tap(start.point)?;
            picker.tap(end.point)?;
            let Some(km) = picker.picked_distance() else {
                bail!("Could not measure a route from {} to {}", start.name, end.name);
            };
            (km, Some(format!("{} to {}", start.name, end.name)))
        }
        (None, None) => bail!("Give a distance (--distance) or a route (--from and --to)"),
    };

    let departure = at.unwrap_or_else(|| Local::now().time());
    let trip = TripParams::new(distance_km, departure).with_waiting(waiting);

    let provider = TariffFareProvider::new(config.fares.clone());
    let fare = provider.breakdown(kind, &trip)?;
    print!("{}", format_receipt(&fare, route.as_deref()));
    Ok(())
}

pub fn format_receipt(fare: &FareBreakdown, route: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  (Receipt #{})\n", fare.title(), fare.receipt));
    if let Some(route) = route {
        out.push_str(&format!("{}\n", route));
    }
    out.push_str(&format!(
        "{:.2} km, departs {}, waiting {} min\n\n",
        fare.trip.distance_km,
        fare.trip.departure.format("%H:%M"),
        fare.trip.waiting_minutes
    ));

    for line in &fare.lines {
        out.push_str(&format!("  {}\n", amount_line(&line.label, line.amount, WIDTH)));
        match &line.details {
            Some(details) => out.push_str(&format!("    {}\n", details)),
            None => out.push_str(&format!("    {}\n", line.tooltip)),
        }
    }
    out.push_str(&format!("  {}\n", "-".repeat(WIDTH)));
    out.push_str(&format!("  {}\n", amount_line("Total", fare.total(), WIDTH)));
    out
}
