use anyhow::Result;

use placegrid_core::models::Coordinate;
use placegrid_places::PlacesClient;

use crate::cli::ProbeArgs;
use crate::output::OutputWriter;
use crate::progress::{create_spinner, finish_success};

/// One diagnostic query: confirms the API key, connectivity, and response
/// shape before a long scrape run.
pub async fn execute(args: ProbeArgs, output: &OutputWriter) -> Result<()> {
    let center = Coordinate::new(args.lat, args.lon)?;
    let client = PlacesClient::with_base_url(&args.api_key, 30, &args.base_url)?;

    let spinner = create_spinner("Probing places API...");
    match client.nearby_search(center, args.radius_m, &args.category).await {
        Ok(places) => {
            finish_success(&spinner, "probe succeeded");
            output.success(format!(
                "{} place(s) of type '{}' within {} m of {},{}",
                places.len(),
                args.category,
                args.radius_m,
                args.lat,
                args.lon
            ));
            for place in places.iter().take(5) {
                output.info(format!(
                    "{} ({})",
                    place.name,
                    place.business_status.as_deref().unwrap_or("UNKNOWN")
                ));
            }
            Ok(())
        }
        Err(e) => {
            spinner.abandon();
            output.error(format!("Probe failed: {e}"));
            Err(e.into())
        }
    }
}
