use chuvas::{Chuvas, ChuvasConfig, ChuvasError};
use serde_json::to_string_pretty;

#[tokio::main]
async fn main() -> Result<(), ChuvasError> {
    // Expects ./data/Chuvas/*.csv and ./data/MortalidadeBrasil/*.csv
    let data_dir = std::env::args().nth(1).unwrap_or_else(|| "./data".to_string());
    let client = Chuvas::from_data_dir(&data_dir, ChuvasConfig::default()).await?;

    for warning in client.warnings().await {
        println!("warning: {}", warning);
    }

    let report = client
        .report()
        .date("2022-05-28")
        .city("Recife")
        .top_n(5)
        .call()
        .await?;
    println!("{}", to_string_pretty(&report).unwrap());

    let ranking = client
        .query_by_month_city()
        .month_year("05/2022")
        .city("Recife")
        .call()
        .await?;
    for entry in &ranking {
        let marker = if entry.selected { "*" } else { " " };
        println!(
            "{}{:>3}. {:<40} {:>8.1} mm",
            marker, entry.rank, entry.station, entry.accumulated_mm
        );
    }

    let markers = client.map_markers().date("2022-05-28").call().await?;
    println!("{}", to_string_pretty(&markers).unwrap());
    Ok(())
}
