use serde_json::json;
use weatherstat::{celsius_to_kelvin, Dataset, WeatherAnalyzer, WeatherStatError};

fn main() -> Result<(), WeatherStatError> {
    env_logger::init();

    let batch = json!([
        {"city": "Lviv", "temp": 15, "humidity": 70, "pressure": 1010},
        {"city": "Lviv", "temp": null, "humidity": 60, "pressure": 1010},
        {"city": "Lviv", "temp": 10, "humidity": -5, "pressure": 1015},
        {"city": "Lviv", "temp": 500, "humidity": 50, "pressure": "N/A"},
        {"city": "Lviv", "temp": 12.4, "humidity": 81, "pressure": 1008.5},
    ]);

    let analyzer = WeatherAnalyzer::new();
    let dataset = Dataset::from_json(&batch)?;
    let report = analyzer.clean(&dataset)?;
    for (reason, count) in &report.rejections {
        println!("dropped {} row(s): {}", count, reason);
    }

    let summary = analyzer.summarize(&report.cleaned)?;
    println!("{}", serde_json::to_string_pretty(&summary).unwrap_or_default());
    println!(
        "mean temperature: {:.2} K",
        celsius_to_kelvin(summary.temp.mean)
    );

    analyzer.export(&summary, "lviv_summary.json")?;
    Ok(())
}
