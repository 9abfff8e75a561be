use std::env;
use std::path::PathBuf;
use weatherstat::{OpenWeatherFetcher, WeatherAnalyzer, WeatherPipeline, WeatherStatError};

fn main() -> Result<(), WeatherStatError> {
    env_logger::init();

    let api_key = env::var("OPENWEATHER_API_KEY").unwrap_or_default();
    let city = env::args().nth(1).unwrap_or_else(|| "Kyiv".to_string());
    let output = PathBuf::from(format!("{}_summary.json", city.to_lowercase()));

    let fetcher = OpenWeatherFetcher::builder().api_key(api_key).build()?;
    let analyzer = WeatherAnalyzer::builder().round_to(2).build();
    let pipeline = WeatherPipeline::new(fetcher, analyzer);

    let report = pipeline
        .run()
        .location(city.as_str())
        .output(output)
        .samples(3)
        .call()?;

    println!("{:#?}", report.summary);
    println!("Saved to {}", report.output.display());

    Ok(())
}
