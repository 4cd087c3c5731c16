use super::WeatherCategory;

/// Maps an OpenWeatherMap condition id to a coarse category. Unknown ids are sunny.
#[must_use]
pub fn category_for_code(code: u16) -> WeatherCategory {
    match code {
        200..=202 | 210..=212 | 221 | 230..=232 => WeatherCategory::Storm,
        300..=302 | 310..=314 | 321 => WeatherCategory::Rain,
        500..=504 | 511 | 520..=522 | 531 => WeatherCategory::Rain,
        600..=602 | 611..=613 | 615 | 616 | 620..=622 => WeatherCategory::Snow,
        701 | 711 | 721 | 731 | 741 | 751 | 761 | 762 | 771 | 781 => WeatherCategory::Fog,
        801..=804 => WeatherCategory::Cloudy,
        _ => WeatherCategory::Sunny,
    }
}

/// Representative condition id for a category, used to fabricate manual observations.
#[must_use]
pub fn code_for_category(category: WeatherCategory) -> u16 {
    match category {
        WeatherCategory::Sunny => 800,
        WeatherCategory::Cloudy => 803,
        WeatherCategory::Rain => 500,
        WeatherCategory::Storm => 211,
        WeatherCategory::Snow => 600,
        WeatherCategory::Fog => 741,
    }
}
