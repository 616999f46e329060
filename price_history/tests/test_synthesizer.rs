use chrono::NaiveDate;
use price_history::{
    aggregate, analyze, Category, Confidence, Direction, PriceSource, ProductProfile,
    SeasonalSynthesizer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 29).unwrap()
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(7)]
#[case(30)]
#[case(90)]
#[case(365)]
fn test_series_length_and_dates(#[case] window_days: u32) {
    let mut rng = StdRng::seed_from_u64(2024);
    let series = SeasonalSynthesizer::new()
        .price_series("Corsair K70 keyboard", window_days, today(), &mut rng)
        .unwrap();

    assert_eq!(series.len(), window_days as usize + 1);
    assert_eq!(series.period_end(), today());
    assert!(series
        .observations()
        .windows(2)
        .all(|w| w[1].date == w[0].date.succ_opt().unwrap()));
}

#[test]
fn test_same_seed_same_series() {
    let synthesizer = SeasonalSynthesizer::new();

    let mut first_rng = StdRng::seed_from_u64(17);
    let mut second_rng = StdRng::seed_from_u64(17);
    let first = synthesizer
        .price_series("Bose headphones", 60, today(), &mut first_rng)
        .unwrap();
    let second = synthesizer
        .price_series("Bose headphones", 60, today(), &mut second_rng)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_different_seeds_differ() {
    let synthesizer = SeasonalSynthesizer::new();

    let mut first_rng = StdRng::seed_from_u64(1);
    let mut second_rng = StdRng::seed_from_u64(2);
    let first = synthesizer
        .price_series("Bose headphones", 60, today(), &mut first_rng)
        .unwrap();
    let second = synthesizer
        .price_series("Bose headphones", 60, today(), &mut second_rng)
        .unwrap();

    assert_ne!(first.prices(), second.prices());
}

#[test]
fn test_sony_headphones_scenario() {
    let name = "Sony WH-1000XM4 headphones";
    let profile = ProductProfile::classify(name);
    assert_eq!(profile.category, Category::Headphones);
    assert!(profile.is_premium);
    assert_eq!(profile.base_price(), 299.0);

    let mut rng = StdRng::seed_from_u64(42);
    let series = SeasonalSynthesizer::new()
        .price_series(name, 90, today(), &mut rng)
        .unwrap();

    assert_eq!(series.len(), 91);
    assert_eq!(series.current_price(), series.observations()[90].price);

    // Every price is a cent-rounded positive amount near the premium base price
    for price in series.prices() {
        assert!(price > 100.0 && price < 400.0);
        assert_eq!((price * 100.0).round() / 100.0, price);
    }
}

#[test]
fn test_min_max_bound_every_price() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let series = SeasonalSynthesizer::new()
            .price_series("Shure microphone", 90, today(), &mut rng)
            .unwrap();
        let stats = aggregate(series.observations()).unwrap();

        for price in series.prices() {
            assert!(stats.min <= price && price <= stats.max);
        }
        assert!(stats.volatility_pct > 0.0);
    }
}

#[test]
fn test_zero_window_scenario() {
    let mut rng = StdRng::seed_from_u64(42);
    let series = SeasonalSynthesizer::new()
        .price_series("Sony WH-1000XM4 headphones", 0, today(), &mut rng)
        .unwrap();
    assert_eq!(series.len(), 1);

    let stats = aggregate(series.observations()).unwrap();
    assert_eq!(stats.volatility_pct, 0.0);

    let trend = analyze(series.observations());
    assert_eq!(trend.direction, Direction::Stable);
    assert_eq!(trend.recent_direction, Direction::Stable);
    assert_eq!(trend.forecast.next_week, series.current_price());
    assert_eq!(trend.forecast.next_month, series.current_price());
    assert_eq!(trend.forecast.confidence, Confidence::Low);
}

#[test]
fn test_custom_stores_and_currency() {
    let mut rng = StdRng::seed_from_u64(8);
    let series = SeasonalSynthesizer::new()
        .with_currency("EUR")
        .with_stores(["Otto", "MediaMarkt"])
        .price_series("gaming mouse", 20, today(), &mut rng)
        .unwrap();

    for obs in series.observations() {
        assert_eq!(obs.currency, "EUR");
        assert!(obs.store == "Otto" || obs.store == "MediaMarkt");
    }
}
