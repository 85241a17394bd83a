// Criterion benchmarks for Freight Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use freight_match::core::{rank_matches, Matcher, RouteResolver, MAX_MATCHES, MIN_MATCH_SCORE};
use freight_match::models::{CargoCategory, RoutePair, Shipment, Transporter};
use chrono::{Duration, TimeZone, Utc};

const CITIES: &[&str] = &[
    "Lilongwe", "Blantyre", "Mzuzu", "Zomba", "Kasungu", "Mangochi", "Salima", "Dedza",
    "Karonga", "Liwonde", "Balaka", "Mulanje", "Nkhotakota", "Ntcheu",
];

fn create_shipment() -> Shipment {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    Shipment {
        id: "bench-load".to_string(),
        origin: "Lilongwe".to_string(),
        destination: "Blantyre".to_string(),
        weight_kg: 8_500.0,
        cargo_category: CargoCategory::Maize,
        price: 420_000,
        pickup_date: now + Duration::days(3),
        created_at: now,
    }
}

fn create_candidate(id: usize) -> Transporter {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    Transporter {
        id: id.to_string(),
        name: format!("Fleet {}", id),
        verified: id % 3 == 0,
        rating_average: (id % 50) as f64 / 10.0,
        rating_count: (id % 12) as u32,
        vehicle_capacity_kg: 5_000.0 + (id % 8) as f64 * 1_500.0,
        vehicle_plate: format!("MW {}", id),
        route_experience: vec![],
        return_route_history: if id % 7 == 0 {
            vec![RoutePair::new("Blantyre", "Lilongwe")]
        } else {
            vec![]
        },
        current_location: CITIES[id % CITIES.len()].to_string(),
        available_from: now + Duration::days((id % 5) as i64),
        online: true,
    }
}

fn bench_distance_lookup(c: &mut Criterion) {
    let resolver = RouteResolver::default();
    c.bench_function("distance_lookup", |b| {
        b.iter(|| resolver.distance_km(black_box("Mzuzu"), black_box("Karonga")));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let shipment = create_shipment();
    let now = shipment.created_at;

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Transporter> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("compute_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.compute_matches(
                        black_box(&shipment),
                        black_box(&candidates),
                        black_box(MAX_MATCHES),
                        now,
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let shipment = create_shipment();
    let candidates: Vec<Transporter> = (0..500).map(create_candidate).collect();
    let (adjustment, price) = matcher
        .seasonal_price(&shipment, shipment.created_at)
        .unwrap();

    let scored: Vec<_> = candidates
        .iter()
        .filter_map(|t| {
            matcher
                .score_candidate(&shipment, t, adjustment, price, shipment.created_at)
                .ok()
        })
        .collect();

    c.bench_function("rank_500_matches", |b| {
        b.iter(|| rank_matches(black_box(scored.clone()), MIN_MATCH_SCORE, MAX_MATCHES));
    });
}

criterion_group!(benches, bench_distance_lookup, bench_matching, bench_ranking);

criterion_main!(benches);
