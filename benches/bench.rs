// Criterion benchmarks for the roommate matching pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use roommate_match::core::{filter_candidates, rank_survivors, tokenize, Matcher};
use roommate_match::models::{MatchingRules, Profile, ProfileRecord};

const ROUTINES: [&str; 5] = [
    "early riser, gym before class, quiet evenings with a book",
    "night owl who games late and sleeps in on weekends",
    "cooks dinner most nights and hosts friends for board games",
    "studies in the library, runs in the park, tidy kitchen",
    "works remotely, loves plants, coffee and jazz records",
];

fn create_candidate(id: usize) -> Profile {
    let record = ProfileRecord {
        email: format!("user{}@example.com", id),
        name: format!("User {}", id),
        yourgender: Some(if id % 2 == 0 { "Female" } else { "Male" }.to_string()),
        gender: Some("Any".to_string()),
        wake_up_time: Some(format!("{:02}:{:02}", 6 + id % 4, (id * 7) % 60)),
        bed_time: Some(format!("{:02}:30", 22 + id % 2)),
        neatness_preference: Some(if id % 5 == 0 { "Messy" } else { "Neat" }.to_string()),
        overnight_guests: Some("Sometimes".to_string()),
        move_in_date: Some(format!("2024-09-{:02}", 1 + id % 28)),
        city: Some("Boston".to_string()),
        daily_routine: Some(ROUTINES[id % ROUTINES.len()].to_string()),
        priorities: Some(ROUTINES[(id + 2) % ROUTINES.len()].to_string()),
        ..Default::default()
    };
    Profile::try_from(record).expect("valid benchmark profile")
}

fn create_requester() -> Profile {
    let mut requester = create_candidate(0);
    requester.email = "requester@example.com".to_string();
    requester
}

fn bench_tokenize(c: &mut Criterion) {
    let text = ROUTINES.join(" ");
    c.bench_function("tokenize", |b| {
        b.iter(|| tokenize(black_box(&text)));
    });
}

fn bench_filtering(c: &mut Criterion) {
    let requester = create_requester();
    let rules = MatchingRules::default();
    let candidates: Vec<Profile> = (1..=100).map(create_candidate).collect();

    c.bench_function("filter_candidates_100", |b| {
        b.iter(|| filter_candidates(black_box(&requester), black_box(candidates.clone()), &rules));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let requester = create_requester();
    let mut group = c.benchmark_group("ranking");

    for survivor_count in [10, 100, 500].iter() {
        let survivors: Vec<Profile> = (1..=*survivor_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_survivors", survivor_count),
            survivor_count,
            |b, _| {
                b.iter(|| rank_survivors(black_box(&requester), black_box(survivors.clone())));
            },
        );
    }

    group.finish();
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::default();
    let requester = create_requester();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Profile> = (1..=*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("find_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| matcher.find_matches(black_box(&requester), black_box(candidates.clone())));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_filtering,
    bench_ranking,
    bench_matching
);

criterion_main!(benches);
