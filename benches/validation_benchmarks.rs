use criterion::{Criterion, criterion_group, criterion_main};
use fieldguard::fieldguard_validation::MessageResolver;
use fieldguard::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::hint::black_box;

fn signup_validator() -> Validator {
    Validator::new(
        ConstraintSet::new()
            .field(
                FieldRules::for_field("login")
                    .required()
                    .length(3, Some(16))
                    .pattern("text"),
            )
            .field(FieldRules::for_field("email").required().pattern("email"))
            .field(
                FieldRules::for_field("password")
                    .required()
                    .pattern("password_strong"),
            )
            .field(FieldRules::for_field("role").one_of(["reader", "author", "editor"]))
            .field(FieldRules::for_field("avatar").ext(["jpg", "png", "gif"])),
    )
}

fn form(value: Value) -> HashMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

fn bench_pattern_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_matching");
    let registry = PatternRegistry::default();

    let emails = vec![
        "user@example.com",
        "test.user-tag@domain.co.uk",
        "invalid-email",
    ];

    group.bench_function("email", |b| {
        b.iter(|| {
            for email in &emails {
                let _ = registry.matches("email", black_box(email));
            }
        })
    });

    group.bench_function("password_strong", |b| {
        b.iter(|| registry.matches("password_strong", black_box("Secr3t!pass")))
    });

    group.bench_function("text_accented", |b| {
        b.iter(|| registry.matches("text", black_box("Zażółć_gęślą_jaźń")))
    });

    group.finish();
}

fn bench_form_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("form_evaluation");
    let validator = signup_validator();

    let valid = form(json!({
        "login": "jonsnow",
        "email": "jon@winterfell.org",
        "password": "Winter1s!coming",
        "role": "author",
        "avatar": "me.png",
    }));
    let invalid = form(json!({
        "login": "j",
        "email": "not-an-email",
        "password": "weak",
        "role": "owner",
        "avatar": "me.bmp",
    }));
    let empty: HashMap<String, Value> = HashMap::new();

    group.bench_function("valid_signup", |b| {
        b.iter(|| validator.evaluate(black_box(&valid)))
    });

    group.bench_function("invalid_signup", |b| {
        b.iter(|| validator.evaluate(black_box(&invalid)))
    });

    group.bench_function("missing_fields", |b| {
        b.iter(|| validator.evaluate(black_box(&empty)))
    });

    group.finish();
}

fn bench_message_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_resolution");
    let catalog = MessageCatalog::default();
    let constraints =
        ConstraintSet::new().field(FieldRules::for_field("name").length(3, Some(10)));
    let resolver = MessageResolver::new(&catalog, &constraints);
    let constraint = Constraint::from_parts("length", Some(&json!([3, 10]))).unwrap();

    group.bench_function("length_template", |b| {
        b.iter(|| resolver.resolve(black_box("name"), &constraint))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_pattern_matching,
    bench_form_evaluation,
    bench_message_resolution
);
criterion_main!(benches);
