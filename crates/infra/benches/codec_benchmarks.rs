use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::collections::HashMap;
use std::sync::Arc;

use billing_core::{ExpectedVersion, WireTimestamp, i18n};
use billing_infra::repositories::ProductRepository;
use billing_infra::store::InMemoryDocumentStore;
use billing_paylinks::Paylink;
use billing_products::{Product, ProductDocument, ProductPrice};
use chrono::Utc;

fn product(prices: usize) -> Product {
    let currencies = ["USD", "EUR", "RUB", "GBP", "JPY", "CNY", "BRL", "INR"];
    Product {
        object: billing_products::product::PRODUCT_OBJECT.to_string(),
        product_type: "simple_product".to_string(),
        sku: "bench_sku".to_string(),
        name: HashMap::from([
            ("en".to_string(), "Bench product".to_string()),
            ("ru".to_string(), "Тестовый продукт".to_string()),
        ]),
        default_currency: "USD".to_string(),
        enabled: true,
        prices: (0..prices)
            .map(|i| ProductPrice {
                currency: currencies[i % currencies.len()].to_string(),
                region: format!("region-{i}"),
                amount: 10.0 + i as f64 * 0.333,
            })
            .collect(),
        created_at: Some(WireTimestamp::new(1_560_000_000, 0)),
        updated_at: Some(WireTimestamp::new(1_560_000_500, 0)),
        merchant_id: "5be2e16701d96d00012d26c3".to_string(),
        project_id: "5be2e16701d96d00012d26c4".to_string(),
        ..Product::default()
    }
}

fn bench_product_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("product_codec");

    for prices in [1usize, 8, 64] {
        let p = product(prices);
        let doc = billing_products::to_storage(&p).unwrap();
        let raw = doc.to_bson().unwrap();

        group.throughput(Throughput::Elements(prices as u64));
        group.bench_with_input(BenchmarkId::new("to_storage", prices), &p, |b, p| {
            b.iter(|| black_box(billing_products::to_storage(p).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("from_storage", prices), &doc, |b, doc| {
            b.iter(|| black_box(billing_products::from_storage(doc).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("decode_raw", prices), &raw, |b, raw| {
            b.iter(|| {
                let doc = ProductDocument::from_bson(raw.clone()).unwrap();
                black_box(billing_products::from_storage(&doc).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_paylink_decode(c: &mut Criterion) {
    let now = Utc::now();
    let paylink = Paylink {
        object: billing_paylinks::paylink::PAYLINK_OBJECT.to_string(),
        products: (0..16).map(|i| format!("5be2e16701d96d00012d27{i:02x}")).collect(),
        expires_at: Some(WireTimestamp::new(now.timestamp() - 60, 0)),
        merchant_id: "5be2e16701d96d00012d26c3".to_string(),
        project_id: "5be2e16701d96d00012d26c4".to_string(),
        name: "bench".to_string(),
        ..Paylink::default()
    };
    let doc = billing_paylinks::to_storage(&paylink).unwrap();

    c.bench_function("paylink_from_storage_with_expiry", |b| {
        b.iter(|| black_box(billing_paylinks::from_storage(&doc, now).unwrap()))
    });
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("localized_text");

    for langs in [2usize, 16, 128] {
        let text: HashMap<String, String> = (0..langs)
            .map(|i| (format!("l{i}"), format!("value {i}")))
            .collect();
        let flat = i18n::flatten(&text);

        group.throughput(Throughput::Elements(langs as u64));
        group.bench_with_input(BenchmarkId::new("flatten", langs), &text, |b, text| {
            b.iter(|| black_box(i18n::flatten(text)))
        });
        group.bench_with_input(BenchmarkId::new("unflatten", langs), &flat, |b, flat| {
            b.iter(|| black_box(i18n::unflatten(flat)))
        });
    }

    group.finish();
}

fn bench_repository_write(c: &mut Criterion) {
    let repo = ProductRepository::new(Arc::new(InMemoryDocumentStore::new()));
    let p = product(8);

    c.bench_function("product_repository_insert", |b| {
        b.iter(|| black_box(repo.save(&p, ExpectedVersion::Absent).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_product_codec,
    bench_paylink_decode,
    bench_flatten,
    bench_repository_write
);
criterion_main!(benches);
