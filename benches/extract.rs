// benches/extract.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scraper::Html;

use bildir_scrape::core::Page;
use bildir_scrape::specs::{company, listing};

const LISTING: &str = include_str!("../tests/fixtures/listing.html");
const COMPANY: &str = include_str!("../tests/fixtures/company.html");

fn bench_extract(c: &mut Criterion) {
    c.bench_function("listing_parse", |b| {
        b.iter(|| {
            let doc = Html::parse_document(black_box(LISTING));
            black_box((listing::total_pages(&doc), listing::parse_listing(&doc).len()))
        })
    });

    c.bench_function("company_parse", |b| {
        b.iter(|| {
            let page = Page::parse(black_box(COMPANY));
            black_box(company::parse_company(&page, "kapital-bank", "https://www.bildir.az/kapital-bank/"))
        })
    });

    // Extraction alone, document already parsed.
    let page = Page::parse(COMPANY);
    c.bench_function("company_extract_only", |b| {
        b.iter(|| black_box(company::parse_company(black_box(&page), "kapital-bank", "u")))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
