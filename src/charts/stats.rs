// src/charts/stats.rs
//
// Pure aggregations behind the charts. Nothing here draws; every function
// takes the loaded rows and returns plain numbers in plotting order.
//
// Sorting is stable everywhere: ties keep the order rows appear in the CSV.

use std::collections::HashMap;

use crate::config::consts::UNCATEGORIZED;
use crate::data::{CompanyRecord, Platform};

/// Numeric value of a cell. Empty or unparsable cells are `None`.
pub fn num(cell: &str) -> Option<f64> {
    let t = cell.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Category used for grouping; rows without one go to "Digər".
pub fn category_of(rec: &CompanyRecord) -> &str {
    if rec.category.is_empty() { UNCATEGORIZED } else { &rec.category }
}

/// Round to `places` decimals, ties to even: 3.125 → 3.12, 2.675 → 2.67
/// (the latter is stored just below the tie).
pub fn round_to(v: f64, places: i32) -> f64 {
    let k = 10f64.powi(places);
    (v * k).round_ties_even() / k
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.into_iter().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Group rows by category, keeping first-seen category order.
fn group_by_category(records: &[CompanyRecord]) -> Vec<(&str, Vec<&CompanyRecord>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&CompanyRecord>)> = Vec::new();
    for rec in records {
        let cat = category_of(rec);
        let slot = *index.entry(cat).or_insert_with(|| {
            groups.push((cat, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(rec);
    }
    groups
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    /// Mean over rows with a rating, 2 decimals.
    pub avg_rating: f64,
    /// Sum of review counts, missing counted as 0.
    pub total_reviews: u64,
    /// Means over rows with a value, 1 decimal; 0 when no row has one.
    pub avg_loyalty: f64,
    pub avg_response: f64,
    pub avg_resolved: f64,
}

/// Per-category aggregate for categories with at least `min_companies` rows
/// and at least one rating, in first-seen order.
pub fn summarize(records: &[CompanyRecord], min_companies: usize) -> Vec<CategorySummary> {
    group_by_category(records)
        .into_iter()
        .filter(|(_, rows)| rows.len() >= min_companies)
        .filter_map(|(category, rows)| {
            let avg_rating = mean(rows.iter().filter_map(|r| num(&r.overall_rating)))?;
            let rate = |pick: fn(&CompanyRecord) -> &str| {
                mean(rows.iter().filter_map(|r| num(pick(r))))
                    .map(|m| round_to(m, 1))
                    .unwrap_or(0.0)
            };
            let total: f64 = rows.iter().filter_map(|r| num(&r.total_reviews)).sum();

            Some(CategorySummary {
                category: s!(category),
                count: rows.len(),
                avg_rating: round_to(avg_rating, 2),
                total_reviews: total.max(0.0) as u64,
                avg_loyalty: rate(|r| r.customer_loyalty_pct.as_str()),
                avg_response: rate(|r| r.response_rate_pct.as_str()),
                avg_resolved: rate(|r| r.resolved_complaints_pct.as_str()),
            })
        })
        .collect()
}

/// Companies per category, largest first.
pub fn category_counts(records: &[CompanyRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = group_by_category(records)
        .into_iter()
        .map(|(c, rows)| (s!(c), rows.len()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub const RATING_BUCKETS: [&str; 6] = ["No Rating", "0–1", "1–2", "2–3", "3–4", "4–5"];

/// Companies per rating bucket, in `RATING_BUCKETS` order. Upper bounds are
/// inclusive: 1.0 lands in "0–1", 4.0 in "3–4".
pub fn rating_buckets(records: &[CompanyRecord]) -> [usize; 6] {
    let mut out = [0usize; 6];
    for rec in records {
        let idx = match num(&rec.overall_rating) {
            None => 0,
            Some(v) if v <= 1.0 => 1,
            Some(v) if v <= 2.0 => 2,
            Some(v) if v <= 3.0 => 3,
            Some(v) if v <= 4.0 => 4,
            Some(_) => 5,
        };
        out[idx] += 1;
    }
    out
}

#[derive(Clone, Debug, PartialEq)]
pub struct RatedCompany {
    pub name: String,
    pub rating: Option<f64>,
    pub reviews: f64,
}

fn reviews_at_least(rec: &CompanyRecord, min_reviews: f64) -> Option<f64> {
    num(&rec.total_reviews).filter(|&r| r != 0.0 && r >= min_reviews)
}

/// Companies with at least `min_reviews` reviews, most reviewed first.
pub fn most_reviewed(records: &[CompanyRecord], min_reviews: f64, top: usize) -> Vec<RatedCompany> {
    let mut rows: Vec<RatedCompany> = records
        .iter()
        .filter_map(|r| {
            Some(RatedCompany {
                name: r.name.clone(),
                rating: num(&r.overall_rating),
                reviews: reviews_at_least(r, min_reviews)?,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.reviews.total_cmp(&a.reviews));
    rows.truncate(top);
    rows
}

/// Highest and lowest rated companies among those with a non-zero rating and
/// at least `min_reviews` reviews. Returns `(best, worst)`, `n` each.
pub fn best_and_worst(
    records: &[CompanyRecord],
    min_reviews: f64,
    n: usize,
) -> (Vec<RatedCompany>, Vec<RatedCompany>) {
    let rated: Vec<RatedCompany> = records
        .iter()
        .filter_map(|r| {
            let rating = num(&r.overall_rating).filter(|&v| v != 0.0)?;
            Some(RatedCompany {
                name: r.name.clone(),
                rating: Some(rating),
                reviews: reviews_at_least(r, min_reviews)?,
            })
        })
        .collect();

    let key = |c: &RatedCompany| c.rating.unwrap_or_default();
    let mut best = rated.clone();
    best.sort_by(|a, b| key(b).total_cmp(&key(a)));
    best.truncate(n);

    let mut worst = rated;
    worst.sort_by(|a, b| key(a).total_cmp(&key(b)));
    worst.truncate(n);

    (best, worst)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SocialShare {
    pub category: String,
    /// Percent of the category's companies with a profile link.
    pub facebook: f64,
    pub instagram: f64,
    pub linkedin: f64,
}

/// True when the row links to its own profile on `p`, not the site's.
pub fn has_profile(rec: &CompanyRecord, p: Platform) -> bool {
    let link = rec.social(p);
    !link.is_empty() && !link.contains(crate::config::consts::SITE_MARKER)
}

/// Social link coverage for the `top` largest categories.
pub fn social_presence(records: &[CompanyRecord], top: usize) -> Vec<SocialShare> {
    let mut groups = group_by_category(records);
    groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    groups.truncate(top);

    groups
        .into_iter()
        .map(|(category, rows)| {
            let share = |p: Platform| {
                let with = rows.iter().filter(|r| has_profile(r, p)).count();
                100.0 * with as f64 / rows.len() as f64
            };
            SocialShare {
                category: s!(category),
                facebook: share(Platform::Facebook),
                instagram: share(Platform::Instagram),
                linkedin: share(Platform::Linkedin),
            }
        })
        .collect()
}

/// Mean star-tier percentages for each listed category, `[5★, 4★, 3★, 2★, 1★]`,
/// 1 decimal; a tier no row reports is 0. Categories match exactly.
pub fn star_mix(records: &[CompanyRecord], categories: &[String]) -> Vec<(String, [f64; 5])> {
    categories
        .iter()
        .map(|cat| {
            let rows: Vec<&CompanyRecord> = records.iter().filter(|r| &r.category == cat).collect();
            let mut tiers = [0.0; 5];
            for (slot, star) in tiers.iter_mut().zip((1..=5u8).rev()) {
                *slot = mean(rows.iter().filter_map(|r| num(r.star(star))))
                    .map(|m| round_to(m, 1))
                    .unwrap_or(0.0);
            }
            (cat.clone(), tiers)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, rating: &str, reviews: &str) -> CompanyRecord {
        CompanyRecord {
            name: format!("{category}-{rating}-{reviews}"),
            category: s!(category),
            overall_rating: s!(rating),
            total_reviews: s!(reviews),
            ..Default::default()
        }
    }

    #[test]
    fn num_parses_or_gives_none() {
        assert_eq!(num(" 3.5 "), Some(3.5));
        assert_eq!(num("-12.5"), Some(-12.5));
        assert_eq!(num(""), None);
        assert_eq!(num("n/a"), None);
    }

    #[test]
    fn round_ties_to_even() {
        assert_eq!(round_to(3.125, 2), 3.12);
        assert_eq!(round_to(3.375, 2), 3.38);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(-2.25, 1), -2.2);
        assert_eq!(round_to(4.0, 1), 4.0);
    }

    #[test]
    fn summary_applies_minimum_company_count() {
        let mut rows: Vec<CompanyRecord> = ["4", "3", "5", "2", "4", "3"]
            .iter()
            .map(|r| row("A", r, "10"))
            .collect();
        rows.extend(["5", "5", "5"].iter().map(|r| row("B", r, "1")));

        let summary = summarize(&rows, 5);
        assert_eq!(summary.len(), 1);
        let a = &summary[0];
        assert_eq!(a.category, "A");
        assert_eq!(a.count, 6);
        assert_eq!(a.avg_rating, 3.5);
        assert_eq!(a.total_reviews, 60);
    }

    #[test]
    fn exactly_min_companies_qualifies() {
        let rows: Vec<CompanyRecord> = (0..5).map(|_| row("A", "4", "")).collect();
        assert_eq!(summarize(&rows, 5).len(), 1);
        assert_eq!(summarize(&rows[..4], 5).len(), 0);
    }

    #[test]
    fn summary_needs_at_least_one_rating() {
        let rows: Vec<CompanyRecord> = (0..6).map(|_| row("A", "", "5")).collect();
        assert!(summarize(&rows, 5).is_empty());
    }

    #[test]
    fn summary_rates_average_present_values_only() {
        let mut rows: Vec<CompanyRecord> = (0..5).map(|_| row("", "3", "")).collect();
        rows[0].response_rate_pct = s!("90");
        rows[1].response_rate_pct = s!("85");
        rows[2].customer_loyalty_pct = s!("-12.5");

        let s = &summarize(&rows, 5)[0];
        assert_eq!(s.category, UNCATEGORIZED);
        assert_eq!(s.avg_response, 87.5);
        assert_eq!(s.avg_loyalty, -12.5);
        assert_eq!(s.avg_resolved, 0.0);
        assert_eq!(s.total_reviews, 0);
    }

    #[test]
    fn counts_are_sorted_and_stable() {
        let rows = vec![row("B", "", ""), row("A", "", ""), row("A", "", ""), row("C", "", "")];
        let counts = category_counts(&rows);
        assert_eq!(counts, vec![(s!("A"), 2), (s!("B"), 1), (s!("C"), 1)]);
    }

    #[test]
    fn bucket_upper_bounds_are_inclusive() {
        let rows: Vec<CompanyRecord> = ["", "0.5", "1", "1.5", "2", "3", "3.9", "4", "4.1", "5"]
            .iter()
            .map(|r| row("A", r, ""))
            .collect();
        assert_eq!(rating_buckets(&rows), [1, 2, 2, 1, 2, 2]);
    }

    #[test]
    fn ten_reviews_is_enough() {
        let rows = vec![row("A", "4", "9"), row("A", "4", "10"), row("A", "", "250"), row("A", "3", "")];
        let top = most_reviewed(&rows, 10.0, 15);
        let reviews: Vec<f64> = top.iter().map(|c| c.reviews).collect();
        assert_eq!(reviews, [250.0, 10.0]);
        assert_eq!(top[0].rating, None);
    }

    #[test]
    fn best_and_worst_skip_zero_ratings() {
        let rows = vec![
            row("A", "4.8", "40"),
            row("A", "0", "500"),
            row("A", "1.2", "12"),
            row("A", "3.0", "10"),
            row("A", "5.0", "3"),
        ];
        let (best, worst) = best_and_worst(&rows, 10.0, 2);
        let best: Vec<Option<f64>> = best.iter().map(|c| c.rating).collect();
        let worst: Vec<Option<f64>> = worst.iter().map(|c| c.rating).collect();
        assert_eq!(best, [Some(4.8), Some(3.0)]);
        assert_eq!(worst, [Some(1.2), Some(3.0)]);
    }

    #[test]
    fn site_links_do_not_count_as_presence() {
        let mut a = row("A", "", "");
        a.facebook = s!("https://www.facebook.com/bildir.az");
        a.instagram = s!("https://instagram.com/kapitalbank");
        let b = row("A", "", "");

        let shares = social_presence(&[a, b], 12);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].facebook, 0.0);
        assert_eq!(shares[0].instagram, 50.0);
        assert_eq!(shares[0].linkedin, 0.0);
    }

    #[test]
    fn star_mix_orders_tiers_from_five_down() {
        let mut a = row("Banklar", "", "");
        a.star5_pct = s!("20");
        a.star1_pct = s!("60");
        let mut b = row("Banklar", "", "");
        b.star5_pct = s!("30");
        let other = row("Maliyyə", "", "");

        let mix = star_mix(&[a, b, other], &[s!("Banklar"), s!("Maliyyə")]);
        assert_eq!(mix[0], (s!("Banklar"), [25.0, 0.0, 0.0, 0.0, 60.0]));
        assert_eq!(mix[1], (s!("Maliyyə"), [0.0; 5]));
    }
}
