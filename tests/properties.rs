use frictionwatch::analysis::classify;
use frictionwatch::models::PainCategory;
use frictionwatch::report::Redactor;
use proptest::prelude::*;

const BRANDS: [&str; 4] = ["twilio", "messagebird", "plivo", "sendgrid"];

const PRICING: [&str; 2] = ["cost", "price"];
const RELIABILITY: [&str; 3] = ["fail", "error", "exception"];
const PERFORMANCE: [&str; 2] = ["slow", "timeout"];

fn mangle_case(word: &str, mask: &[bool]) -> String {
    word.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
        .collect()
}

fn brands() -> Vec<String> {
    BRANDS.iter().map(|b| b.to_string()).collect()
}

// ── Redaction: no brand survives in any case variant ─────────────────────

proptest! {
    #[test]
    fn redacted_text_never_contains_a_brand(
        brand_idx in 0..BRANDS.len(),
        mask in prop::collection::vec(any::<bool>(), 1..12),
        prefix in "[a-zA-Z0-9 @/._-]{0,20}",
        suffix in "[a-zA-Z0-9 @/._-]{0,20}",
    ) {
        let brand = mangle_case(BRANDS[brand_idx], &mask);
        let input = format!("{prefix}{brand}{suffix}");
        let redactor = Redactor::new(&brands(), "[Provider]").unwrap();

        let output = redactor.redact(&input);
        let lowered = output.to_lowercase();
        for raw in BRANDS {
            prop_assert!(!lowered.contains(raw), "{} survived in {}", raw, output);
        }
        prop_assert!(output.contains("[Provider]"));
    }

    #[test]
    fn redaction_is_idempotent(text in "\\PC{0,40}") {
        let redactor = Redactor::new(&brands(), "[Provider]").unwrap();
        let once = redactor.redact(&text);
        prop_assert_eq!(redactor.redact(&once), once);
    }
}

// ── Classification: total, and first matching rule wins ──────────────────

proptest! {
    #[test]
    fn classify_is_total_and_deterministic(text in "\\PC{0,60}") {
        let category = classify(&text);
        prop_assert!(PainCategory::ALL.contains(&category));
        prop_assert_eq!(classify(&text), category);
    }

    #[test]
    fn classify_follows_rule_priority(
        pricing in prop::option::of(0..PRICING.len()),
        reliability in prop::option::of(0..RELIABILITY.len()),
        performance in prop::option::of(0..PERFORMANCE.len()),
        mask in prop::collection::vec(any::<bool>(), 1..9),
        filler in prop::collection::vec("[xyz]{0,5}", 4),
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
    ) {
        let picked = [
            pricing.map(|i| PRICING[i]),
            reliability.map(|i| RELIABILITY[i]),
            performance.map(|i| PERFORMANCE[i]),
        ];

        let mut words = vec![filler[0].clone()];
        for (slot, idx) in order.iter().enumerate() {
            if let Some(keyword) = picked[*idx] {
                words.push(mangle_case(keyword, &mask));
            }
            words.push(filler[slot + 1].clone());
        }
        let text = words.join(" ");

        let expected = if pricing.is_some() {
            PainCategory::Pricing
        } else if reliability.is_some() {
            PainCategory::Reliability
        } else if performance.is_some() {
            PainCategory::Performance
        } else {
            PainCategory::Implementation
        };
        prop_assert_eq!(classify(&text), expected, "text: {}", text);
    }
}
