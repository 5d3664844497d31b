mod common;

use common::fixtures::*;
use common::{TestResult, generate_offer};
use offerpress::{InMemoryResourceProvider, OfferGenerator, OfferInput, PlaceholderKey};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn offer_input() -> OfferInput {
    serde_json::from_value(json!({
        "customer": { "salutation": "Herr", "first_name": "Max", "last_name": "Muster" },
        "project_details": { "module_quantity": 10, "selected_module_capacity_w": 400 },
        "analysis": { "annual_pv_production_kwh": 8250 }
    }))
    .unwrap()
}

#[test]
fn test_sample_texts_are_replaced_by_resolved_values() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let templates = TemplateDir::new();
    let source = [
        descriptor_entry("8,4 kWp", (400.0, 230.0, 460.0, 245.0), "Helvetica-Bold", 11.0, 0x1B3670),
        descriptor_entry("qwe qe", (37.5, 706.0, 157.5, 727.0), "Helvetica", 10.0, 0x000000),
        descriptor_entry("Unmapped label", (37.5, 740.0, 157.5, 752.0), "Helvetica", 10.0, 0x000000),
        page_token_entry(2),
    ]
    .concat();
    templates.descriptor(2, &source);

    let pdf = generate_offer(templates.path(), &offer_input(), None)?;
    assert_page_contains_text!(pdf, 2, "4,00 kWp");
    assert_page_contains_text!(pdf, 2, "Herr Max Muster");
    assert_page_contains_text!(pdf, 2, "Unmapped label");
    assert!(!pdf.page_text(2).contains("8,4 kWp"));
    Ok(())
}

#[test]
fn test_empty_values_leave_their_slot_blank() -> TestResult {
    let templates = TemplateDir::new();
    templates.descriptor(
        3,
        &descriptor_entry("8,4 kWp", (400.0, 230.0, 460.0, 245.0), "Helvetica", 11.0, 0x000000),
    );
    let pdf = generate_offer(templates.path(), &OfferInput::default(), None)?;
    assert!(!pdf.page_text(3).contains("8,4 kWp"));
    Ok(())
}

#[test]
fn test_missing_contact_details_print_nothing() -> TestResult {
    let templates = TemplateDir::new();
    let source = [
        descriptor_entry("qwe qe", (37.5, 706.0, 157.5, 727.0), "Helvetica", 10.0, 0x000000),
        descriptor_entry("Tel: 0155555555", (37.5, 690.0, 157.5, 702.0), "Helvetica", 10.0, 0x000000),
        descriptor_entry("oemertimur@gmail.com", (37.5, 676.0, 157.5, 688.0), "Helvetica", 10.0, 0x000000),
        descriptor_entry("TommaTech GmbH", (400.0, 706.0, 560.0, 727.0), "Helvetica", 10.0, 0x000000),
        descriptor_entry("mail@tommatech.de", (400.0, 690.0, 560.0, 702.0), "Helvetica", 10.0, 0x000000),
    ]
    .concat();
    templates.descriptor(2, &source);

    let input: OfferInput = serde_json::from_value(json!({
        "customer": { "first_name": "Anna", "last_name": "Beispiel" },
        "company": { "name": "Solar Nord GmbH" }
    }))?;
    let pdf = generate_offer(templates.path(), &input, None)?;
    assert_page_contains_text!(pdf, 2, "Anna Beispiel");
    assert_page_contains_text!(pdf, 2, "Solar Nord GmbH");
    let text = pdf.page_text(2);
    for sample in ["0155555555", "oemertimur@gmail.com", "TommaTech", "mail@tommatech.de"] {
        assert!(!text.contains(sample), "template sample '{}' leaked onto page 2", sample);
    }
    Ok(())
}

fn in_memory_generator() -> OfferGenerator {
    OfferGenerator::builder()
        .with_resource_provider(Arc::new(InMemoryResourceProvider::new()))
        .build()
        .unwrap()
}

#[test]
fn test_empty_input_resolves_every_key_but_the_footer_to_empty() {
    let values = in_memory_generator().resolve(&OfferInput::default());
    assert_eq!(values.len(), PlaceholderKey::ALL.len());
    assert_eq!(values.populated(), 1);
    assert_eq!(values.get(PlaceholderKey::FooterDate), "Angebot");
}

#[test]
fn test_headline_values() {
    let values = in_memory_generator().resolve(&offer_input());
    assert_eq!(values.get(PlaceholderKey::SystemSizeKwp), "4,00 kWp");
    assert_eq!(values.get(PlaceholderKey::AnnualProductionKwh), "8.250,00 kWh/Jahr");
}

proptest! {
    #[test]
    fn resolving_is_idempotent(
        modules in 0u32..60,
        watts in 0u32..700,
        production in 0.0f64..40_000.0,
        direct in 0.0f64..20_000.0,
        charge in 0.0f64..10_000.0,
    ) {
        let input: OfferInput = serde_json::from_value(json!({
            "project_details": { "module_quantity": modules, "selected_module_capacity_w": watts },
            "analysis": {
                "annual_pv_production_kwh": production,
                "monthly_direct_self_consumption_kwh": [direct],
                "monthly_storage_charge_kwh": [charge]
            }
        }))
        .unwrap();
        let generator = in_memory_generator();
        prop_assert_eq!(generator.resolve(&input), generator.resolve(&input));
    }
}
